//! Physical quantities and fixed-point arithmetic shared by generation and runtime.

pub mod fixed;
pub mod length;
pub mod mass;

#[cfg(test)]
mod fixed_test;
#[cfg(test)]
mod mass_test;

pub use fixed::Fixed;
pub use length::{Length, AU, EARTH_RADIUS_M, LIGHT_YEAR, SOLAR_RADIUS_M};
pub use mass::{Mass, EARTH_MASS_KG, SOLAR_MASS_KG, SUN_MASS_TO_EARTH_MASS};

/// Newtonian gravitational constant (m³ kg⁻¹ s⁻²)
pub const G: f64 = 6.67428e-11;

/// Solar radius in AU as an exact fixed-point ratio (305/65536).
pub const AU_SOL_RADIUS: Fixed = Fixed::ratio(305, 65_536);

/// Earth radius in AU as an exact fixed-point ratio (3/65536).
pub const AU_EARTH_RADIUS: Fixed = Fixed::ratio(3, 65_536);

/// Seconds in one day.
pub const DAY_SECONDS: f64 = 86_400.0;
