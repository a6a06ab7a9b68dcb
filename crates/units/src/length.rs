use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// One astronomical unit in meters.
pub const AU: f64 = 149_598_000_000.0;

/// Mean solar radius in meters.
pub const SOLAR_RADIUS_M: f64 = 6.955e8;

/// Equatorial Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_378_135.0;

/// Solar radius in AU: 1 R☉ = 0.00464912 AU
pub const SOLAR_RADIUS_AU: f64 = SOLAR_RADIUS_M / AU;

/// Earth radius in AU
pub const EARTH_RADIUS_AU: f64 = EARTH_RADIUS_M / AU;

/// One light year in meters.
pub const LIGHT_YEAR: f64 = 9.460_730_472_580_8e15;

/// A physical length quantity using f64 precision.
///
/// The `Length` struct represents length values with astronomical units (AU) as the base unit.
/// Generation works in AU, solar radii and Earth radii; the runtime works in meters, so both
/// directions are covered.
///
/// # Examples
///
/// ```rust
/// use units::Length;
///
/// let earth_orbit = Length::from_au(1.0);
/// let earth_radius = Length::from_earth_radii(1.0);
///
/// assert!(earth_orbit > earth_radius);
/// assert!((earth_orbit.to_meters() - units::length::AU).abs() < 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Length(f64); // Base unit: AU

impl Length {
    /// Creates a zero length value
    pub fn zero() -> Self {
        Self(0.0)
    }

    /// Creates a new `Length` from a value in astronomical units.
    pub fn from_au(value: f64) -> Self {
        Self(value)
    }

    /// Creates a new `Length` from a value in Earth radii.
    pub fn from_earth_radii(value: f64) -> Self {
        Self(value * EARTH_RADIUS_AU)
    }

    /// Creates a new `Length` from a value in solar radii.
    pub fn from_solar_radii(value: f64) -> Self {
        Self(value * SOLAR_RADIUS_AU)
    }

    /// Creates a new `Length` from a value in meters.
    pub fn from_meters(value: f64) -> Self {
        Self(value / AU)
    }

    /// Creates a new `Length` from a value in light years.
    pub fn from_light_years(value: f64) -> Self {
        Self(value * LIGHT_YEAR / AU)
    }

    /// Returns the length in astronomical units.
    pub fn to_au(&self) -> f64 {
        self.0
    }

    /// Converts the length to Earth radii.
    pub fn to_earth_radii(&self) -> f64 {
        self.0 / EARTH_RADIUS_AU
    }

    /// Converts the length to solar radii.
    pub fn to_solar_radii(&self) -> f64 {
        self.0 / SOLAR_RADIUS_AU
    }

    /// Converts the length to meters.
    pub fn to_meters(&self) -> f64 {
        self.0 * AU
    }

    /// Converts the length to light years.
    pub fn to_light_years(&self) -> f64 {
        self.0 * AU / LIGHT_YEAR
    }

    pub fn min(self, other: Self) -> Self {
        Self(self.0.min(other.0))
    }

    pub fn max(self, other: Self) -> Self {
        Self(self.0.max(other.0))
    }
}

impl Add for Length {
    type Output = Length;

    fn add(self, rhs: Length) -> Length {
        Length(self.0 + rhs.0)
    }
}

impl Sub for Length {
    type Output = Length;

    fn sub(self, rhs: Length) -> Length {
        Length(self.0 - rhs.0)
    }
}

impl Mul<f64> for Length {
    type Output = Length;

    fn mul(self, rhs: f64) -> Length {
        Length(self.0 * rhs)
    }
}

impl Div<f64> for Length {
    type Output = Length;

    fn div(self, rhs: f64) -> Length {
        Length(self.0 / rhs)
    }
}

/// Division of Length by Length returns a dimensionless ratio
impl Div for Length {
    type Output = f64;

    fn div(self, rhs: Self) -> f64 {
        self.0 / rhs.0
    }
}

/// Allow f64 * Length (commutative multiplication)
impl Mul<Length> for f64 {
    type Output = Length;

    fn mul(self, rhs: Length) -> Length {
        rhs * self
    }
}
