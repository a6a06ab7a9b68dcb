//! Deterministic star system generation
//!
//! Turns a [`SystemDescriptor`] (path, name, seed and star types) into a
//! [`star_system::StarSystem`] body tree: stars and binary pairs, planets and
//! moons formed from accretion discs, and starports on settled worlds.

pub mod classify;
pub mod config;
pub mod disc;
pub mod error;
pub mod generation;
mod planets;
pub mod stars;
pub mod stations;

// Re-export main generation types
pub use classify::{MassClassifier, PlanetClassifier, StellarHeating};
pub use config::{GeneratorConfig, StationConfig, DEFAULT_UNIVERSE_SEED};
pub use disc::{mass_from_area, AccretionDisc};
pub use error::{GeneratorError, Result};
pub use generation::{StarSystemGenerator, SystemDescriptor};

#[cfg(test)]
mod classify_test;
#[cfg(test)]
mod config_test;
#[cfg(test)]
mod disc_test;
