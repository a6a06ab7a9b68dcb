//! Tuning constants for system generation.
//!
//! Every field has a default, so a TOML file only needs the values it wants to
//! change:
//!
//! ```toml
//! universe_seed = 42
//! min_separation = 1.4
//!
//! [stations]
//! settlement_chance = 0.25
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;

/// Galaxy-wide seed mixed into every system's random tuple.
pub const DEFAULT_UNIVERSE_SEED: u32 = 0xabcd_1234;

/// Generator configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub universe_seed: u32,

    // ── Accretion disc ──────────────────────────────────────────────────────
    /// Disc inner edge around a grav-point, in multiples of the pair's apoapsis.
    pub safe_binary_distance: f64,
    /// Spacing between neighbouring orbits, as a multiple of apoapsis.
    pub min_separation: f64,
    /// Fraction of a star's mass available to its disc.
    pub star_disc_mass_fraction: f64,
    /// Fraction of a planet's mass available to its moon disc.
    pub planet_disc_mass_fraction: f64,
    /// Upper bound on any disc radius, in AU.
    pub default_disc_max_au: f64,
    /// Disc outer edge for a star in a pair, as a fraction of its periapsis.
    pub companion_disc_fraction: f64,
    /// Disc outer edge in 3- and 4-star systems, as a multiple of the inner pair's periapsis.
    pub multiple_system_disc_clamp: f64,
    /// Moon disc outer edge as a fraction of the planet's Hill radius.
    pub moon_disc_hill_fraction: f64,

    // ── Multiple stars ──────────────────────────────────────────────────────
    /// Outer-pair apoapsis above which a 3- or 4-star system is re-rolled, in AU.
    pub outer_pair_max_au: f64,
    /// Minimum pair separation, in summed stellar radii.
    pub star_pair_separation: f64,

    pub stations: StationConfig,
}

/// Settlement and starport population.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StationConfig {
    /// Chance that a habitable rocky body is settled.
    pub settlement_chance: f64,
    /// Coldest settled surface, in kelvin.
    pub min_settled_temp: i32,
    /// Hottest settled surface, in kelvin.
    pub max_settled_temp: i32,
    /// Smallest settled body, in Earth masses.
    pub min_settled_mass: f64,
    pub max_surface_ports: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            universe_seed: DEFAULT_UNIVERSE_SEED,
            safe_binary_distance: 5.0,
            min_separation: 1.35,
            star_disc_mass_fraction: 0.02,
            planet_disc_mass_fraction: 0.002,
            default_disc_max_au: 5000.0,
            companion_disc_fraction: 0.1,
            multiple_system_disc_clamp: 1.1,
            moon_disc_hill_fraction: 0.5,
            outer_pair_max_au: 100.0,
            star_pair_separation: 1.2,
            stations: StationConfig::default(),
        }
    }
}

impl Default for StationConfig {
    fn default() -> Self {
        Self {
            settlement_chance: 0.5,
            min_settled_temp: 200,
            max_settled_temp: 400,
            min_settled_mass: 0.01,
            max_surface_ports: 6,
        }
    }
}

impl GeneratorConfig {
    /// Parses a TOML document; missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}
