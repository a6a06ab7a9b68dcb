//! Runtime tuning constants.
//!
//! ```toml
//! restitution = 0.5
//!
//! [placement]
//! max_attempts = 50
//!
//! [hyperspace]
//! max_distance_au = 20.0
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;

/// Collision, frame and sub-system settings for a [`Space`](crate::Space).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpaceConfig {
    /// Coefficient of restitution for every impulse response.
    pub restitution: f64,
    /// Extra push allowed beyond the contact depth, meters.
    pub penetration_threshold: f64,
    /// Fraction of the depth removed per second of tick.
    pub penetration_rate: f64,
    /// Speeds below this after a response are zeroed, m/s.
    pub rest_velocity: f64,

    /// Radius of an orbital starport's frame, meters.
    pub station_frame_radius: f64,
    /// Collision radius of a starport, meters.
    pub station_radius: f64,

    pub placement: PlacementConfig,
    pub hyperspace: HyperspaceConfig,
}

/// Surface starport placement search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    pub max_attempts: u32,
    /// Sample spacing on the unit sphere; also the minimum spacing between
    /// starports on one planet.
    pub sample_delta: f64,
    /// Steepest acceptable slope, radians.
    pub max_slope: f64,
    /// Hand-authored planets whose terrain relief (tallest feature over
    /// radius) stays below this keep their first placement.
    pub smooth_terrain_cutoff: f64,
}

/// Arrival point after a hyperspace jump.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HyperspaceConfig {
    /// Orbital speed used to pick the arrival distance, m/s.
    pub max_orbit_velocity: f64,
    /// Closest arrival, in primary radii.
    pub min_radius_factor: f64,
    /// Farthest arrival, AU.
    pub max_distance_au: f64,
    pub scatter_min: f64,
    pub scatter_max: f64,
}

impl Default for SpaceConfig {
    fn default() -> Self {
        Self {
            restitution: 0.35,
            penetration_threshold: 0.5,
            penetration_rate: 10.0,
            rest_velocity: 1e-3,
            station_frame_radius: 1_000_000.0,
            station_radius: 500.0,
            placement: PlacementConfig::default(),
            hyperspace: HyperspaceConfig::default(),
        }
    }
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            max_attempts: 200,
            sample_delta: 0.002,
            max_slope: 10f64.to_radians(),
            smooth_terrain_cutoff: 0.002,
        }
    }
}

impl Default for HyperspaceConfig {
    fn default() -> Self {
        Self {
            max_orbit_velocity: 100_000.0,
            min_radius_factor: 1.1,
            max_distance_au: 100.0,
            scatter_min: 0.95,
            scatter_max: 1.2,
        }
    }
}

impl SpaceConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}
