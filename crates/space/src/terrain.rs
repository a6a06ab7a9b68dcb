//! Terrain height queries consumed by placement and terrain collision.

use nalgebra::Vector3;
use star_system::{SuperType, SystemBody};

/// Surface shape of a planet, in the planet's rotating frame.
pub trait Terrain {
    /// Distance from the centre to the surface along unit vector `dir`, meters.
    fn height(&self, dir: &Vector3<f64>) -> f64;

    /// Radius of the reference sphere; surface at or below it is sea, meters.
    fn radius(&self) -> f64;

    /// Tallest point above [`Terrain::radius`], meters.
    fn max_feature_height(&self) -> f64;

    fn has_oceans(&self) -> bool {
        true
    }

    fn is_underwater(&self, dir: &Vector3<f64>) -> bool {
        self.has_oceans() && self.height(dir) - self.radius() <= 0.0
    }

    /// Tallest feature relative to the radius.
    fn relief(&self) -> f64 {
        if self.radius() > 0.0 {
            self.max_feature_height() / self.radius()
        } else {
            0.0
        }
    }
}

/// A perfect sphere of dry land.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothTerrain {
    pub radius: f64,
}

impl Terrain for SmoothTerrain {
    fn height(&self, _dir: &Vector3<f64>) -> f64 {
        self.radius
    }

    fn radius(&self) -> f64 {
        self.radius
    }

    fn max_feature_height(&self) -> f64 {
        0.0
    }

    fn has_oceans(&self) -> bool {
        false
    }
}

/// Supplies terrain for the planets of a system as it is built or loaded.
pub trait TerrainSource {
    /// Terrain for `body`, or `None` if it has no solid surface to model.
    fn terrain_for(&self, body: &SystemBody) -> Option<Box<dyn Terrain>>;
}

/// Gives every planet and moon a [`SmoothTerrain`] of its own radius.
#[derive(Debug, Clone, Copy, Default)]
pub struct SmoothTerrainSource;

impl TerrainSource for SmoothTerrainSource {
    fn terrain_for(&self, body: &SystemBody) -> Option<Box<dyn Terrain>> {
        matches!(body.super_type(), SuperType::RockyPlanet | SuperType::GasGiant)
            .then(|| Box::new(SmoothTerrain { radius: body.radius_m() }) as Box<dyn Terrain>)
    }
}
