//! Surface starport placement.
//!
//! A starport starts at the orientation stored with its descriptor and, if
//! that spot is under water, too steep or too close to another starport, is
//! moved to a random orientation drawn from its own seed. Up is the local Y
//! axis of the orientation.

use nalgebra::{Matrix3, Vector3};
use seeded_random::Random;
use star_system::{rotate_y, rotate_z};
use std::collections::HashMap;
use std::f64::consts::PI;
use tracing::{debug, warn};

use crate::body::BodyId;
use crate::config::PlacementConfig;
use crate::terrain::Terrain;

/// Offsets sampled around a candidate, in units of the sample spacing along
/// the local X and Z axes.
const SAMPLE_OFFSETS: [(f64, f64); 6] = [
    (0.0, 0.0),
    (1.0, 0.0),
    (-1.0, 0.0),
    (0.0, 1.0),
    (0.0, -1.0),
    (1.0, 1.0),
];

/// Where a starport ended up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfacePlacement {
    pub orientation: Matrix3<f64>,
    /// Unit vector from the planet centre, rotating-frame coordinates.
    pub direction: Vector3<f64>,
    /// Point on the surface, meters.
    pub position: Vector3<f64>,
    /// Largest height difference among the samples, meters.
    pub variation: f64,
    /// Candidates tried, including the accepted one.
    pub attempts: u32,
    /// True if no candidate met every condition.
    pub fallback: bool,
}

/// Directions already taken by starports, per planet.
#[derive(Debug, Clone, Default)]
pub struct PlacementRecord {
    placed: HashMap<BodyId, Vec<Vector3<f64>>>,
}

impl PlacementRecord {
    pub fn placed_on(&self, planet: BodyId) -> &[Vector3<f64>] {
        self.placed.get(&planet).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn record(&mut self, planet: BodyId, direction: Vector3<f64>) {
        self.placed.entry(planet).or_default().push(direction);
    }

    pub fn clear(&mut self) {
        self.placed.clear();
    }
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    orientation: Matrix3<f64>,
    direction: Vector3<f64>,
    height: f64,
    variation: f64,
    underwater: bool,
}

fn evaluate(terrain: &dyn Terrain, orientation: Matrix3<f64>, delta: f64) -> Candidate {
    let mut heights = SAMPLE_OFFSETS
        .iter()
        .map(|(dx, dz)| {
            let dir = orientation * Vector3::new(dx * delta, 1.0, dz * delta);
            terrain.height(&dir.normalize())
        });
    let first = heights.next().unwrap_or(0.0);
    let (low, high) = heights.fold((first, first), |(lo, hi), h| (lo.min(h), hi.max(h)));

    let direction = (orientation * Vector3::y()).normalize();
    Candidate {
        orientation,
        direction,
        height: first,
        variation: high - low,
        underwater: terrain.is_underwater(&direction),
    }
}

/// Searches for a level, dry spot at least `sample_delta` away from the
/// `placed` directions.
///
/// `initial` is tried first. Hand-authored starports on terrain smoother than
/// the configured cutoff keep `initial` unless it is under water. When the
/// attempt budget runs out, the flattest dry candidate wins.
pub fn place_on_surface(
    terrain: &dyn Terrain,
    seed: u32,
    initial: &Matrix3<f64>,
    is_custom: bool,
    placed: &[Vector3<f64>],
    config: &PlacementConfig,
) -> SurfacePlacement {
    let delta = config.sample_delta;
    let threshold = config.max_slope * delta * terrain.radius();
    let keep_authored = is_custom && terrain.relief() < config.smooth_terrain_cutoff;
    let attempts = config.max_attempts.max(1);

    let mut rng = Random::from_seed(seed);
    let first = evaluate(terrain, *initial, delta);
    let mut best: Option<Candidate> = None;

    for attempt in 0..attempts {
        let candidate = if attempt == 0 {
            first
        } else {
            let r2 = rng.double();
            let r1 = rng.double();
            evaluate(terrain, rotate_z(2.0 * PI * r1) * rotate_y(2.0 * PI * r2), delta)
        };

        if attempt == 0 && keep_authored && !candidate.underwater {
            return finish(candidate, 1, false);
        }

        let crowded = placed.iter().any(|p| (p - candidate.direction).norm() < delta);
        if !candidate.underwater && !crowded && candidate.variation < threshold {
            if attempt > 0 {
                debug!(seed, attempts = attempt + 1, "starport relocated");
            }
            return finish(candidate, attempt + 1, false);
        }

        if !candidate.underwater && best.map_or(true, |b| candidate.variation < b.variation) {
            best = Some(candidate);
        }
    }

    warn!(
        seed,
        attempts,
        "no level dry site for starport, using flattest candidate"
    );
    if is_custom {
        warn!(
            seed,
            "hand-authored starport could not be placed cleanly, its position needs fixing"
        );
    }
    finish(best.unwrap_or(first), attempts, true)
}

fn finish(candidate: Candidate, attempts: u32, fallback: bool) -> SurfacePlacement {
    SurfacePlacement {
        orientation: candidate.orientation,
        direction: candidate.direction,
        position: candidate.direction * candidate.height,
        variation: candidate.variation,
        attempts,
        fallback,
    }
}
