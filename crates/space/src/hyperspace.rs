//! Where a ship drops out of hyperspace in the destination system.

use nalgebra::Vector3;
use seeded_random::Random;
use star_system::{StarSystem, SystemBody, SystemPath};
use std::f64::consts::PI;
use units::AU;

use crate::config::HyperspaceConfig;
use crate::frame::{FrameId, FrameTree};

/// Arrival state in the frame of the primary star.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HyperspaceArrival {
    pub frame: FrameId,
    pub position: Vector3<f64>,
    pub velocity: Vector3<f64>,
    /// Star the ship arrives around.
    pub primary: star_system::SystemBodyId,
    /// Orbital distance the arrival was scaled from, before scatter, meters.
    pub distance: f64,
}

/// The star a jump towards `target` arrives at: the star above the targeted
/// body, or the system's primary when no body is targeted.
pub fn arrival_primary<'a>(system: &'a StarSystem, target: &SystemPath) -> Option<&'a SystemBody> {
    target
        .body_index
        .and_then(|i| system.star_ancestor(star_system::SystemBodyId(i)))
        .or_else(|| system.primary_star())
}

/// Orbital distance for a circular orbit at `max_orbit_velocity`, bounded to
/// `[min_radius_factor · radius, max(min_radius_factor · radius, max_distance_au)]`.
pub fn arrival_distance(primary: &SystemBody, config: &HyperspaceConfig) -> f64 {
    let v = config.max_orbit_velocity;
    let radius = primary.radius_m();
    let min = config.min_radius_factor * radius;
    let max = min.max(config.max_distance_au * AU);
    (primary.gm() / (v * v)).clamp(min, max)
}

/// Arrival point and velocity for a jump from `source` to the system at
/// `dest`, both given as galactic positions.
///
/// The ship arrives on a near-circular orbit, moving along the jump
/// direction, at a random azimuth around it.
pub fn compute_arrival(
    system: &StarSystem,
    frames: &FrameTree,
    target: &SystemPath,
    source: &Vector3<f64>,
    dest: &Vector3<f64>,
    rng: &mut Random,
    config: &HyperspaceConfig,
) -> Option<HyperspaceArrival> {
    let primary = arrival_primary(system, target)?;
    let frame = frames.frame_for_system_body(primary.id)?;
    let distance = arrival_distance(primary, config);

    let travel = dest - source;
    let dir = if travel.norm_squared() > 0.0 {
        travel.normalize()
    } else {
        Vector3::z()
    };

    // any unit vector not parallel to dir seeds the perpendicular basis
    let helper = if dir.x.abs() < 0.9 { Vector3::x() } else { Vector3::y() };
    let u = dir.cross(&helper).normalize();
    let w = dir.cross(&u);
    let azimuth = rng.double_max(2.0 * PI);
    let radial = u * azimuth.cos() + w * azimuth.sin();

    let scatter = rng.double_range(config.scatter_min, config.scatter_max);
    let landing = distance * scatter;
    let position = radial * landing;
    // circular for where the ship actually lands
    let velocity = dir * (primary.gm() / landing).sqrt();

    Some(HyperspaceArrival {
        frame,
        position,
        velocity,
        primary: primary.id,
        distance,
    })
}
