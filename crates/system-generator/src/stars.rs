//! Star bodies and binary pairing.

use nalgebra::Matrix3;
use seeded_random::Random;
use star_system::{rotate_x, rotate_y, BodyType, Orbit, StarSystem, SystemBody, SystemBodyId};
use std::f64::consts::{FRAC_PI_2, PI};
use units::{Fixed, AU};

/// Re-roll budget for [`make_star_lighter_than`].
const LIGHTER_STAR_TRIES: u32 = 16;

/// Fills in a star of type `star_type` from the star table.
///
/// Draws, in order: seed, radius, aspect ratio (hot stars only), mass,
/// temperature.
///
/// # Panics
///
/// Panics if `star_type` is not a star.
pub fn make_star_of_type(body: &mut SystemBody, star_type: BodyType, rng: &mut Random) {
    let info = star_type
        .star_info()
        .unwrap_or_else(|| panic!("{star_type} is not a star type"));

    body.body_type = star_type;
    body.seed = rng.int32();
    body.radius = Fixed::ratio(rng.int32_range(info.radius.0, info.radius.1) as i64, 100);

    if star_type.is_oblate() {
        let rnd = rng.fixed();
        body.aspect_ratio = Fixed::ONE + Fixed::ratio(8, 10) * rnd * rnd;
    }

    body.mass = Fixed::ratio(rng.int32_range(info.mass.0, info.mass.1) as i64, 100);
    body.average_temp = rng.int32_range(info.temp.0, info.temp.1);
}

/// Rolls a star of `star_type` until it is no heavier than `max_mass`.
///
/// Gives up after a fixed number of tries and keeps the last roll.
pub fn make_star_lighter_than(
    body: &mut SystemBody,
    star_type: BodyType,
    max_mass: Fixed,
    rng: &mut Random,
) {
    for _ in 0..LIGHTER_STAR_TRIES {
        make_star_of_type(body, star_type, rng);
        if body.mass <= max_mass {
            break;
        }
    }
}

/// Puts `a` and `b` in orbit around their common barycentre.
///
/// The pair's semi-major axis is drawn from one of three magnitude bands and
/// doubled on every retry until the periapsis clears `min_dist` (AU). Each body
/// receives its share of the axis by inverse mass ratio, and the two orbital
/// planes are half a turn apart so the bodies stay on opposite sides of the
/// barycentre; `b` additionally records a phase of π for bookkeeping. Both
/// bodies record the full separation as `semi_major_axis` together with the
/// pair's `orb_min` and `orb_max`.
///
/// # Arguments
///
/// * `system` - The arena holding both bodies
/// * `a` - Primary of the pair
/// * `b` - Secondary of the pair
/// * `min_dist` - Smallest allowed periapsis separation in AU
/// * `rng` - The system's random source
pub fn make_binary_pair(
    system: &mut StarSystem,
    a: SystemBodyId,
    b: SystemBodyId,
    min_dist: Fixed,
    rng: &mut Random,
) {
    let (Some(body_a), Some(body_b)) = (system.body(a), system.body(b)) else {
        return;
    };
    let (mass_a, mass_b) = (body_a.mass, body_b.mass);
    let (kg_a, kg_b) = (body_a.mass_kg(), body_b.mass_kg());

    let total = mass_a + mass_b;
    let share_a = mass_b / total;
    let share_b = mass_a / total;

    let ecc = rng.n_fixed(3);
    let mut mul: i64 = 1;
    let sma = loop {
        let sma = match rng.int32_below(3) {
            2 => Fixed::ratio(rng.int32_range(100, 10_000) as i64, 100),
            1 => Fixed::ratio(rng.int32_range(10, 1000) as i64, 100),
            _ => Fixed::ratio(rng.int32_range(1, 100) as i64, 100),
        } * mul;
        mul = mul.saturating_mul(2);
        if sma - ecc * sma >= min_dist || sma == Fixed::MAX {
            break sma;
        }
    };

    let total_kg = kg_a + kg_b;
    let e = ecc.to_f64();
    let rot_y = rng.double_max(PI);
    let plane_a: Matrix3<f64> = rotate_y(rot_y) * rotate_x(-FRAC_PI_2);
    let plane_b: Matrix3<f64> = rotate_y(rot_y - PI) * rotate_x(-FRAC_PI_2);

    let sma_a = (sma * share_a).to_f64() * AU;
    let sma_b = (sma * share_b).to_f64() * AU;
    let orbit_a = Orbit::around_barycentre(sma_a, e, total_kg, kg_a, plane_a, 0.0);
    let orbit_b = Orbit::around_barycentre(sma_b, e, total_kg, kg_b, plane_b, 0.0);

    let orb_min = sma - ecc * sma;
    let orb_max = 2 * sma - orb_min;
    let offset = Fixed::ratio((rot_y * 10_000.0).round() as i64, 10_000);

    for (id, orbit, phase) in [(a, orbit_a, Fixed::ZERO), (b, orbit_b, Fixed::PI)] {
        if let Some(body) = system.body_mut(id) {
            body.semi_major_axis = sma;
            body.eccentricity = ecc;
            body.orbit = orbit;
            body.orbital_offset = offset;
            body.orbital_phase_at_start = phase;
            body.orb_min = orb_min;
            body.orb_max = orb_max;
        }
    }
}
