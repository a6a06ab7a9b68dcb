//! Planet and moon placement inside an accretion disc.

use seeded_random::Random;
use star_system::{
    rotate_x, rotate_y, BodyType, Orbit, StarSystem, SuperType, SystemBody, SystemBodyId,
};
use std::f64::consts::{FRAC_PI_2, PI};
use tracing::{trace, warn};
use units::{Fixed, AU};

use crate::classify::{PlanetClassifier, StellarHeating};
use crate::config::GeneratorConfig;
use crate::disc::AccretionDisc;

/// Shared state for one generation pass.
pub(crate) struct PlacementContext<'a> {
    pub config: &'a GeneratorConfig,
    pub classifier: &'a dyn PlanetClassifier,
    pub num_stars: usize,
}

/// Places planets (or moons) around `primary`, then names and classifies them.
///
/// Children of stars and grav-points get moons of their own; moons do not.
pub(crate) fn make_planets_around(
    system: &mut StarSystem,
    primary: SystemBodyId,
    ctx: &PlacementContext<'_>,
    rng: &mut Random,
) {
    let disc = AccretionDisc::around(system, primary, ctx.num_stars, ctx.config, rng);
    let Some(primary_body) = system.body(primary) else {
        return;
    };
    let primary_super = primary_body.super_type();
    let primary_is_gravpoint = primary_body.is_gravpoint();
    let primary_kg = primary_body.mass_kg();
    let primary_name = primary_body.name.clone();

    trace!(
        primary = %primary_name,
        min = %disc.min,
        max = %disc.max,
        "accretion disc"
    );

    let separation = Fixed::from_f64(ctx.config.min_separation);
    let initial_jump = rng.n_fixed(5);
    let mut pos = (Fixed::ONE - initial_jump) * disc.min + initial_jump * disc.max;

    while pos < disc.max {
        let periapsis = pos + pos * Fixed::ratio(1, 2) * rng.n_fixed(2);
        let ecc = rng.n_fixed(3);
        let semi_major_axis = periapsis / (Fixed::ONE - ecc);
        let apoapsis = 2 * semi_major_axis - periapsis;
        if apoapsis > disc.max {
            break;
        }

        let mass = match disc.accretable_mass(pos, separation * apoapsis, rng.fixed()) {
            Some(mass) => mass,
            None => {
                warn!(primary = %primary_name, "planetary mass overflowed, clamping");
                Fixed::MAX
            }
        };

        let id = system.new_body("", BodyType::PlanetTerrestrial);
        let axial_tilt = Fixed::ratio(100, 157) * rng.n_fixed(2);
        let seed = rng.int32();
        let rotation_period = Fixed::ratio(rng.int32_range(1, 200) as i64, 24);
        let r1 = rng.double_max(2.0 * PI);
        let r2 = rng.n_double(5);

        if let Some(planet) = system.body_mut(id) {
            planet.eccentricity = ecc;
            planet.axial_tilt = axial_tilt;
            planet.semi_major_axis = semi_major_axis;
            planet.seed = seed;
            planet.mass = mass;
            planet.rotation_period = rotation_period;

            let sma_m = semi_major_axis.to_f64() * AU;
            let e = ecc.to_f64();
            let plane = rotate_y(r1) * rotate_x(-FRAC_PI_2 + r2 * FRAC_PI_2);
            planet.orbit = if primary_is_gravpoint {
                Orbit::around_barycentre(sma_m, e, primary_kg, planet.mass_kg(), plane, 0.0)
            } else {
                Orbit::around_primary(sma_m, e, primary_kg, plane, 0.0)
            };
            planet.inclination = Fixed::PI * Fixed::from_f64(r2 / 2.0);
            planet.orb_min = periapsis;
            planet.orb_max = apoapsis;
        }
        system.attach(primary, id);

        pos = apoapsis * separation;
    }

    let make_moons = primary_super <= SuperType::Star;
    let children: Vec<SystemBodyId> = system
        .children(primary)
        .filter(|c| !c.is_star() && !c.is_gravpoint())
        .map(|c| c.id)
        .collect();

    for (idx, child) in children.into_iter().enumerate() {
        let suffix = if make_moons {
            format!(" {}", (b'a' + (idx % 26) as u8) as char)
        } else {
            format!(" {}", idx + 1)
        };
        let heating = stellar_heating(system, child);
        if let Some(body) = system.body_mut(child) {
            body.name = format!("{primary_name}{suffix}");
            ctx.classifier.classify(body, &heating, rng);
        }
        if make_moons {
            make_planets_around(system, child, ctx, rng);
        }
    }
}

/// Nearest heating star for `id` and the body's mean distance from it.
///
/// Moons use their planet's orbit; bodies circling a grav-point use the
/// heaviest star beneath it.
fn stellar_heating(system: &StarSystem, id: SystemBodyId) -> StellarHeating {
    let mut orbiter = system.body(id);
    while let Some(body) = orbiter {
        let Some(parent) = body.parent.and_then(|p| system.body(p)) else {
            break;
        };
        let star = if parent.is_star() {
            Some(parent)
        } else if parent.is_gravpoint() {
            heaviest_star_under(system, parent.id)
        } else {
            None
        };
        if let Some(star) = star {
            let mean = (body.orb_min + body.orb_max).to_f64() / 2.0 * AU;
            return StellarHeating {
                star_radius_m: star.radius_m(),
                star_temp: star.average_temp,
                mean_distance_m: mean,
            };
        }
        orbiter = Some(parent);
    }
    StellarHeating {
        star_radius_m: 0.0,
        star_temp: 0,
        mean_distance_m: 0.0,
    }
}

fn heaviest_star_under(system: &StarSystem, id: SystemBodyId) -> Option<&SystemBody> {
    let mut best: Option<&SystemBody> = None;
    let mut stack = vec![id];
    while let Some(current) = stack.pop() {
        for child in system.children(current) {
            if child.is_star() {
                if best.map_or(true, |b| child.mass > b.mass) {
                    best = Some(child);
                }
            } else if child.is_gravpoint() {
                stack.push(child.id);
            }
        }
    }
    best
}
