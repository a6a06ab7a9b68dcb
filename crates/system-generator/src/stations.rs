//! Settlement and starport placement.
//!
//! Each body uses its own random source seeded from the system path, the
//! body's seed and the universe seed, so adding stations never disturbs the
//! main generation sequence.

use nalgebra::Matrix3;
use seeded_random::Random;
use star_system::{rotate_y, rotate_z, BodyType, Orbit, StarSystem, SystemBodyId};
use std::f64::consts::PI;
use tracing::trace;
use units::{Fixed, AU, AU_EARTH_RADIUS};

use crate::config::GeneratorConfig;

/// Seeds the per-body random source used for its stations.
pub fn station_rng(system: &StarSystem, seed: u32, universe_seed: u32) -> Random {
    let path = system.path;
    Random::new(&[
        path.system_index.unwrap_or(0),
        path.sector_x as u32,
        path.sector_y as u32,
        path.sector_z as u32,
        seed,
        universe_seed,
    ])
}

/// Initial surface orientation for a settlement, from its own seed.
///
/// Returns the orientation matrix and the latitude stored in `inclination`.
pub fn settlement_orientation(seed: u32) -> (Matrix3<f64>, Fixed) {
    let mut rng = Random::from_seed(seed);
    let r2 = rng.double();
    let r1 = rng.double();
    let plane = rotate_z(2.0 * PI * r1) * rotate_y(2.0 * PI * r2);
    let latitude = Fixed::ratio((r1 * 10_000.0) as i64, 10_000) + Fixed::PI / Fixed::from_int(2);
    (plane, latitude)
}

/// Adds orbital and surface starports to every settled body.
pub(crate) fn populate_stations(system: &mut StarSystem, config: &GeneratorConfig) {
    let Some(root) = system.root_id() else {
        return;
    };

    // children before parents
    let mut order = Vec::new();
    let mut stack = vec![(root, false)];
    while let Some((id, expanded)) = stack.pop() {
        if expanded {
            order.push(id);
            continue;
        }
        stack.push((id, true));
        if let Some(body) = system.body(id) {
            stack.extend(body.children.iter().rev().map(|c| (*c, false)));
        }
    }

    for id in order {
        add_stations(system, id, config);
    }
}

fn add_stations(system: &mut StarSystem, id: SystemBodyId, config: &GeneratorConfig) {
    let Some(body) = system.body(id) else {
        return;
    };
    let knobs = &config.stations;
    if body.body_type != BodyType::PlanetTerrestrial
        || body.average_temp < knobs.min_settled_temp
        || body.average_temp > knobs.max_settled_temp
        || body.mass.to_f64() < knobs.min_settled_mass
    {
        return;
    }

    let mut rng = station_rng(system, body.seed, config.universe_seed);
    if rng.double() >= knobs.settlement_chance {
        return;
    }
    let population = rng.fixed();

    let planet_name = body.name.clone();
    let planet_temp = body.average_temp;
    let planet_kg = body.mass_kg();
    let mut orb_max = Fixed::from_f64(system.hill_radius(id).to_au()) / Fixed::from_int(4);
    let orb_min = 4 * body.radius * AU_EARTH_RADIUS;
    if let Some(first) = body.children.first().and_then(|c| system.body(*c)) {
        orb_max = orb_max.min(Fixed::ratio(1, 2) * first.orb_min);
    }

    let mut made = 0u32;

    let mut pop = population + rng.fixed();
    if orb_min < orb_max {
        pop -= rng.fixed();
        let mut count = 0u32;
        while !pop.is_negative() {
            count += 1;
            pop -= rng.fixed();
        }
        for i in 0..count {
            let port = system.new_body(
                format!("{planet_name} Orbital {}", i + 1),
                BodyType::StarportOrbital,
            );
            let seed = rng.int32();
            let sma = orb_min + (orb_max - orb_min) / Fixed::from_int(4);
            let plane = if count > 1 {
                rotate_z(i as f64 * (PI / (count - 1) as f64))
            } else {
                Matrix3::identity()
            };
            if let Some(station) = system.body_mut(port) {
                station.seed = seed;
                station.rotation_period = Fixed::ratio(1, 3600);
                station.average_temp = planet_temp;
                station.semi_major_axis = sma;
                station.orb_min = sma;
                station.orb_max = sma;
                station.orbit =
                    Orbit::around_primary(sma.to_f64() * AU, 0.0, planet_kg, plane, 0.0);
            }
            system.attach_front(id, port);
            made += 1;
        }
    }

    let mut pop = population + rng.fixed() * 3;
    for _ in 0..knobs.max_surface_ports {
        pop -= rng.fixed();
        if pop.is_negative() {
            break;
        }
        add_surface_port(system, id, &planet_name, planet_temp, &mut rng, made);
        made += 1;
    }

    if made == 0 {
        add_surface_port(system, id, &planet_name, planet_temp, &mut rng, made);
        made += 1;
    }

    trace!(planet = %planet_name, stations = made, "settled");
}

fn add_surface_port(
    system: &mut StarSystem,
    planet: SystemBodyId,
    planet_name: &str,
    planet_temp: i32,
    rng: &mut Random,
    index: u32,
) {
    let port = system.new_body(
        format!("{planet_name} Port {}", index + 1),
        BodyType::StarportSurface,
    );
    let seed = rng.int32();
    let (plane, latitude) = settlement_orientation(seed);
    if let Some(station) = system.body_mut(port) {
        station.seed = seed;
        station.average_temp = planet_temp;
        station.orbit = Orbit {
            plane,
            ..Orbit::default()
        };
        station.inclination = latitude;
        station.orbital_offset = Fixed::PI / Fixed::from_int(2);
    }
    system.attach_front(planet, port);
}
