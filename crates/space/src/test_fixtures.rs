//! Systems shared by the unit tests.

use nalgebra::Matrix3;
use star_system::{BodyType, Orbit, StarSystem, SystemBodyId, SystemPath};
use system_generator::{GeneratorConfig, StarSystemGenerator, StationConfig, SystemDescriptor};
use units::{Fixed, AU};

use crate::config::SpaceConfig;
use crate::space::Space;
use crate::terrain::SmoothTerrainSource;
use std::sync::Arc;

pub const PLANET: SystemBodyId = SystemBodyId(1);
pub const SURFACE_PORT: SystemBodyId = SystemBodyId(2);
pub const ORBITAL_PORT: SystemBodyId = SystemBodyId(3);

/// One sun-like star with an earth-like planet carrying a surface and an
/// orbital starport. Bodies in pre-order: star, planet, surface port,
/// orbital port.
pub fn sol() -> StarSystem {
    let mut system = StarSystem::new(SystemPath::system(0, 0, 0, 0), "Sol", 1);
    let star = system.new_body("Sol", BodyType::StarG);
    let planet = system.new_body("Earth", BodyType::PlanetTerrestrial);
    let surface = system.new_body("Earth Port 1", BodyType::StarportSurface);
    let orbital = system.new_body("Earth Orbital 1", BodyType::StarportOrbital);
    system.set_root(star);
    system.attach(star, planet);
    system.attach(planet, surface);
    system.attach(planet, orbital);

    let star_kg = {
        let body = system.body_mut(star).unwrap();
        body.mass = Fixed::ONE;
        body.radius = Fixed::ONE;
        body.mass_kg()
    };
    let planet_kg = {
        let body = system.body_mut(planet).unwrap();
        body.mass = Fixed::ONE;
        body.radius = Fixed::ONE;
        body.semi_major_axis = Fixed::ONE;
        body.orb_min = Fixed::ONE;
        body.orb_max = Fixed::ONE;
        body.rotation_period = Fixed::ONE;
        body.orbit = Orbit::around_primary(AU, 0.0, star_kg, Matrix3::identity(), 0.0);
        body.mass_kg()
    };
    {
        let body = system.body_mut(surface).unwrap();
        body.seed = 42;
    }
    {
        let body = system.body_mut(orbital).unwrap();
        let sma = Fixed::ratio(1, 10_000);
        body.semi_major_axis = sma;
        body.orb_min = sma;
        body.orb_max = sma;
        body.orbit = Orbit::around_primary(sma.to_f64() * AU, 0.0, planet_kg, Matrix3::identity(), 0.0);
    }

    system.finalize();
    system
}

pub fn sol_space() -> Space {
    Space::new(Arc::new(sol()), SpaceConfig::default(), &SmoothTerrainSource, 0.0)
}

/// A generated system in which every rocky world is settled.
pub fn generated(seed: u32, star_types: &[BodyType]) -> StarSystem {
    let config = GeneratorConfig {
        stations: StationConfig {
            settlement_chance: 1.0,
            min_settled_temp: i32::MIN,
            max_settled_temp: i32::MAX,
            min_settled_mass: 0.0,
            ..StationConfig::default()
        },
        ..GeneratorConfig::default()
    };
    StarSystemGenerator::new(config).generate(&SystemDescriptor {
        path: SystemPath::system(3, -1, 2, seed % 4),
        name: "Tau".to_string(),
        seed,
        star_types: star_types.to_vec(),
    })
}

pub const STAR_MIXES: [&[BodyType]; 4] = [
    &[BodyType::StarG],
    &[BodyType::StarK, BodyType::StarM],
    &[BodyType::StarF, BodyType::StarK, BodyType::StarM],
    &[BodyType::StarA, BodyType::StarG, BodyType::StarK, BodyType::StarM],
];
