use approx::assert_relative_eq;
use std::f64::consts::PI;
use star_system::{rotate_y, BodyType, SuperType};

use crate::body::{BodyKind, Motion};
use crate::builder::{build_space, BuiltSpace};
use crate::config::SpaceConfig;
use crate::frame::FrameFlags;
use crate::terrain::SmoothTerrainSource;
use crate::test_fixtures::{generated, sol, ORBITAL_PORT, PLANET, STAR_MIXES, SURFACE_PORT};

#[test]
fn test_sol_layout() {
    let system = sol();
    let built = build_space(&system, &SpaceConfig::default(), &SmoothTerrainSource, 0.0);

    // root, planet orbit, planet rotation, orbital port
    assert_eq!(built.frames.len(), 4);
    assert_eq!(built.bodies.len(), 4);

    let root = built.frames.root();
    assert_eq!(root.system_body, Some(system.root_id().unwrap()));
    assert_eq!(root.astro_body, Some(built.bodies[0].id));
    assert_eq!(built.bodies[0].kind, BodyKind::Star);
    assert_eq!(built.bodies[0].frame, Some(root.id));
}

#[test]
fn test_planet_gets_two_frames() {
    let system = sol();
    let config = SpaceConfig::default();
    let built = build_space(&system, &config, &SmoothTerrainSource, 0.0);
    let sbody = system.body(PLANET).unwrap();

    let outer_id = built.frames.frame_for_system_body(PLANET).unwrap();
    let outer = built.frames.get(outer_id).unwrap();
    assert!(!outer.is_rotating());
    assert!(outer.flags.contains(FrameFlags::HAS_ROTATING_CHILD));
    let hill = system.hill_radius(PLANET).to_meters();
    assert_relative_eq!(outer.radius, hill.max(4.0 * sbody.radius_m()));

    let inner = built.frames.children(outer_id).find(|f| f.is_rotating()).unwrap();
    assert_relative_eq!(inner.radius, 1.05 * sbody.radius_m(), max_relative = 1e-12);
    assert_relative_eq!(inner.ang_speed, 2.0 * PI / 86_400.0, max_relative = 1e-12);

    let planet = built.bodies.iter().find(|b| b.system_body == Some(PLANET)).unwrap();
    assert_eq!(planet.frame, Some(inner.id));
    assert_eq!(planet.motion, Motion::Rail);
    assert_eq!(inner.astro_body, Some(planet.id));
    assert!(built.terrains.contains_key(&planet.id));
}

#[test]
fn test_starports_in_sol() {
    let system = sol();
    let config = SpaceConfig::default();
    let built = build_space(&system, &config, &SmoothTerrainSource, 0.0);
    let planet = built.bodies.iter().find(|b| b.system_body == Some(PLANET)).unwrap();

    let surface = built.bodies.iter().find(|b| b.system_body == Some(SURFACE_PORT)).unwrap();
    assert_eq!(surface.kind, BodyKind::Starport);
    assert_eq!(surface.motion, Motion::Fixed);
    assert_eq!(surface.frame, planet.frame);
    assert_relative_eq!(surface.position.norm(), system.body(PLANET).unwrap().radius_m(), max_relative = 1e-9);
    assert_eq!(built.placements.placed_on(planet.id).len(), 1);
    // the descriptor is left as generated
    assert_eq!(system.body(SURFACE_PORT).unwrap().orbit.plane, nalgebra::Matrix3::identity());

    let orbital = built.bodies.iter().find(|b| b.system_body == Some(ORBITAL_PORT)).unwrap();
    let frame = built.frames.get(orbital.frame.unwrap()).unwrap();
    assert_eq!(frame.system_body, Some(ORBITAL_PORT));
    assert_relative_eq!(frame.radius, config.station_frame_radius);
    assert_relative_eq!(orbital.geom.radius, config.station_radius);
    assert_eq!(frame.parent, built.frames.frame_for_system_body(PLANET));
}

#[test]
fn test_frames_contain_their_bodies() {
    let config = SpaceConfig::default();
    for seed in 0..10 {
        for mix in STAR_MIXES {
            let system = generated(seed, mix);
            let built = build_space(&system, &config, &SmoothTerrainSource, 0.0);
            for frame in built.frames.iter() {
                let Some(body) = frame.astro_body.and_then(|b| built.bodies.get(b.index())) else {
                    continue;
                };
                assert!(
                    frame.radius > body.geom.radius,
                    "{} frame {} not larger than body {}",
                    frame.label,
                    frame.radius,
                    body.geom.radius
                );
            }
        }
    }
}

#[test]
fn test_every_body_gets_a_runtime_body() {
    for mix in STAR_MIXES {
        let system = generated(5, mix);
        let built = build_space(&system, &SpaceConfig::default(), &SmoothTerrainSource, 0.0);
        let physical = system.bodies().iter().filter(|b| !b.is_gravpoint()).count();
        assert_eq!(built.bodies.len(), physical);
        for (i, body) in built.bodies.iter().enumerate() {
            assert_eq!(body.id.index(), i);
            assert!(body.frame.is_some());
        }
        let gravpoints = system.bodies().iter().filter(|b| b.is_gravpoint()).count();
        let gravpoint_frames = built
            .frames
            .iter()
            .filter(|f| f.system_body.and_then(|s| system.body(s)).is_some_and(|s| s.is_gravpoint()))
            .count();
        assert_eq!(gravpoint_frames, gravpoints);
        assert!(built.frames.validate().is_ok());
    }
}

#[test]
fn test_paired_star_frames_stay_apart() {
    for seed in 0..16 {
        let system = generated(seed, &[BodyType::StarG, BodyType::StarK]);
        let built = build_space(&system, &SpaceConfig::default(), &SmoothTerrainSource, 0.0);
        for star in system.stars() {
            let frame = built.frames.get(built.frames.frame_for_system_body(star.id).unwrap()).unwrap();
            let limit = (0.11 * star.orb_min_m()).max(1.1 * star.radius_m());
            assert!(frame.radius <= limit * (1.0 + 1e-12));
        }
    }
}

#[test]
fn test_building_is_deterministic() {
    for mix in STAR_MIXES {
        let system = generated(77, mix);
        let a = build_space(&system, &SpaceConfig::default(), &SmoothTerrainSource, 0.0);
        let b = build_space(&system, &SpaceConfig::default(), &SmoothTerrainSource, 0.0);
        assert_eq!(a.frames, b.frames);
        assert_eq!(a.bodies, b.bodies);
    }
}

#[test]
fn test_settled_worlds_have_surface_ports() {
    let system = generated(3, STAR_MIXES[0]);
    let built = build_space(&system, &SpaceConfig::default(), &SmoothTerrainSource, 0.0);
    for sbody in system.bodies().iter().filter(|b| b.body_type == BodyType::StarportSurface) {
        let port = built.bodies.iter().find(|b| b.system_body == Some(sbody.id)).unwrap();
        let frame = built.frames.get(port.frame.unwrap()).unwrap();
        assert!(frame.is_rotating());
        let parent = system.body(sbody.parent.unwrap()).unwrap();
        assert_eq!(parent.super_type(), SuperType::RockyPlanet);
    }
}

#[test]
fn test_rotating_frames_are_spun_to_build_time() {
    let system = sol();
    let config = SpaceConfig::default();
    let epoch = build_space(&system, &config, &SmoothTerrainSource, 0.0);
    // a quarter of the planet's one-day period
    let later = build_space(&system, &config, &SmoothTerrainSource, 21_600.0);

    let spin = |built: &BuiltSpace| {
        let outer = built.frames.frame_for_system_body(PLANET).unwrap();
        built.frames.children(outer).find(|f| f.is_rotating()).unwrap().orient
    };
    assert_relative_eq!(spin(&later), spin(&epoch) * rotate_y(PI / 2.0), epsilon = 1e-12);

    // the surface port rides the frame, so its frame-local placement is unchanged
    let port = |built: &BuiltSpace| {
        built.bodies.iter().find(|b| b.system_body == Some(SURFACE_PORT)).unwrap().position
    };
    assert_relative_eq!(port(&later), port(&epoch), epsilon = 1e-6);
}
