mod tests {
    use approx::assert_relative_eq;
    use nalgebra::Vector3;
    use seeded_random::Random;
    use star_system::{SystemBodyId, SystemPath};
    use std::sync::Arc;
    use units::AU;

    use crate::config::{HyperspaceConfig, SpaceConfig};
    use crate::hyperspace::{arrival_distance, arrival_primary, compute_arrival};
    use crate::space::Space;
    use crate::terrain::SmoothTerrainSource;
    use crate::test_fixtures::{generated, sol, PLANET, STAR_MIXES};

    #[test]
    fn test_distance_for_a_sun() {
        let system = sol();
        let sun = system.primary_star().unwrap();
        let d = arrival_distance(sun, &HyperspaceConfig::default());
        // GM☉ / (100 km/s)² is about 0.09 AU, well inside the bounds
        assert_relative_eq!(d, sun.gm() / 1e10, max_relative = 1e-12);
    }

    #[test]
    fn test_distance_is_clamped() {
        let system = sol();
        let sun = system.primary_star().unwrap();
        let fast = HyperspaceConfig {
            max_orbit_velocity: 1e8,
            ..HyperspaceConfig::default()
        };
        assert_relative_eq!(arrival_distance(sun, &fast), 1.1 * sun.radius_m());

        let slow = HyperspaceConfig {
            max_orbit_velocity: 1.0,
            ..HyperspaceConfig::default()
        };
        assert_relative_eq!(arrival_distance(sun, &slow), 100.0 * AU);
    }

    #[test]
    fn test_arrival_distance_bounds() {
        let config = HyperspaceConfig::default();
        for seed in 0..12 {
            for mix in STAR_MIXES {
                let system = generated(seed, mix);
                for star in system.stars() {
                    let min = 1.1 * star.radius_m();
                    let max = min.max(100.0 * AU);
                    let d = arrival_distance(star, &config);
                    assert!(d >= min && d <= max, "{} arrives at {d}", star.name);
                }
            }
        }
    }

    #[test]
    fn test_target_body_picks_its_star() {
        let system = sol();
        let planet_path = system.path.with_body(PLANET.0);
        assert_eq!(arrival_primary(&system, &planet_path).unwrap().id, SystemBodyId(0));
        assert_eq!(arrival_primary(&system, &system.path).unwrap().id, SystemBodyId(0));

        for seed in 0..8 {
            let binary = generated(seed, STAR_MIXES[1]);
            let second = binary.stars().nth(1).unwrap();
            let target = second
                .children
                .first()
                .map_or(second.path, |c| binary.path.with_body(c.0));
            assert_eq!(arrival_primary(&binary, &target).unwrap().id, second.id);
            // no target: the leftmost star
            assert_eq!(arrival_primary(&binary, &binary.path).unwrap().name, "Tau A");
        }
    }

    #[test]
    fn test_arrival_geometry() {
        let space = Space::new(Arc::new(sol()), SpaceConfig::default(), &SmoothTerrainSource, 0.0);
        let config = HyperspaceConfig::default();
        let source = Vector3::new(3.0, -2.0, 1.0);
        let dest = Vector3::new(-1.0, 4.0, 2.5);
        let dir = (dest - source).normalize();

        for seed in 0..32 {
            let mut rng = Random::from_seed(seed);
            let arrival = compute_arrival(
                space.system(),
                space.frames(),
                &SystemPath::system(0, 0, 0, 0),
                &source,
                &dest,
                &mut rng,
                &config,
            )
            .unwrap();

            assert_eq!(arrival.frame, space.frames().root_id());
            let r = arrival.position.norm();
            assert!(r >= 0.95 * arrival.distance && r <= 1.2 * arrival.distance);
            assert_relative_eq!(arrival.position.dot(&dir), 0.0, epsilon = 1e-6 * r);

            let sun = space.system().primary_star().unwrap();
            let circular = (sun.gm() / r).sqrt();
            assert_relative_eq!(arrival.velocity.norm(), circular, max_relative = 1e-12);
            assert_relative_eq!(arrival.velocity.normalize(), dir, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_jump_in_place_still_arrives() {
        let space = Space::new(Arc::new(sol()), SpaceConfig::default(), &SmoothTerrainSource, 0.0);
        let here = Vector3::new(1.0, 1.0, 1.0);
        let arrival = space
            .hyperspace_exit(&space.system().path, &here, &here, &mut Random::from_seed(1))
            .unwrap();
        assert_relative_eq!(arrival.velocity.normalize(), Vector3::z(), epsilon = 1e-12);
        assert!(arrival.position.norm() > 0.0);
    }
}
