mod tests {
    use approx::assert_relative_eq;
    use seeded_random::Random;
    use star_system::{BodyType, StarSystem, SystemPath};
    use units::{Fixed, AU_EARTH_RADIUS, AU_SOL_RADIUS};

    use crate::config::GeneratorConfig;
    use crate::disc::{mass_from_area, AccretionDisc};

    #[test]
    fn test_whole_disc_is_a_third_of_max_squared() {
        let max = Fixed::from_int(30);
        let total = mass_from_area(Fixed::ZERO, max, max);
        assert_relative_eq!(total.to_f64(), 300.0, max_relative = 1e-6);
    }

    #[test]
    fn test_outer_bound_is_clamped() {
        let max = Fixed::from_int(10);
        let a = Fixed::from_int(2);
        assert_eq!(
            mass_from_area(a, Fixed::from_int(40), max),
            mass_from_area(a, max, max)
        );
    }

    #[test]
    fn test_mass_is_monotonic_in_outer_radius() {
        let max = Fixed::from_int(50);
        for a in [Fixed::ZERO, Fixed::ratio(1, 3), Fixed::from_int(5), Fixed::from_int(49)] {
            let mut previous = Fixed::ZERO;
            for step in 0..=64 {
                let b = a + (max - a) * Fixed::ratio(step, 64);
                let mass = mass_from_area(a, b, max);
                assert!(mass >= Fixed::ZERO, "negative mass at a={a} b={b}");
                assert!(mass >= previous, "mass decreased at a={a} b={b}");
                previous = mass;
            }
        }
    }

    #[test]
    #[should_panic(expected = "inverted disc bounds")]
    fn test_inverted_bounds_panic() {
        mass_from_area(Fixed::from_int(5), Fixed::from_int(2), Fixed::from_int(10));
    }

    #[test]
    fn test_density_spreads_requested_fraction() {
        let min = Fixed::ratio(1, 10);
        let max = Fixed::from_int(40);
        let mass = Fixed::from_int(332_998);
        let fraction = Fixed::ratio(2, 100);
        let density = AccretionDisc::density_for(mass, min, max, fraction);
        let recovered = density * mass_from_area(min, max, max);
        assert_relative_eq!(recovered.to_f64(), 332_998.0 * 0.02, max_relative = 1e-4);
    }

    #[test]
    fn test_accretable_mass_is_monotonic() {
        let disc = AccretionDisc {
            min: Fixed::ratio(1, 10),
            max: Fixed::from_int(20),
            density: Fixed::from_int(3),
        };
        let inner = Fixed::from_int(1);
        let mut previous = Fixed::ZERO;
        for step in 0..=40 {
            let outer = inner + Fixed::ratio(step, 2);
            let mass = disc.accretable_mass(inner, outer, Fixed::ONE).unwrap();
            assert!(mass >= previous);
            previous = mass;
        }
        // past the edge nothing more accretes
        assert_eq!(
            disc.accretable_mass(inner, Fixed::from_int(100), Fixed::ONE),
            disc.accretable_mass(inner, Fixed::from_int(20), Fixed::ONE)
        );
    }

    #[test]
    fn test_accretable_mass_scales_with_share() {
        let disc = AccretionDisc {
            min: Fixed::ratio(1, 10),
            max: Fixed::from_int(20),
            density: Fixed::from_int(3),
        };
        let (inner, outer) = (Fixed::from_int(2), Fixed::from_int(5));
        let full = disc.accretable_mass(inner, outer, Fixed::ONE).unwrap();
        let half = disc.accretable_mass(inner, outer, Fixed::ratio(1, 2)).unwrap();
        assert_relative_eq!(half.to_f64(), full.to_f64() / 2.0, max_relative = 1e-6);
        assert_eq!(disc.accretable_mass(inner, outer, Fixed::ZERO), Some(Fixed::ZERO));
    }

    #[test]
    fn test_accretable_mass_overflow_is_none() {
        let disc = AccretionDisc {
            min: Fixed::ZERO,
            max: Fixed::from_int(20),
            density: Fixed::from_int(100_000_000),
        };
        let whole = disc.accretable_mass(Fixed::ZERO, Fixed::from_int(20), Fixed::ONE);
        assert_eq!(whole, None);
    }

    fn single_star() -> (StarSystem, star_system::SystemBodyId) {
        let mut system = StarSystem::new(SystemPath::system(0, 0, 0, 0), "Disc", 1);
        let star = system.new_body("Disc", BodyType::StarG);
        {
            let body = system.body_mut(star).unwrap();
            body.mass = Fixed::ONE;
            body.radius = Fixed::ONE;
        }
        system.set_root(star);
        (system, star)
    }

    #[test]
    fn test_star_disc_bounds() {
        let (system, star) = single_star();
        let config = GeneratorConfig::default();
        for seed in 0..32 {
            let mut rng = Random::new(&[seed]);
            let disc = AccretionDisc::around(&system, star, 1, &config, &mut rng);
            assert_eq!(disc.min, 4 * AU_SOL_RADIUS);
            assert!(disc.max >= Fixed::ZERO && disc.max < Fixed::from_int(100));
            assert!(disc.density >= Fixed::ZERO);
        }
    }

    #[test]
    fn test_companion_star_disc_is_clamped() {
        let (mut system, star) = single_star();
        let root = system.new_body("Disc A,B", BodyType::Gravpoint);
        system.attach(root, star);
        system.set_root(root);
        system.body_mut(star).unwrap().orb_min = Fixed::ratio(1, 2);

        let config = GeneratorConfig::default();
        let mut rng = Random::new(&[3]);
        let disc = AccretionDisc::around(&system, star, 2, &config, &mut rng);
        assert!(disc.max <= Fixed::ratio(1, 20));
    }

    #[test]
    fn test_moon_disc_uses_planet_radius_and_hill() {
        let (mut system, star) = single_star();
        let planet = system.new_body("Disc a", BodyType::PlanetTerrestrial);
        {
            let body = system.body_mut(planet).unwrap();
            body.mass = Fixed::ONE;
            body.radius = Fixed::ONE;
            body.semi_major_axis = Fixed::ONE;
        }
        system.attach(star, planet);

        let config = GeneratorConfig::default();
        let mut rng = Random::new(&[9]);
        let disc = AccretionDisc::around(&system, planet, 1, &config, &mut rng);
        assert_eq!(disc.min, 4 * AU_EARTH_RADIUS);

        let hill = system.hill_radius(planet).to_au();
        assert!(disc.max.to_f64() <= 0.5 * hill + 1e-9);
        assert!(disc.max > disc.min);
    }
}
