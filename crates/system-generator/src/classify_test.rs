mod tests {
    use approx::assert_abs_diff_eq;
    use seeded_random::Random;
    use star_system::{BodyType, SystemBody, SystemBodyId};
    use units::{Fixed, AU, SOLAR_RADIUS_M};

    use crate::classify::{MassClassifier, PlanetClassifier, StellarHeating};

    fn sun_at_one_au() -> StellarHeating {
        StellarHeating {
            star_radius_m: SOLAR_RADIUS_M,
            star_temp: 5778,
            mean_distance_m: AU,
        }
    }

    fn classified(mass: Fixed) -> SystemBody {
        let mut body = SystemBody::new(SystemBodyId(0), "Test", BodyType::PlanetTerrestrial);
        body.mass = mass;
        let mut rng = Random::new(&[1]);
        MassClassifier.classify(&mut body, &sun_at_one_au(), &mut rng);
        body
    }

    #[test]
    fn test_equilibrium_temperature_at_one_au() {
        let heating = sun_at_one_au();
        assert_abs_diff_eq!(heating.equilibrium_temp(0.0) as f64, 279.0, epsilon = 2.0);
        assert!(heating.equilibrium_temp(0.3) < heating.equilibrium_temp(0.0));
    }

    #[test]
    fn test_zero_distance_returns_star_temperature() {
        let heating = StellarHeating {
            mean_distance_m: 0.0,
            ..sun_at_one_au()
        };
        assert_eq!(heating.equilibrium_temp(0.0), 5778);
    }

    #[test]
    fn test_mass_thresholds() {
        assert_eq!(classified(Fixed::from_int(300)).body_type, BodyType::PlanetGasGiant);
        assert_eq!(classified(Fixed::ONE).body_type, BodyType::PlanetTerrestrial);
        assert_eq!(classified(Fixed::from_int(6)).body_type, BodyType::PlanetTerrestrial);
        assert_eq!(
            classified(Fixed::ratio(1, 100_000)).body_type,
            BodyType::PlanetAsteroid
        );
    }

    #[test]
    fn test_radius_follows_mass_with_floor() {
        let earth = classified(Fixed::ONE);
        assert_abs_diff_eq!(earth.radius.to_f64(), 1.0, epsilon = 1e-6);

        let eight = classified(Fixed::from_int(8));
        assert_abs_diff_eq!(eight.radius.to_f64(), 2.0, epsilon = 1e-6);

        let dust = classified(Fixed::ZERO);
        assert_eq!(dust.radius, MassClassifier::MIN_RADIUS);
    }

    #[test]
    fn test_classifier_sets_temperature() {
        let body = classified(Fixed::ONE);
        assert_eq!(body.average_temp, sun_at_one_au().equilibrium_temp(0.0));
    }
}
