mod tests {
    use approx::assert_relative_eq;

    use crate::mass::{Mass, EARTH_MASS_KG, SOLAR_MASS_KG, SUN_MASS_TO_EARTH_MASS};

    #[test]
    fn test_mass_conversions() {
        let mass_sm = Mass::from_solar_masses(1.0);
        assert_relative_eq!(mass_sm.to_kg(), SOLAR_MASS_KG);

        let mass_kg = Mass::from_kg(SOLAR_MASS_KG);
        assert_relative_eq!(mass_kg.to_solar_masses(), 1.0);

        let earth = Mass::from_earth_masses(1.0);
        assert_relative_eq!(earth.to_kg(), EARTH_MASS_KG, max_relative = 1e-12);
    }

    #[test]
    fn test_earth_masses_per_sun_matches_rounded_constant() {
        let ratio = Mass::from_solar_masses(1.0).to_earth_masses();
        assert!((ratio - SUN_MASS_TO_EARTH_MASS as f64).abs() < 1.0);
    }

    #[test]
    fn test_mass_arithmetic_operations() {
        let mass1 = Mass::from_solar_masses(2.0);
        let mass2 = Mass::from_solar_masses(1.5);

        assert_relative_eq!((mass1 + mass2).to_solar_masses(), 3.5);
        assert_relative_eq!((mass1 - mass2).to_solar_masses(), 0.5);
        assert_relative_eq!((mass1 * 3.0).to_solar_masses(), 6.0);
        assert_relative_eq!((mass1 / 4.0).to_solar_masses(), 0.5);
        assert_relative_eq!(mass1 / mass2, 2.0 / 1.5);

        let mass = Mass::from_earth_masses(100.0);
        let commutative = 2.5 * mass;
        assert_relative_eq!(commutative.to_earth_masses(), 250.0, max_relative = 1e-12);
    }
}
