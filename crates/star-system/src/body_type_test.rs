use crate::body_type::{BodyType, SuperType, STAR_TYPES};

#[test]
fn test_super_types() {
    assert_eq!(BodyType::Gravpoint.super_type(), SuperType::None);
    assert_eq!(BodyType::StarG.super_type(), SuperType::Star);
    assert_eq!(BodyType::WhiteDwarf.super_type(), SuperType::Star);
    assert_eq!(BodyType::PlanetGasGiant.super_type(), SuperType::GasGiant);
    assert_eq!(BodyType::PlanetAsteroid.super_type(), SuperType::RockyPlanet);
    assert_eq!(BodyType::StarportSurface.super_type(), SuperType::Starport);
}

#[test]
fn test_solar_units_cover_stars_and_gravpoints() {
    assert!(BodyType::Gravpoint.uses_solar_units());
    assert!(BodyType::StarO.uses_solar_units());
    assert!(!BodyType::PlanetTerrestrial.uses_solar_units());
    assert!(!BodyType::StarportOrbital.uses_solar_units());
}

#[test]
fn test_star_table_ranges_are_ordered() {
    for star in STAR_TYPES {
        let info = star.star_info().unwrap();
        assert!(info.mass.0 <= info.mass.1, "{star}");
        assert!(info.radius.0 <= info.radius.1, "{star}");
        assert!(info.temp.0 <= info.temp.1, "{star}");
    }
    assert!(BodyType::PlanetGasGiant.star_info().is_none());
}

#[test]
fn test_star_index_round_trips_through_table() {
    for (i, star) in STAR_TYPES.iter().enumerate() {
        assert_eq!(star.star_index(), Some(i));
        assert_eq!(BodyType::star_from_index(i), *star);
    }
    assert_eq!(BodyType::star_from_index(99), BodyType::StarO);
    assert_eq!(BodyType::Gravpoint.star_index(), None);
}

#[test]
fn test_only_hot_stars_are_oblate() {
    assert!(BodyType::StarF.is_oblate());
    assert!(BodyType::StarO.is_oblate());
    assert!(!BodyType::StarG.is_oblate());
    assert!(!BodyType::BrownDwarf.is_oblate());
}
