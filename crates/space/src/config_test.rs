use crate::config::{HyperspaceConfig, PlacementConfig, SpaceConfig};
use crate::error::SpaceError;

#[test]
fn test_defaults() {
    let config = SpaceConfig::default();
    assert_eq!(config.restitution, 0.35);
    assert_eq!(config.placement.max_attempts, 200);
    assert_eq!(config.hyperspace.max_orbit_velocity, 100_000.0);
    assert_eq!(config.hyperspace.min_radius_factor, 1.1);
    assert_eq!(config.hyperspace.max_distance_au, 100.0);
    assert_eq!(
        (config.hyperspace.scatter_min, config.hyperspace.scatter_max),
        (0.95, 1.2)
    );
}

#[test]
fn test_partial_toml() {
    let config = SpaceConfig::from_toml_str(
        r#"
        restitution = 0.8

        [placement]
        max_attempts = 10
        "#,
    )
    .unwrap();

    assert_eq!(config.restitution, 0.8);
    assert_eq!(config.placement.max_attempts, 10);
    assert_eq!(config.placement.sample_delta, PlacementConfig::default().sample_delta);
    assert_eq!(config.hyperspace, HyperspaceConfig::default());
}

#[test]
fn test_wrong_type_is_config_error() {
    let err = SpaceConfig::from_toml_str("restitution = \"bouncy\"").unwrap_err();
    assert!(matches!(err, SpaceError::Config(_)));
    assert!(err.to_string().starts_with("invalid space config"));
}
