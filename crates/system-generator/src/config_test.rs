use crate::config::{GeneratorConfig, DEFAULT_UNIVERSE_SEED};
use crate::error::GeneratorError;

#[test]
fn test_empty_document_is_default() {
    let config = GeneratorConfig::from_toml_str("").unwrap();
    assert_eq!(config, GeneratorConfig::default());
    assert_eq!(config.universe_seed, DEFAULT_UNIVERSE_SEED);
}

#[test]
fn test_partial_override() {
    let config = GeneratorConfig::from_toml_str(
        r#"
        universe_seed = 7
        min_separation = 1.5

        [stations]
        max_surface_ports = 2
        "#,
    )
    .unwrap();

    assert_eq!(config.universe_seed, 7);
    assert_eq!(config.min_separation, 1.5);
    assert_eq!(config.stations.max_surface_ports, 2);
    assert_eq!(config.stations.settlement_chance, 0.5);
    assert_eq!(config.safe_binary_distance, 5.0);
}

#[test]
fn test_bad_toml_is_config_error() {
    let err = GeneratorConfig::from_toml_str("universe_seed = \"nope\"").unwrap_err();
    assert!(matches!(err, GeneratorError::Config(_)));
    assert!(err.to_string().starts_with("invalid generator config"));
}

#[test]
fn test_missing_file_is_io_error() {
    let err = GeneratorConfig::load("/nonexistent/generator.toml").unwrap_err();
    assert!(matches!(err, GeneratorError::Io(_)));
}
