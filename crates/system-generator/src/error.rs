//! Error types for generator configuration.

use std::fmt;

/// Failures loading a [`GeneratorConfig`](crate::GeneratorConfig).
///
/// Generation itself cannot fail: invariant violations panic, overflow is
/// clamped.
#[derive(Debug)]
pub enum GeneratorError {
    /// The configuration file could not be read.
    Io(std::io::Error),
    /// The configuration file is not valid TOML for the config schema.
    Config(toml::de::Error),
}

impl fmt::Display for GeneratorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeneratorError::Io(e) => write!(f, "failed to read generator config: {}", e),
            GeneratorError::Config(e) => write!(f, "invalid generator config: {}", e),
        }
    }
}

impl std::error::Error for GeneratorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GeneratorError::Io(e) => Some(e),
            GeneratorError::Config(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for GeneratorError {
    fn from(e: std::io::Error) -> Self {
        GeneratorError::Io(e)
    }
}

impl From<toml::de::Error> for GeneratorError {
    fn from(e: toml::de::Error) -> Self {
        GeneratorError::Config(e)
    }
}

/// Convenience alias: a `Result` using `GeneratorError` as the error type.
pub type Result<T> = std::result::Result<T, GeneratorError>;
