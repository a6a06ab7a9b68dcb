use std::fmt;

use system_generator::GeneratorError;

/// Failures loading a [`GalaxyConfig`](crate::GalaxyConfig).
#[derive(Debug)]
pub enum GalaxyError {
    Io(std::io::Error),
    Config(toml::de::Error),
    Generator(GeneratorError),
}

impl fmt::Display for GalaxyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GalaxyError::Io(e) => write!(f, "failed to read galaxy config: {}", e),
            GalaxyError::Config(e) => write!(f, "invalid galaxy config: {}", e),
            GalaxyError::Generator(e) => write!(f, "generator error: {}", e),
        }
    }
}

impl std::error::Error for GalaxyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GalaxyError::Io(e) => Some(e),
            GalaxyError::Config(e) => Some(e),
            GalaxyError::Generator(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for GalaxyError {
    fn from(e: std::io::Error) -> Self {
        GalaxyError::Io(e)
    }
}

impl From<toml::de::Error> for GalaxyError {
    fn from(e: toml::de::Error) -> Self {
        GalaxyError::Config(e)
    }
}

impl From<GeneratorError> for GalaxyError {
    fn from(e: GeneratorError) -> Self {
        GalaxyError::Generator(e)
    }
}

pub type Result<T> = std::result::Result<T, GalaxyError>;
