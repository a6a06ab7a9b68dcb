//! Errors raised by configuration loading and save/load.

use std::fmt;

/// Failures surfaced by [`Space`](crate::Space) persistence and configuration.
///
/// Everything else in the runtime reports problems through `Option` and a
/// logged warning instead.
#[derive(Debug)]
pub enum SpaceError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Bincode(Box<bincode::ErrorKind>),
    Config(toml::de::Error),
    VersionMismatch { expected: u32, found: u32 },
    /// The save is structurally unusable: missing or malformed frames or
    /// bodies, or links that point nowhere.
    CorruptSave(String),
}

impl SpaceError {
    pub(crate) fn corrupt(reason: impl Into<String>) -> Self {
        SpaceError::CorruptSave(reason.into())
    }
}

impl fmt::Display for SpaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpaceError::Io(e) => write!(f, "IO error: {}", e),
            SpaceError::Json(e) => write!(f, "JSON error: {}", e),
            SpaceError::Bincode(e) => write!(f, "serialization error: {}", e),
            SpaceError::Config(e) => write!(f, "invalid space config: {}", e),
            SpaceError::VersionMismatch { expected, found } => {
                write!(
                    f,
                    "save version mismatch: expected {}, found {}",
                    expected, found
                )
            }
            SpaceError::CorruptSave(reason) => write!(f, "corrupt save: {}", reason),
        }
    }
}

impl std::error::Error for SpaceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SpaceError::Io(e) => Some(e),
            SpaceError::Json(e) => Some(e),
            SpaceError::Bincode(e) => Some(e.as_ref()),
            SpaceError::Config(e) => Some(e),
            SpaceError::VersionMismatch { .. } | SpaceError::CorruptSave(_) => None,
        }
    }
}

impl From<std::io::Error> for SpaceError {
    fn from(e: std::io::Error) -> Self {
        SpaceError::Io(e)
    }
}

impl From<serde_json::Error> for SpaceError {
    fn from(e: serde_json::Error) -> Self {
        SpaceError::Json(e)
    }
}

impl From<Box<bincode::ErrorKind>> for SpaceError {
    fn from(e: Box<bincode::ErrorKind>) -> Self {
        SpaceError::Bincode(e)
    }
}

impl From<toml::de::Error> for SpaceError {
    fn from(e: toml::de::Error) -> Self {
        SpaceError::Config(e)
    }
}

pub type Result<T> = std::result::Result<T, SpaceError>;
