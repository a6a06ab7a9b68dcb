//! Galaxy configuration.
//!
//! ```toml
//! universe_seed = 7
//! sector_radius = 3
//!
//! [generator]
//! min_separation = 1.4
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use system_generator::{GeneratorConfig, DEFAULT_UNIVERSE_SEED};

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalaxyConfig {
    /// Seed for sector contents. Overrides `generator.universe_seed` so both
    /// levels of generation agree.
    pub universe_seed: u32,
    /// Active window for the sector cache, in sectors. Entries further than
    /// three times this are evicted on refresh.
    pub sector_radius: i32,
    /// Active window for the generated-system cache, in sectors.
    pub system_radius: i32,
    pub min_systems: i32,
    pub max_systems: i32,
    pub generator: GeneratorConfig,
}

impl Default for GalaxyConfig {
    fn default() -> Self {
        Self {
            universe_seed: DEFAULT_UNIVERSE_SEED,
            sector_radius: 2,
            system_radius: 0,
            min_systems: 4,
            max_systems: 20,
            generator: GeneratorConfig::default(),
        }
    }
}

impl GalaxyConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Replaces the nested generator settings with a separate generator TOML
    /// file.
    pub fn with_generator_file(self, path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            generator: GeneratorConfig::load(path)?,
            ..self
        })
    }

    /// The generator configuration with this galaxy's universe seed applied.
    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig {
            universe_seed: self.universe_seed,
            ..self.generator.clone()
        }
    }
}
