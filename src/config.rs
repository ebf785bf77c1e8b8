//! Configuration with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/forestry/forestry.toml`
//! 3. Environment variables: `FORESTRY_*` prefix (e.g.
//!    `FORESTRY_SOURCE_DIR`, `FORESTRY_GENERATE__HEIGHT_MAX`)

use std::path::PathBuf;

use config::{Config, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::{ApplicationError, ApplicationResult};

/// Ranges for randomized tree generation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GenerateConfig {
    /// Minimum generated height, feet (inclusive)
    pub height_min: f64,
    /// Maximum generated height, feet (exclusive)
    pub height_max: f64,
    /// Minimum generated growth rate, percent per year (inclusive)
    pub growth_rate_min: f64,
    /// Maximum generated growth rate, percent per year (exclusive)
    pub growth_rate_max: f64,
    /// Planting years fall within this many years before the current year
    pub year_offset_max: i32,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            height_min: 10.0,
            height_max: 20.0,
            growth_rate_min: 10.0,
            growth_rate_max: 20.0,
            year_offset_max: 10,
        }
    }
}

/// Application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Directory holding `<name>.csv` source files
    pub source_dir: PathBuf,
    /// Directory where `<name>.db` snapshots are written
    pub snapshot_dir: PathBuf,
    #[serde(default)]
    pub generate: GenerateConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("data"),
            snapshot_dir: PathBuf::from("."),
            generate: GenerateConfig::default(),
        }
    }
}

impl Settings {
    /// Load settings from the global config file and environment, merged
    /// over compiled defaults.
    pub fn load() -> ApplicationResult<Self> {
        let mut builder = Config::builder();

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                builder = builder.add_source(File::from(path));
            }
        }

        let cfg = builder
            .add_source(
                Environment::with_prefix("FORESTRY")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| ApplicationError::Config {
                message: e.to_string(),
            })?;

        cfg.try_deserialize()
            .map_err(|e| ApplicationError::Config {
                message: e.to_string(),
            })
    }

    /// Path of the global config file, if a home directory can be resolved.
    pub fn global_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "forestry").map(|dirs| dirs.config_dir().join("forestry.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_the_documented_bands() {
        let settings = Settings::default();
        assert_eq!(settings.source_dir, PathBuf::from("data"));
        assert_eq!(settings.snapshot_dir, PathBuf::from("."));
        assert_eq!(settings.generate.height_min, 10.0);
        assert_eq!(settings.generate.height_max, 20.0);
        assert_eq!(settings.generate.year_offset_max, 10);
    }
}
