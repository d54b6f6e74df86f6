//! Конфигурация симуляции (TOML)
//!
//! ```toml
//! log_level = "info"
//!
//! [jetpack]
//! enable_anywhere = false
//! enable_in_no_gravity = true
//! ```

use bevy::prelude::*;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use crate::logger::LogLevel;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Где разрешено включать jetpack
///
/// Snapshot копируется в `JetpackController`; изменение resource →
/// `refresh_controller_config` обновляет snapshot.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct JetpackConfig {
    /// Jetpack работает на любом grid'е
    pub enable_anywhere: bool,
    /// Jetpack работает на grid'е с выключенным генератором гравитации
    pub enable_in_no_gravity: bool,
}

impl Default for JetpackConfig {
    fn default() -> Self {
        Self {
            enable_anywhere: false,
            enable_in_no_gravity: true,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub log_level: LogLevel,
    pub jetpack: JetpackConfig,
}

impl SimulationConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_toml_str(&source)
    }
}
