//! Engine settings loaded from TOML.

use std::path::Path;
use std::time::Duration;

use dreamer_core::SearchLimits;
use serde::Deserialize;
use thiserror::Error;

use crate::search::MAX_DEPTH;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid engine config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("depth must be between 1 and 32, got {0}")]
    Depth(u8),
}

/// Search settings. Every field may be omitted from the file.
///
/// ```toml
/// depth = 5
/// move_time_ms = 2000
/// ponder = true
/// resign_threshold = -900
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub depth: u8,
    pub move_time_ms: Option<u64>,
    pub ponder: bool,
    /// Resign when the best score, from the engine's side, falls below this.
    pub resign_threshold: Option<i32>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            depth: 4,
            move_time_ms: None,
            ponder: true,
            resign_threshold: None,
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_DEPTH).contains(&self.depth) {
            return Err(ConfigError::Depth(self.depth));
        }
        Ok(())
    }

    /// Fresh limits for one search.
    pub fn limits(&self) -> SearchLimits {
        match self.move_time_ms {
            Some(ms) => SearchLimits::depth_and_time(self.depth, Duration::from_millis(ms)),
            None => SearchLimits::depth(self.depth),
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
