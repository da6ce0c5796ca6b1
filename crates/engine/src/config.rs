//! Engine configuration loaded from an optional TOML file.
//!
//! Every field has a default, so a partial file (or none at all) works:
//!
//! ```toml
//! result_limit = 5
//! like_threshold = 4.5
//!
//! [preferences]
//! Couples = ["Beaches", "Parks", "Romantic", "Spas"]
//! ```
//!
//! Preference entries replace the built-in list for that style only.

use classifier::VisitMode;
use pipeline::{DEFAULT_RESULT_LIMIT, StylePreferences};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    NotFound { path: String },

    #[error("I/O error reading config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Unknown travel style in preferences: {label}")]
    UnknownStyle { label: String },

    #[error("Invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum number of recommendations per user
    pub result_limit: usize,
    /// History rows returned alongside recommendations
    pub history_limit: usize,
    /// Minimum rating for an attraction to count as liked
    pub like_threshold: f32,
    /// Whether a user counts among their own similar users
    pub include_self: bool,
    /// Style label → preferred categories, overriding the defaults
    pub preferences: BTreeMap<String, Vec<String>>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            result_limit: DEFAULT_RESULT_LIMIT,
            history_limit: 10,
            like_threshold: 4.0,
            include_self: true,
            preferences: BTreeMap::new(),
        }
    }
}

impl EngineConfig {
    /// Read and validate a TOML config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound {
                    path: path.display().to_string(),
                }
            } else {
                ConfigError::Io(e)
            }
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.result_limit == 0 {
            return Err(ConfigError::Invalid {
                field: "result_limit",
                reason: "must be at least 1".to_string(),
            });
        }
        if !self.like_threshold.is_finite() {
            return Err(ConfigError::Invalid {
                field: "like_threshold",
                reason: format!("{} is not a number", self.like_threshold),
            });
        }
        self.style_preferences().map(|_| ())
    }

    /// Built-in preferences with this config's overrides applied
    pub fn style_preferences(&self) -> Result<StylePreferences, ConfigError> {
        let mut preferences = StylePreferences::default();
        for (label, categories) in &self.preferences {
            let mode = VisitMode::from_label(label.trim()).ok_or_else(|| ConfigError::UnknownStyle {
                label: label.clone(),
            })?;
            preferences.set(mode, categories.iter().cloned());
        }
        Ok(preferences)
    }
}
