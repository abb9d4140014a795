//! TOML-based application configuration.
//!
//! Stores user preferences that are not entity state:
//! - Display name used in greetings and encouragement
//! - Message-generation endpoint and timeout
//!
//! Configuration is stored at `~/.config/timely/config.toml`. Per-category
//! notification toggles are entity state and live in the database instead.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::error::{ConfigError, Result};

/// Message-generation collaborator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagesConfig {
    /// Base URL of the text-generation service. Empty disables remote
    /// generation; every message falls back to its deterministic text.
    #[serde(default)]
    pub endpoint: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/timely/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Display name used in greetings.
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub messages: MessagesConfig,
}

fn default_timeout_secs() -> u64 {
    5
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk, writing the default file when none exists.
    ///
    /// # Errors
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content)
                    .map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
                Ok(cfg)
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    /// Returns an error if the config cannot be serialized or written.
    pub fn save(&self) -> Result<()> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let cfg: Config = toml::from_str("").unwrap();
        assert_eq!(cfg.user_name, None);
        assert_eq!(cfg.messages.endpoint, "");
        assert_eq!(cfg.messages.timeout_secs, 5);
    }

    #[test]
    fn round_trips_through_toml() {
        let cfg = Config {
            user_name: Some("sam".to_string()),
            messages: MessagesConfig {
                endpoint: "http://localhost:9000".to_string(),
                timeout_secs: 2,
            },
        };
        let text = toml::to_string_pretty(&cfg).unwrap();
        let decoded: Config = toml::from_str(&text).unwrap();
        assert_eq!(decoded.user_name.as_deref(), Some("sam"));
        assert_eq!(decoded.messages.timeout_secs, 2);
    }
}
