//! Configuration model for promptbatch.
//!
//! Represents `.promptbatch/config.yaml`. Parsing is forward compatible
//! (unknown fields are ignored) and every field has a sensible default, so
//! a missing or partial file never blocks a command.

use crate::error::{PromptError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

fn default_true() -> bool {
    true
}

fn default_history_limit() -> u32 {
    20
}

/// Configuration for a prompt library.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Whether successful executions are appended to the history log.
    #[serde(default = "default_true")]
    pub record_history: bool,

    /// How many records `promptbatch history` shows by default.
    #[serde(default = "default_history_limit")]
    pub history_limit: u32,

    /// Override for the actor string recorded with executions.
    /// Defaults to `user@host` derived from the environment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actor: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            record_history: true,
            history_limit: default_history_limit(),
            actor: None,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            PromptError::UserError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = serde_yaml::from_str(&content).map_err(|e| {
            PromptError::UserError(format!(
                "failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file is absent
    /// or unreadable.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Atomically save configuration as YAML.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml = serde_yaml::to_string(self).map_err(|e| {
            PromptError::UserError(format!("failed to serialize config: {}", e))
        })?;
        crate::fs::atomic_write_file(path, &yaml)
    }

    /// Validate config values.
    pub fn validate(&self) -> Result<()> {
        if self.history_limit == 0 {
            return Err(PromptError::UserError(
                "history_limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
