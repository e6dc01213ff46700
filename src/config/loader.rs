//! Configuration structures and loading logic.

use crate::config::modes::WindowStrategy;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub account: AccountConfig,

    #[serde(default)]
    pub options: OptionsConfig,
}

/// Account credentials configuration.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct AccountConfig {
    /// Arlo account email.
    #[serde(default)]
    pub email: String,

    /// Arlo account password.
    #[serde(default)]
    pub password: String,
}

impl fmt::Debug for AccountConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountConfig")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Download options configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionsConfig {
    /// How many days back from today to download.
    #[serde(default = "default_days")]
    pub days: u32,

    /// Number of concurrent download workers.
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Directory recordings are written to.
    #[serde(default = "default_output_directory")]
    pub output_directory: PathBuf,

    /// How the date range is split into library queries.
    #[serde(default)]
    pub window_strategy: WindowStrategy,
}

impl Default for OptionsConfig {
    fn default() -> Self {
        Self {
            days: default_days(),
            workers: default_workers(),
            output_directory: default_output_directory(),
            window_strategy: WindowStrategy::default(),
        }
    }
}

fn default_days() -> u32 {
    7
}

fn default_workers() -> usize {
    4
}

fn default_output_directory() -> PathBuf {
    PathBuf::from("videos")
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Config(format!(
                    "Configuration file not found: {}. Create one from config.example.toml",
                    path.display()
                ))
            } else {
                Error::Config(format!("Failed to read {}: {}", path.display(), e))
            }
        })?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Get the effective output directory.
    pub fn output_directory(&self) -> PathBuf {
        self.options.output_directory.clone()
    }
}
