//! Configuration management for smudge.
//!
//! Configuration is loaded from a TOML file at a platform-appropriate
//! location with sensible defaults; the CLI overrides individual fields
//! from flags afterwards and re-validates.

mod types;
mod validate;

pub use types::*;

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure for smudge.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Input/output roots
    pub io: IoConfig,

    /// Producer/consumer pool sizes
    pub processing: ProcessingConfig,

    /// Bounded queue settings
    pub queue: QueueConfig,

    /// Box-blur filter settings
    pub filter: FilterConfig,

    /// Transient I/O retry settings
    pub retry: RetryConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path.
    ///
    /// Uses platform-appropriate directories, falling back to
    /// `~/.smudge/config.toml` if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "smudge", "smudge")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".smudge").join("config.toml")
            })
    }

    /// Resolved input root (with ~ expansion).
    pub fn input_root(&self) -> PathBuf {
        let expanded = shellexpand::tilde(&self.io.input_root);
        PathBuf::from(expanded.into_owned())
    }

    /// Resolved output root (with ~ expansion).
    pub fn output_root(&self) -> PathBuf {
        let expanded = shellexpand::tilde(&self.io.output_root);
        PathBuf::from(expanded.into_owned())
    }

    /// Serialize the config to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
}
