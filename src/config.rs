//! FitCal configuration.
//!
//! Loaded from `~/.fitcal/config.toml`. Every key is optional; a missing
//! file means defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::coaching::Preset;

/// Errors loading the config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config at {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("log-level is empty in {}", .path.display())]
    EmptyLogLevel { path: PathBuf },
}

/// FitCal configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    /// Scoring preset used when `--preset` is not given.
    pub preset: Preset,

    /// Default tracing filter, overridden by `FITCAL_LOG`.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            preset: Preset::default(),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load config from `~/.fitcal/config.toml`, falling back to defaults
    /// when there is no home directory or no file.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        if config.log_level.trim().is_empty() {
            return Err(ConfigError::EmptyLogLevel {
                path: path.to_path_buf(),
            });
        }

        Ok(config)
    }

    /// The config directory: `~/.fitcal/`.
    pub fn dir() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".fitcal"))
    }

    /// The config file path: `~/.fitcal/config.toml`.
    pub fn path() -> Option<PathBuf> {
        Self::dir().map(|d| d.join("config.toml"))
    }

    /// Where the TUI writes its log: `~/.fitcal/fitcal.log`.
    pub fn log_path() -> Option<PathBuf> {
        Self::dir().map(|d| d.join("fitcal.log"))
    }
}
