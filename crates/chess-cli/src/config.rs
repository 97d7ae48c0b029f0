//! Configuration file loading for the terminal front end.
//!
//! Settings come from `chess.toml` in the current directory unless another
//! path is given. A missing default file yields the default configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::Level;

/// Errors that can occur when loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    /// The log level is not one of trace, debug, info, warn, error.
    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),
}

/// Front-end settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Directory holding saved games. Defaults to `$HOME/.master-chess`.
    #[serde(default = "default_save_dir")]
    pub save_dir: PathBuf,
    /// Maximum level of log events written to stderr.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Draw pieces with Unicode chess glyphs instead of letters.
    #[serde(default = "default_unicode")]
    pub unicode: bool,
}

fn default_save_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_default()
        .join(".master-chess")
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_unicode() -> bool {
    true
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            save_dir: default_save_dir(),
            log_level: default_log_level(),
            unicode: default_unicode(),
        }
    }
}

impl CliConfig {
    /// Loads the configuration.
    ///
    /// An explicit `path` must exist. Without one, [`Self::config_path()`] is
    /// read if present and defaults are used otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file cannot be read, or
    /// [`ConfigError::ParseError`] if it contains invalid TOML.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = Self::config_path();
                if default_path.exists() {
                    Self::from_file(&default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Returns the default configuration file path.
    pub fn config_path() -> PathBuf {
        PathBuf::from("chess.toml")
    }

    /// Parses the configured log level.
    pub fn level(&self) -> Result<Level, ConfigError> {
        Level::from_str(&self.log_level)
            .map_err(|_| ConfigError::InvalidLogLevel(self.log_level.clone()))
    }
}
