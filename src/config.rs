/// Configuration Module
///
/// Loads user configuration from the platform config directory
/// (`rosterdb/config.toml`). A missing or malformed file is never fatal:
/// the defaults apply and a diagnostic is logged.

use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, warn};

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Database file path; when unset the per-user data path is used
    pub path: Option<PathBuf>,
    /// Busy-timeout in milliseconds applied when a session connects
    pub busy_timeout_ms: u64,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    /// Include the created-at column in roster listings
    pub show_timestamps: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            database: DatabaseConfig::default(),
            display: DisplayConfig::default(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        DatabaseConfig {
            path: None,
            busy_timeout_ms: 5_000,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            show_timestamps: true,
        }
    }
}

/// Path of the user config file, if a config directory exists on this
/// platform.
pub fn config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("rosterdb").join("config.toml"))
}

/// Default database location under the per-user data directory.
pub fn default_database_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("rosterdb").join("roster.db"))
}

/// Loads the configuration, falling back to [`Config::default`] when the
/// file is absent, unreadable, or fails to parse.
pub fn load_config() -> Config {
    let path = match config_file_path() {
        Some(path) => path,
        None => return Config::default(),
    };
    if !path.exists() {
        debug!("no config file at {}, using defaults", path.display());
        return Config::default();
    }
    match fs::read_to_string(&path) {
        Ok(contents) => match toml::from_str::<Config>(&contents) {
            Ok(config) => {
                debug!("loaded config from {}", path.display());
                config
            }
            Err(e) => {
                warn!("failed to parse {}: {}; using defaults", path.display(), e);
                Config::default()
            }
        },
        Err(e) => {
            warn!("failed to read {}: {}; using defaults", path.display(), e);
            Config::default()
        }
    }
}
