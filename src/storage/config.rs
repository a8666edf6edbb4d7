//! Application configuration loaded from TOML.

use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default vision API endpoint.
const DEFAULT_API_URL: &str = "https://api.wastelens.app/v1";

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Vision classification API base URL
    pub api_base_url: String,
    /// API key for the classification service
    pub api_key: String,
    /// Path to the SQLite database; resolved from the platform data
    /// dir when absent
    pub database_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            api_key: String::new(),
            database_path: None,
        }
    }
}

impl AppConfig {
    /// Load config from the platform config dir, falling back to
    /// defaults when the file does not exist.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::config_file() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load config from a specific TOML file.
    pub fn load_from(path: &PathBuf) -> Result<Self, ConfigError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Save config to the platform config dir.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::config_file().ok_or(ConfigError::NoConfigDir)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::Io(e.to_string()))?;
        }
        let contents =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))?;
        std::fs::write(&path, contents).map_err(|e| ConfigError::Io(e.to_string()))
    }

    /// Resolved database path: explicit config value or the platform
    /// data dir.
    pub fn resolved_database_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(path) = &self.database_path {
            return Ok(path.clone());
        }
        let dirs = project_dirs().ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.data_dir().join("wastelens.db"))
    }

    fn config_file() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("app", "WasteLens", "wastelens")
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("config parse error: {0}")]
    Parse(String),

    #[error("no platform config directory available")]
    NoConfigDir,
}
