//! Configuration management for flying-shuttle

pub mod env;
pub mod schema;

pub use env::{collect_public_env, public_env_from_process, PublicEnv};
pub use schema::{BuildConfig, DistLayout, ShuttleConfig};

use crate::error::{ShuttleError, ShuttleResult};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// File name looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "shuttle.toml";

/// Configuration manager
pub struct ConfigManager {
    config_path: PathBuf,
    explicit: bool,
}

impl ConfigManager {
    /// Create a config manager reading `./shuttle.toml` when present
    pub fn new() -> Self {
        Self {
            config_path: PathBuf::from(DEFAULT_CONFIG_FILE),
            explicit: false,
        }
    }

    /// Create a config manager with a custom path, which must exist
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            config_path: path,
            explicit: true,
        }
    }

    /// Load configuration, falling back to defaults for a missing default file
    pub async fn load(&self) -> ShuttleResult<ShuttleConfig> {
        if !self.config_path.exists() {
            if self.explicit {
                return Err(ShuttleError::ConfigNotFound(self.config_path.clone()));
            }
            debug!("Config file not found, using defaults");
            return Ok(ShuttleConfig::default());
        }

        self.load_from_file(&self.config_path).await
    }

    /// Load configuration from a specific file
    pub async fn load_from_file(&self, path: &Path) -> ShuttleResult<ShuttleConfig> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| ShuttleError::io(format!("reading config from {}", path.display()), e))?;

        let config = toml::from_str(&content).map_err(|e| ShuttleError::ConfigInvalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Get the config file path
    pub fn path(&self) -> &Path {
        &self.config_path
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
