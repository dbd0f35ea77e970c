//! Configuration Loader
//!
//! Handles loading and merging client settings from multiple sources.

use crate::config::settings::{ClientSettings, SettingsOverlay};
use crate::error::{RequestError, Result};
use std::path::{Path, PathBuf};

/// Environment variable pointing at an explicit config file
pub const CONFIG_PATH_ENV: &str = "MINIAPP_CONFIG_PATH";

/// Environment variable overriding the base URL
pub const BASE_URL_ENV: &str = "MINIAPP_BASE_URL";

/// Environment variable overriding the default timeout (milliseconds)
pub const TIMEOUT_ENV: &str = "MINIAPP_TIMEOUT_MS";

/// Configuration loader with support for multiple sources
pub struct ConfigLoader {
    settings: ClientSettings,
}

impl ConfigLoader {
    /// Create a new config loader and load from default locations
    pub fn new() -> Result<Self> {
        // Load .env file if present
        let _ = dotenvy::dotenv();

        let mut loader = Self {
            settings: ClientSettings::default(),
        };

        loader.load_from_default_paths()?;
        loader.load_from_env()?;

        Ok(loader)
    }

    /// Create a loader with a specific config file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let mut loader = Self {
            settings: ClientSettings::default(),
        };

        loader.load_from_file(path)?;

        Ok(loader)
    }

    /// Load configuration from default paths
    fn load_from_default_paths(&mut self) -> Result<()> {
        for path in Self::get_config_paths() {
            if path.exists() {
                tracing::debug!(path = %path.display(), "loading client config");
                self.load_from_file(&path)?;
            }
        }

        Ok(())
    }

    /// Get list of config paths to check, lowest precedence first
    fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. User config directory
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("miniapp").join("config.json"));
        }

        // 2. Current directory
        paths.push(PathBuf::from("miniapp.json"));

        // 3. Environment variable
        if let Ok(custom_path) = std::env::var(CONFIG_PATH_ENV) {
            paths.push(PathBuf::from(custom_path));
        }

        paths
    }

    /// Load configuration from a specific file
    fn load_from_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            RequestError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let overlay: SettingsOverlay = serde_json::from_str(&content).map_err(|e| {
            RequestError::Config(format!("Failed to parse {}: {}", path.display(), e))
        })?;

        self.settings.apply(overlay);
        Ok(())
    }

    /// Apply `MINIAPP_*` environment overrides
    fn load_from_env(&mut self) -> Result<()> {
        let base_url = std::env::var(BASE_URL_ENV).ok();
        let timeout_ms = match std::env::var(TIMEOUT_ENV) {
            Ok(raw) => Some(raw.trim().parse::<u64>().map_err(|e| {
                RequestError::Config(format!("Invalid {} value '{}': {}", TIMEOUT_ENV, raw, e))
            })?),
            Err(_) => None,
        };

        self.settings.apply(SettingsOverlay {
            base_url,
            timeout_ms,
            ..Default::default()
        });
        Ok(())
    }

    /// Get the loaded settings
    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    /// Take ownership of the settings
    pub fn into_settings(self) -> ClientSettings {
        self.settings
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new().unwrap_or_else(|_| Self {
            settings: ClientSettings::default(),
        })
    }
}
