//! Application configuration management.
//!
//! This module handles loading and saving the application configuration,
//! which includes the API host, the delete mode, the UI theme, and the last
//! used username.
//!
//! Configuration is stored at `~/.config/placemat/config.json`.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::api::DEFAULT_BASE_URL;

/// Application name used for config/log directory paths
const APP_NAME: &str = "placemat";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// What a removal does beyond the cache.
///
/// The choice lives in configuration, not code: `local` is the optimistic
/// client-only delete, `remote` issues the real DELETE before the cache
/// commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DeleteMode {
    #[default]
    Local,
    Remote,
}

/// UI color palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggle(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Theme::Dark => "Dark",
            Theme::Light => "Light",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API host the post collection is fetched from.
    pub base_url: String,
    /// Whether removals call the real DELETE endpoint.
    pub delete_mode: DeleteMode,
    pub theme: Theme,
    /// Restores the session at startup when the keychain still holds
    /// credentials for this user.
    pub last_username: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            delete_mode: DeleteMode::default(),
            theme: Theme::default(),
            last_username: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            Ok(serde_json::from_str(&contents)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir =
            dirs::config_dir().ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Directory for log files
    pub fn log_dir() -> Result<PathBuf> {
        let cache_dir =
            dirs::cache_dir().ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME).join("logs"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.delete_mode, DeleteMode::Local);
        assert_eq!(config.theme, Theme::Dark);
        assert!(config.last_username.is_none());
    }

    #[test]
    fn test_parse_partial_config() {
        let json = r#"{"delete_mode": "remote", "theme": "light"}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.delete_mode, DeleteMode::Remote);
        assert_eq!(config.theme, Theme::Light);
        // Unspecified fields keep their defaults.
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_theme_toggle_round_trip() {
        assert_eq!(Theme::Dark.toggle(), Theme::Light);
        assert_eq!(Theme::Light.toggle().toggle(), Theme::Light);
    }
}
