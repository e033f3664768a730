//! User configuration and preferences

use crate::error::{JswpError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct UserConfig {
    /// Whether the welcome dialog has been shown
    #[serde(default)]
    pub welcome_shown: bool,
    /// Identity used when no `--user` is given
    #[serde(default)]
    pub user_id: Option<String>,
    /// Swipe commit threshold override
    #[serde(default)]
    pub swipe_threshold: Option<f64>,
    /// Ledger location override
    #[serde(default)]
    pub ledger_path: Option<PathBuf>,
}

impl UserConfig {
    /// Get the config file path (~/.config/jswp/config.json)
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("jswp").join("config.json"))
    }

    /// Default ledger location (<data dir>/jswp/swipes.jsonl)
    pub fn default_ledger_path() -> Option<PathBuf> {
        dirs::data_local_dir().map(|dir| dir.join("jswp").join("swipes.jsonl"))
    }

    /// Load config from file, or create default if doesn't exist
    pub fn load() -> Result<Self> {
        let path = Self::config_path().ok_or_else(|| {
            JswpError::ConfigError("Could not determine config directory".to_string())
        })?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|e| {
            JswpError::ConfigError(format!("Failed to read config file: {}", e))
        })?;

        serde_json::from_str(&contents).map_err(|e| {
            JswpError::ConfigError(format!("Failed to parse config file: {}", e))
        })
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path().ok_or_else(|| {
            JswpError::ConfigError("Could not determine config directory".to_string())
        })?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                JswpError::ConfigError(format!("Failed to create config directory: {}", e))
            })?;
        }

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            JswpError::ConfigError(format!("Failed to serialize config: {}", e))
        })?;

        fs::write(path, contents).map_err(|e| {
            JswpError::ConfigError(format!("Failed to write config file: {}", e))
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = UserConfig::default();
        assert!(!config.welcome_shown);
        assert!(config.user_id.is_none());
        assert!(config.swipe_threshold.is_none());
    }

    #[test]
    fn test_config_accepts_partial_file() {
        let config: UserConfig = serde_json::from_str(r#"{"welcome_shown": true}"#).unwrap();
        assert!(config.welcome_shown);
        assert!(config.ledger_path.is_none());
    }

    #[test]
    fn test_config_round_trip_on_disk() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("jswp").join("config.json");

        let config = UserConfig {
            welcome_shown: true,
            user_id: Some("alice".to_string()),
            swipe_threshold: Some(120.0),
            ledger_path: None,
        };
        config.save_to(&path).unwrap();

        assert_eq!(UserConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_load_missing_file_gives_default() {
        let temp_dir = TempDir::new().unwrap();
        let config = UserConfig::load_from(&temp_dir.path().join("missing.json")).unwrap();
        assert_eq!(config, UserConfig::default());
    }

    #[test]
    fn test_load_invalid_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(&path, "{").unwrap();

        let err = UserConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, JswpError::ConfigError(_)));
    }
}
