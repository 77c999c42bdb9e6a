//! Configuration for the terminal

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::TerminalError;

/// Terminal configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Columns
    pub width: usize,
    /// Rows
    pub height: usize,
    /// Cursor shown at start-up
    pub cursor_visible: bool,
    /// Cursor blinks
    pub cursor_blinks: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 80,
            height: 40,
            cursor_visible: true,
            cursor_blinks: false,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from the default location or return the default
    pub fn load_or_default() -> Self {
        let Some(path) = default_config_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring config file");
                Self::default()
            }
        }
    }

    /// Check the geometry fits a screen buffer
    pub fn validate(&self) -> Result<(), TerminalError> {
        crate::core::ScreenBuffer::new(self.width, self.height).map(|_| ())
    }
}

/// `$HOME/.config/vt100-term/config.json`
fn default_config_path() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(|home| {
        PathBuf::from(home)
            .join(".config")
            .join("vt100-term")
            .join("config.json")
    })
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid geometry: {0}")]
    Terminal(#[from] TerminalError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.width, 80);
        assert_eq!(config.height, 40);
        assert!(config.cursor_visible);
        assert!(!config.cursor_blinks);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_save_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let config = Config {
            width: 40,
            height: 12,
            cursor_visible: false,
            cursor_blinks: true,
        };
        config.save(&path).unwrap();
        assert_eq!(Config::load(&path).unwrap(), config);
    }

    #[test]
    fn test_config_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "width": 32 }"#).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.width, 32);
        assert_eq!(config.height, 40);
    }

    #[test]
    fn test_config_rejects_oversize() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "width": 200, "height": 200 }"#).unwrap();

        assert!(matches!(
            Config::load(&path),
            Err(ConfigError::Terminal(TerminalError::CapacityExceeded { .. }))
        ));
    }

    #[test]
    fn test_config_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Config::load(&dir.path().join("missing.json")),
            Err(ConfigError::Io(_))
        ));
    }
}
