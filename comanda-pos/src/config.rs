//! Application configuration
//!
//! A small JSON file next to the session cache. Missing file means
//! defaults; a corrupt file is an error the caller surfaces instead of
//! silently overwriting.

use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult, ErrorCode};
use std::path::{Path, PathBuf};

fn default_server_url() -> String {
    std::env::var("COMANDA_SERVER_URL").unwrap_or_else(|_| {
        tracing::debug!("COMANDA_SERVER_URL not set, using development default");
        "http://127.0.0.1:9625".to_string()
    })
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_timeout() -> u64 {
    30
}

/// Local application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Backend base URL
    #[serde(default = "default_server_url")]
    pub server_url: String,
    /// Directory for the session cache and other local state
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            data_dir: default_data_dir(),
            timeout: default_timeout(),
        }
    }
}

impl AppConfig {
    /// Load from `path`, falling back to defaults when the file does
    /// not exist yet
    pub fn load(path: &Path) -> AppResult<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)
                .map_err(|e| AppError::with_message(ErrorCode::ConfigError, e.to_string()))?;
            serde_json::from_str(&content)
                .map_err(|e| AppError::with_message(ErrorCode::ConfigError, e.to_string()))
        } else {
            Ok(Self::default())
        }
    }

    /// Persist to `path` as pretty-printed JSON
    pub fn save(&self, path: &Path) -> AppResult<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| AppError::with_message(ErrorCode::ConfigError, e.to_string()))?;
        std::fs::write(path, content)
            .map_err(|e| AppError::with_message(ErrorCode::ConfigError, e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig::load(&dir.path().join("config.json")).unwrap();
        assert_eq!(config.timeout, 30);
        assert_eq!(config.data_dir, PathBuf::from("./data"));
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");

        let config = AppConfig {
            server_url: "http://edge.local:9625".to_string(),
            data_dir: dir.path().join("state"),
            timeout: 5,
        };
        config.save(&path).unwrap();

        let loaded = AppConfig::load(&path).unwrap();
        assert_eq!(loaded.server_url, "http://edge.local:9625");
        assert_eq!(loaded.timeout, 5);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = AppConfig::load(&path).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigError);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"server_url":"http://10.0.0.2:9625"}"#).unwrap();

        let loaded = AppConfig::load(&path).unwrap();
        assert_eq!(loaded.server_url, "http://10.0.0.2:9625");
        assert_eq!(loaded.timeout, 30);
    }
}
