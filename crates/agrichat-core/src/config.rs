//! Client configuration

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use agrichat_session::DEFAULT_STORAGE_KEY;

use crate::error::CoreError;
use crate::Result;

const API_URL_VAR: &str = "AGRICHAT_API_URL";
const DB_PATH_VAR: &str = "AGRICHAT_DB_PATH";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path to the database file
    pub database_path: PathBuf,
    /// Base URL of the inference API
    pub api_url: String,
    /// Storage key of the session collection
    pub storage_key: String,
    /// Transport timeout for one round trip
    pub request_timeout_secs: u64,
}

impl Config {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            database_path: data_dir.join("agrichat.db"),
            api_url: "http://localhost:5000".to_string(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            request_timeout_secs: 60,
        }
    }

    /// Per-user data directory, `.agrichat` when the platform has none
    pub fn data_dir() -> PathBuf {
        ProjectDirs::from("org", "AgriChat", "AgriChat")
            .map(|dirs| dirs.data_local_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from(".agrichat"))
    }

    /// Read a JSON config file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `AGRICHAT_API_URL` and `AGRICHAT_DB_PATH`
    pub fn apply_env(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(API_URL_VAR).filter(|v| !v.trim().is_empty()) {
            self.api_url = url;
        }
        if let Some(path) = lookup(DB_PATH_VAR).filter(|v| !v.trim().is_empty()) {
            self.database_path = PathBuf::from(path);
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.api_url.trim().is_empty() {
            return Err(CoreError::Config("api_url cannot be empty".to_string()));
        }
        if self.storage_key.trim().is_empty() {
            return Err(CoreError::Config("storage_key cannot be empty".to_string()));
        }
        if self.request_timeout_secs == 0 {
            return Err(CoreError::Config(
                "request_timeout_secs must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Self::data_dir())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::new(PathBuf::from("/tmp/agri"));
        assert_eq!(config.database_path, PathBuf::from("/tmp/agri/agrichat.db"));
        assert_eq!(config.api_url, "http://localhost:5000");
        assert_eq!(config.storage_key, "chatSessions");
        assert_eq!(config.request_timeout(), Duration::from_secs(60));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_database_in_data_dir() {
        let config = Config::default();
        assert_eq!(config.database_path, Config::data_dir().join("agrichat.db"));
        assert!(Config::data_dir()
            .to_string_lossy()
            .to_lowercase()
            .contains("agrichat"));
    }

    #[test]
    fn test_load_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"api_url": "http://10.0.0.5:5000/api"}"#).unwrap();

        let config = Config::load(&path).unwrap();

        assert_eq!(config.api_url, "http://10.0.0.5:5000/api");
        assert_eq!(config.request_timeout_secs, 60);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_rejects_zero_timeout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"request_timeout_secs": 0}"#).unwrap();

        assert!(matches!(Config::load(&path), Err(CoreError::Config(_))));
    }

    #[test]
    fn test_overrides() {
        let mut config = Config::new(PathBuf::from("/data"));
        config.apply_overrides(|name| match name {
            "AGRICHAT_API_URL" => Some("https://agri.example.org".to_string()),
            "AGRICHAT_DB_PATH" => Some("  ".to_string()),
            _ => None,
        });

        assert_eq!(config.api_url, "https://agri.example.org");
        assert_eq!(config.database_path, PathBuf::from("/data/agrichat.db"));
    }
}
