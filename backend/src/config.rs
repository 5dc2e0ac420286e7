//! # Configuration
//!
//! Settings are read from an optional YAML file and then overridden by
//! environment variables:
//!
//! - `SLEEP_TRACKER_CONFIG`: path to the YAML file
//! - `SLEEP_TRACKER_BIND`: listen address
//! - `OPENAI_API_KEY`, `OPENAI_BASE_URL`, `OPENAI_MODEL`: completion service

use anyhow::{bail, Context, Result};
use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing::info;

pub const CONFIG_PATH_VAR: &str = "SLEEP_TRACKER_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub prediction: PredictionConfig,
    /// Default `tracing` filter when `RUST_LOG` is not set
    pub log_level: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_address: SocketAddr,
    /// Origin allowed to call the API from a browser
    pub cors_origin: String,
    /// Client build served for any non-API path
    pub static_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictionConfig {
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
    /// A stored prediction younger than this is reused
    pub cache_minutes: i64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            prediction: PredictionConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([127, 0, 0, 1], 3000)),
            cors_origin: "http://localhost:8080".to_string(),
            static_dir: None,
        }
    }
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o".to_string(),
            api_key: None,
            timeout_secs: 30,
            cache_minutes: 30,
        }
    }
}

impl PredictionConfig {
    /// The API key, treating a blank value as absent
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|key| !key.trim().is_empty())
    }

    /// How long a stored prediction is reused
    pub fn cache_window(&self) -> Result<Duration> {
        if self.cache_minutes < 0 {
            bail!("prediction.cache_minutes cannot be negative: {}", self.cache_minutes);
        }
        Duration::try_minutes(self.cache_minutes)
            .with_context(|| format!("prediction.cache_minutes out of range: {}", self.cache_minutes))
    }
}

impl AppConfig {
    /// Load from `SLEEP_TRACKER_CONFIG` (if set) and apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = match std::env::var_os(CONFIG_PATH_VAR) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Self::default(),
        };

        config.apply_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        info!("Loading configuration from {}", path.display());

        let yaml_content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        serde_yaml::from_str(&yaml_content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Apply overrides from a variable lookup (the process environment in production)
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(bind) = lookup("SLEEP_TRACKER_BIND") {
            self.server.bind_address = bind
                .parse()
                .with_context(|| format!("Invalid SLEEP_TRACKER_BIND address: {}", bind))?;
        }
        if let Some(api_key) = lookup("OPENAI_API_KEY") {
            self.prediction.api_key = Some(api_key);
        }
        if let Some(base_url) = lookup("OPENAI_BASE_URL") {
            self.prediction.base_url = base_url;
        }
        if let Some(model) = lookup("OPENAI_MODEL") {
            self.prediction.model = model;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.bind_address.to_string(), "127.0.0.1:3000");
        assert_eq!(config.server.cors_origin, "http://localhost:8080");
        assert_eq!(config.prediction.cache_minutes, 30);
        assert_eq!(config.prediction.timeout_secs, 30);
        assert!(config.prediction.api_key.is_none());
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "server:\n  bind_address: \"0.0.0.0:4000\"\nprediction:\n  model: gpt-4o-mini\n  cache_minutes: 10\n"
        )
        .unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.server.bind_address.to_string(), "0.0.0.0:4000");
        assert_eq!(config.server.cors_origin, "http://localhost:8080");
        assert_eq!(config.prediction.model, "gpt-4o-mini");
        assert_eq!(config.prediction.cache_minutes, 10);
        assert_eq!(config.prediction.timeout_secs, 30);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(AppConfig::from_file(&dir.path().join("absent.yaml")).is_err());
    }

    #[test]
    fn test_environment_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("SLEEP_TRACKER_BIND", "127.0.0.1:5000"),
            ("OPENAI_API_KEY", "sk-test"),
            ("OPENAI_MODEL", "local-model"),
        ]);

        let mut config = AppConfig::default();
        config
            .apply_overrides(|name| vars.get(name).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.server.bind_address.port(), 5000);
        assert_eq!(config.prediction.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.prediction.model, "local-model");
        assert_eq!(config.prediction.base_url, "https://api.openai.com/v1");
    }

    #[test]
    fn test_blank_api_key_counts_as_absent() {
        let mut prediction = PredictionConfig::default();
        assert!(prediction.api_key().is_none());

        prediction.api_key = Some("   ".to_string());
        assert!(prediction.api_key().is_none());

        prediction.api_key = Some("sk-test".to_string());
        assert_eq!(prediction.api_key(), Some("sk-test"));
    }

    #[test]
    fn test_cache_window_bounds() {
        let mut prediction = PredictionConfig::default();
        assert_eq!(prediction.cache_window().unwrap(), Duration::minutes(30));

        prediction.cache_minutes = 0;
        assert_eq!(prediction.cache_window().unwrap(), Duration::zero());

        prediction.cache_minutes = -5;
        assert!(prediction.cache_window().is_err());

        prediction.cache_minutes = i64::MAX;
        assert!(prediction.cache_window().is_err());
    }

    #[test]
    fn test_invalid_bind_override() {
        let mut config = AppConfig::default();
        let result = config.apply_overrides(|name| {
            (name == "SLEEP_TRACKER_BIND").then(|| "not-an-address".to_string())
        });
        assert!(result.is_err());
    }
}
