use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the guide backend
    pub base_url: String,

    /// Data directory for the stored token and theme preference
    pub data_dir: PathBuf,

    /// Optional request timeout in seconds; when unset the transport
    /// default applies
    pub request_timeout: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            data_dir: default_data_dir(),
            request_timeout: None,
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("marhaba"))
        .unwrap_or_else(|| PathBuf::from("./data"))
}

impl Config {
    /// Initialize configuration from various sources
    pub async fn init() -> Result<Self> {
        debug!("Initializing configuration");

        let mut config = Self::default();

        // Load from environment variables
        config.load_from_env();

        // Try to load from configuration files
        if let Ok(file_config) = Self::load_from_file().await {
            config.merge_with(file_config);
        }

        // Ensure the data directory exists
        if !config.data_dir.exists() {
            std::fs::create_dir_all(&config.data_dir)?;
        }

        Ok(config)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(&mut self) {
        if let Ok(base_url) = std::env::var("MARHABA_BASE_URL") {
            self.base_url = base_url;
        }

        if let Ok(data_dir) = std::env::var("MARHABA_DATA_DIR") {
            self.data_dir = PathBuf::from(data_dir);
        }

        if let Ok(timeout_str) = std::env::var("MARHABA_TIMEOUT") {
            if let Ok(timeout) = timeout_str.parse() {
                self.request_timeout = Some(timeout);
            }
        }
    }

    /// Load configuration from marhaba.json files
    pub async fn load_from_file() -> Result<Self> {
        // Configuration priority:
        // 1. ./.marhaba.json
        // 2. ./marhaba.json
        // 3. $HOME/.config/marhaba/marhaba.json
        let mut config_paths = vec![
            PathBuf::from("./.marhaba.json"),
            PathBuf::from("./marhaba.json"),
        ];

        if let Some(config_dir) = dirs::config_dir() {
            config_paths.push(config_dir.join("marhaba").join("marhaba.json"));
        }

        for path in config_paths {
            if path.exists() {
                debug!("Loading configuration from: {}", path.display());
                let content = tokio::fs::read_to_string(&path).await?;
                let config: Self = serde_json::from_str(&content)?;
                return Ok(config);
            }
        }

        Err(anyhow::anyhow!("No configuration file found"))
    }

    /// Merge another configuration into this one
    pub fn merge_with(&mut self, other: Self) {
        let defaults = Self::default();

        if other.base_url != defaults.base_url {
            self.base_url = other.base_url;
        }
        if other.data_dir != defaults.data_dir {
            self.data_dir = other.data_dir;
        }
        if other.request_timeout.is_some() {
            self.request_timeout = other.request_timeout;
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(anyhow::anyhow!(
                "No backend URL configured. Set MARHABA_BASE_URL or add base_url to marhaba.json."
            ));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(anyhow::anyhow!(
                "Backend URL must start with http:// or https://"
            ));
        }

        if let Some(timeout) = self.request_timeout {
            if timeout == 0 {
                return Err(anyhow::anyhow!("request_timeout must be greater than 0"));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.base_url, "http://localhost:8000");
        assert!(config.request_timeout.is_none());
    }

    #[test]
    fn test_validate_rejects_bad_urls() {
        let mut config = Config::default();
        config.base_url = String::new();
        assert!(config.validate().is_err());

        config.base_url = "localhost:8000".to_string();
        assert!(config.validate().is_err());

        config.base_url = "https://guide.example.com".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.request_timeout = Some(0);
        assert!(config.validate().is_err());

        config.request_timeout = Some(30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_merge_prefers_non_default_values() {
        let mut config = Config::default();
        let mut other = Config::default();
        other.base_url = "https://guide.example.com".to_string();
        other.request_timeout = Some(60);

        config.merge_with(other);
        assert_eq!(config.base_url, "https://guide.example.com");
        assert_eq!(config.request_timeout, Some(60));

        // Default values in the merged-in config leave the base untouched
        let mut config = Config {
            base_url: "https://guide.example.com".to_string(),
            ..Config::default()
        };
        config.merge_with(Config::default());
        assert_eq!(config.base_url, "https://guide.example.com");
    }

    #[test]
    fn test_partial_config_file_fills_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"base_url": "https://guide.example.com"}"#).unwrap();
        assert_eq!(config.base_url, "https://guide.example.com");
        assert_eq!(config.data_dir, Config::default().data_dir);
    }
}
