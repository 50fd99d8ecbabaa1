use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::constants;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub cache: CacheConfig,

    pub twitter: TwitterConfig,

    pub google: GoogleConfig,

    pub youtube: YouTubeConfig,

    pub countries: CountriesConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub database_path: String,

    pub log_level: String,

    #[serde(default)]
    pub suppress_connection_errors: bool,

    /// Number of tokio worker threads (default: 2)
    /// Set to 0 to use the number of CPU cores
    pub worker_threads: usize,

    /// Maximum database connections (default: 5)
    pub max_db_connections: u32,

    /// Minimum database connections (default: 1)
    pub min_db_connections: u32,

    /// Timeout applied to every outgoing provider HTTP request (default: 15)
    pub request_timeout_seconds: u64,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            database_path: "sqlite:data/toptrends.db".to_string(),
            log_level: "info".to_string(),
            suppress_connection_errors: false,
            worker_threads: 2,
            max_db_connections: 5,
            min_db_connections: 1,
            request_timeout_seconds: 15,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Offset used on both sides of the staleness check. With the default of 60
    /// an aggregate is refreshed once it is older than two hours.
    pub staleness_offset_minutes: i64,

    /// Upper bound for a single provider fetch; a timeout counts as a failed fetch.
    pub fetch_timeout_seconds: u64,

    /// Serialize refreshes of the same logical key inside this process.
    pub per_key_locking: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            staleness_offset_minutes: constants::cache::STALENESS_OFFSET_MINUTES,
            fetch_timeout_seconds: constants::cache::FETCH_TIMEOUT_SECONDS,
            per_key_locking: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TwitterConfig {
    pub base_url: String,

    /// App-only bearer token. `TWITTER_BEARER_TOKEN` overrides this value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bearer_token: Option<String>,
}

impl Default for TwitterConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.twitter.com/1.1".to_string(),
            bearer_token: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GoogleConfig {
    pub base_url: String,

    pub language: String,

    /// Timezone offset in minutes, as expected by the trends endpoints
    pub timezone_offset: i32,
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            base_url: "https://trends.google.com/trends".to_string(),
            language: "en-US".to_string(),
            timezone_offset: 360,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct YouTubeConfig {
    pub base_url: String,

    /// Data API key. `YOUTUBE_API_KEY` overrides this value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Maximum number of chart pages requested per refresh (default: 4)
    pub max_pages: u32,

    pub page_size: u32,
}

impl Default for YouTubeConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.googleapis.com/youtube/v3".to_string(),
            api_key: None,
            max_pages: 4,
            page_size: 25,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CountriesConfig {
    pub source_url: String,
}

impl Default for CountriesConfig {
    fn default() -> Self {
        Self {
            source_url: "https://restcountries.com/v2/all".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub metrics_enabled: bool,

    pub loki_enabled: bool,

    pub loki_url: String,

    pub loki_labels: std::collections::HashMap<String, String>,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        let mut labels = std::collections::HashMap::new();
        labels.insert("app".to_string(), "toptrends".to_string());

        Self {
            metrics_enabled: true,
            loki_enabled: false,
            loki_url: "http://localhost:3100".to_string(),
            loki_labels: labels,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub enabled: bool,

    pub port: u16,

    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            port: 8000,
            cors_allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ],
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            cache: CacheConfig::default(),
            twitter: TwitterConfig::default(),
            google: GoogleConfig::default(),
            youtube: YouTubeConfig::default(),
            countries: CountriesConfig::default(),
            server: ServerConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        // A missing .env file is the common case.
        dotenvy::dotenv().ok();

        let paths = Self::config_paths();

        for path in &paths {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                let mut config = Self::load_from_path(path)?;
                config.apply_env_overrides();
                return Ok(config);
            }
        }

        info!("No config file found, using defaults");
        let mut config = Self::default();
        config.apply_env_overrides();
        Ok(config)
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(token) = std::env::var("TWITTER_BEARER_TOKEN")
            && !token.trim().is_empty()
        {
            self.twitter.bearer_token = Some(token);
        }

        if let Ok(key) = std::env::var("YOUTUBE_API_KEY")
            && !key.trim().is_empty()
        {
            self.youtube.api_key = Some(key);
        }
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![];

        paths.push(PathBuf::from("config.toml"));

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("toptrends").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".toptrends").join("config.toml"));
        }

        paths
    }

    fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    pub fn create_default_if_missing() -> Result<bool> {
        let path = Self::default_config_path();
        if path.exists() {
            Ok(false)
        } else {
            let config = Self::default();
            config.save_to_path(&path)?;
            info!("Created default config file: {}", path.display());
            Ok(true)
        }
    }

    pub fn validate(&self) -> Result<()> {
        let max_offset = constants::cache::MAX_STALENESS_OFFSET_MINUTES;
        if !(1..=max_offset).contains(&self.cache.staleness_offset_minutes) {
            anyhow::bail!("cache.staleness_offset_minutes must be between 1 and {max_offset}");
        }

        if self.cache.fetch_timeout_seconds == 0 {
            anyhow::bail!("cache.fetch_timeout_seconds must be > 0");
        }

        for (name, url) in [
            ("twitter.base_url", &self.twitter.base_url),
            ("google.base_url", &self.google.base_url),
            ("youtube.base_url", &self.youtube.base_url),
            ("countries.source_url", &self.countries.source_url),
        ] {
            if url.is_empty() {
                anyhow::bail!("{name} cannot be empty");
            }
        }

        if self.youtube.page_size == 0 || self.youtube.page_size > 50 {
            anyhow::bail!("youtube.page_size must be between 1 and 50");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.cache.staleness_offset_minutes, 60);
        assert!(config.cache.per_key_locking);
        assert_eq!(config.youtube.max_pages, 4);
        assert!(config.twitter.bearer_token.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[cache]"));
        assert!(toml_str.contains("[youtube]"));
        assert!(!toml_str.contains("bearer_token"));
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
            [general]
            log_level = "debug"

            [cache]
            staleness_offset_minutes = 30
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.cache.staleness_offset_minutes, 30);

        assert_eq!(config.cache.fetch_timeout_seconds, 20);
        assert_eq!(config.google.language, "en-US");
    }

    #[test]
    fn test_validate_rejects_zero_offset() {
        let mut config = Config::default();
        config.cache.staleness_offset_minutes = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.youtube.page_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_oversized_offset() {
        let mut config = Config::default();
        config.cache.staleness_offset_minutes = 1_000_000_000_000;
        assert!(config.validate().is_err());

        config.cache.staleness_offset_minutes = constants::cache::MAX_STALENESS_OFFSET_MINUTES;
        assert!(config.validate().is_ok());
    }
}
