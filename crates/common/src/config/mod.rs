//! Configuration management for LitForge services
//!
//! Supports loading configuration from:
//! - Environment variables (prefixed with APP__)
//! - Configuration files (config/default.toml, config/{APP_ENV}.toml, config/local.toml)
//! - Default values
//!
//! The summarizer API key additionally falls back to `OPENAI_API_KEY`.

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Unprefixed variable consulted when no API key is configured
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Main application configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Uploaded file storage
    #[serde(default)]
    pub storage: StorageConfig,

    /// Text-generation service configuration
    #[serde(default)]
    pub summarizer: SummarizerConfig,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Largest accepted upload body in bytes
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// SQLite database URL
    #[serde(default = "default_database_url")]
    pub url: String,

    /// Maximum number of connections
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Connection timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

/// What happens to a stored PDF when its record is deleted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileRetention {
    /// Keep the file on disk
    #[default]
    Retain,
    /// Remove the file together with the record
    Cascade,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Directory holding uploaded PDFs
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default)]
    pub file_retention: FileRetention,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SummarizerConfig {
    /// Provider: openai, mock
    #[serde(default = "default_summarizer_provider")]
    pub provider: String,

    /// API key for the text-generation service
    pub api_key: Option<String>,

    /// API base URL
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Model to use
    #[serde(default = "default_summary_model")]
    pub model: String,

    /// Completion length bound
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Client-side request timeout; unset leaves it to the service
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    /// Log level (debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub json_logging: bool,

    /// Expose Prometheus metrics on /metrics
    #[serde(default = "default_metrics_enabled")]
    pub metrics_enabled: bool,
}

// Default value functions
fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }
fn default_max_upload_bytes() -> usize { 50 * 1024 * 1024 }
fn default_database_url() -> String { "sqlite://database.db?mode=rwc".to_string() }
fn default_max_connections() -> u32 { 5 }
fn default_connect_timeout() -> u64 { 10 }
fn default_data_dir() -> PathBuf { PathBuf::from("data") }
fn default_summarizer_provider() -> String { "openai".to_string() }
fn default_api_base() -> String { "https://api.openai.com/v1".to_string() }
fn default_summary_model() -> String { crate::DEFAULT_SUMMARY_MODEL.to_string() }
fn default_max_tokens() -> u32 { 500 }
fn default_temperature() -> f32 { 0.7 }
fn default_log_level() -> String { "info".to_string() }
fn default_metrics_enabled() -> bool { true }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_max_connections(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            file_retention: FileRetention::default(),
        }
    }
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            provider: default_summarizer_provider(),
            api_key: None,
            api_base: default_api_base(),
            model: default_summary_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            timeout_secs: None,
        }
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json_logging: false,
            metrics_enabled: default_metrics_enabled(),
        }
    }
}

impl SummarizerConfig {
    /// Request timeout as Duration, if any
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl AppConfig {
    /// Load configuration from environment and files
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let config = Config::builder()
            // Load base config file
            .add_source(File::with_name("config/default").required(false))

            // Load environment-specific config
            .add_source(File::with_name(&format!("config/{}", env)).required(false))

            // Load local overrides
            .add_source(File::with_name("config/local").required(false))

            // Load from environment variables with APP__ prefix
            // e.g., APP__SERVER__PORT=8081
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true)
            )

            .build()?;

        let mut app: Self = config.try_deserialize()?;
        app.apply_api_key_fallback(std::env::var(API_KEY_ENV).ok());
        Ok(app)
    }

    /// Load from a specific TOML file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name(path))
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true)
            )
            .build()?;

        let mut app: Self = config.try_deserialize()?;
        app.apply_api_key_fallback(std::env::var(API_KEY_ENV).ok());
        Ok(app)
    }

    /// Fill the summarizer key from the unprefixed variable when unset
    fn apply_api_key_fallback(&mut self, env_key: Option<String>) {
        let configured = self
            .summarizer
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty());

        if configured.is_none() {
            self.summarizer.api_key = env_key.filter(|k| !k.trim().is_empty());
        }
    }

    /// Socket address string the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.summarizer.model, "gpt-4o-mini");
        assert_eq!(config.summarizer.max_tokens, 500);
        assert_eq!(config.storage.file_retention, FileRetention::Retain);
        assert!(config.summarizer.timeout().is_none());
    }

    #[test]
    fn test_api_key_fallback_only_when_unset() {
        let mut config = AppConfig::default();
        config.apply_api_key_fallback(Some("sk-env".into()));
        assert_eq!(config.summarizer.api_key.as_deref(), Some("sk-env"));

        config.apply_api_key_fallback(Some("sk-other".into()));
        assert_eq!(config.summarizer.api_key.as_deref(), Some("sk-env"));
    }

    #[test]
    fn test_blank_api_key_is_replaced() {
        let mut config = AppConfig::default();
        config.summarizer.api_key = Some("  ".into());
        config.apply_api_key_fallback(None);
        assert!(config.summarizer.api_key.is_none());
    }

    #[test]
    fn test_from_file_reads_sections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("litforge.toml");
        std::fs::write(
            &path,
            r#"
[server]
port = 9000

[storage]
data_dir = "/tmp/pdfs"
file_retention = "cascade"

[summarizer]
provider = "mock"
"#,
        )
        .unwrap();

        let config = AppConfig::from_file(path.to_str().unwrap()).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.storage.file_retention, FileRetention::Cascade);
        assert_eq!(config.storage.data_dir, PathBuf::from("/tmp/pdfs"));
        assert_eq!(config.summarizer.provider, "mock");
        assert_eq!(config.database.url, "sqlite://database.db?mode=rwc");
        assert_eq!(config.bind_address(), "0.0.0.0:9000");
    }
}
