//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::api::{ApiClientConfig, DEFAULT_API_BASE};
use crate::view::DEFAULT_VIEW_TYPE;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub report: ReportConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_api_url")]
    pub url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_api_url() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_request_timeout() -> u64 {
    10
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: default_api_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl ApiConfig {
    /// Client settings derived from this section
    pub fn client_config(&self) -> ApiClientConfig {
        ApiClientConfig {
            base_url: self.url.clone(),
            request_timeout_ms: self.request_timeout_secs.saturating_mul(1000),
        }
    }
}

/// Report defaults
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_view_type")]
    pub view_type: String,
}

fn default_view_type() -> String {
    DEFAULT_VIEW_TYPE.to_string()
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            view_type: default_view_type(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
        })
    }

    fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Config::default();
        config.apply_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Default config file locations, most specific first
    pub fn default_paths() -> Vec<PathBuf> {
        [
            dirs::config_dir().map(|p| p.join("ticktock").join("config.toml")),
            Some(PathBuf::from("./ticktock.toml")),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Load from default locations or environment.
    ///
    /// A file that exists but cannot be read or parsed is an error.
    pub fn load_default() -> Result<Self, ConfigError> {
        Self::load_first(&Self::default_paths(), |name| std::env::var(name).ok())
    }

    fn load_first(
        paths: &[PathBuf],
        var: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = match paths.iter().find(|path| path.exists()) {
            Some(path) => {
                let config = Self::load(path)?;
                tracing::debug!("Loaded config from {:?}", path);
                config
            }
            None => {
                tracing::debug!("Using default config with environment overrides");
                Config::default()
            }
        };
        config.apply_overrides(var)?;
        Ok(config)
    }

    /// Apply `TICKTOCK_*` overrides read through `var`
    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        // API overrides
        if let Some(url) = var("TICKTOCK_API_URL") {
            self.api.url = url;
        }
        if let Some(timeout) = var("TICKTOCK_TIMEOUT_SECS") {
            self.api.request_timeout_secs =
                timeout.parse().map_err(|_| ConfigError::InvalidEnv {
                    name: "TICKTOCK_TIMEOUT_SECS",
                    value: timeout,
                })?;
        }

        // Report overrides
        if let Some(view_type) = var("TICKTOCK_VIEW_TYPE") {
            self.report.view_type = view_type;
        }

        // Logging overrides
        if let Some(level) = var("TICKTOCK_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("TICKTOCK_LOG_FORMAT") {
            self.logging.format = format;
        }
        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid value for {name}: {value:?}")]
    InvalidEnv { name: &'static str, value: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# ticktock Configuration
#
# Environment variables override these settings:
# - TICKTOCK_API_URL
# - TICKTOCK_TIMEOUT_SECS
# - TICKTOCK_VIEW_TYPE
# - TICKTOCK_LOG_LEVEL
# - TICKTOCK_LOG_FORMAT

[api]
# Base URL of the ticktock server
url = "http://localhost:8080"

# Request timeout in seconds (0 disables it)
request_timeout_secs = 10

[report]
# View type requested by `report`, `report-by-date` and `quick`
view_type = "daily_detail"

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log format: pretty or json
format = "pretty"
"#
    .to_string()
}
