//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use crate::history::{DisplayZone, ZoneError};
use crate::loader::ClientConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub display: DisplayConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Journal API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_request_timeout() -> u64 {
    10
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl ApiConfig {
    /// Client settings for the entry loader
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.clone(),
            request_timeout_ms: self.request_timeout_secs.saturating_mul(1000),
        }
    }
}

/// Display calendar configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    /// "local", "utc" or a fixed offset like "+02:00"
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

fn default_timezone() -> String {
    "local".to_string()
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
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

    pub file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
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

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Default config file locations, most specific first
    pub fn default_paths() -> Vec<PathBuf> {
        [
            dirs::config_dir().map(|p| p.join("moodscope").join("config.toml")),
            Some(PathBuf::from("./moodscope.toml")),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Load an explicit file, or the first default location that exists
    ///
    /// An explicit path must load. Broken files at default locations are
    /// skipped with a warning.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load_with_env(path);
        }

        for path in Self::default_paths() {
            if path.exists() {
                match Self::load_with_env(&path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return Ok(config);
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::debug!("Using default config with environment overrides");
        Ok(Self::from_env())
    }

    /// Parsed display calendar
    pub fn display_zone(&self) -> Result<DisplayZone, ConfigError> {
        self.display
            .timezone
            .parse()
            .map_err(|e: ZoneError| ConfigError::InvalidZone(e.to_string()))
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("MOODSCOPE_API_URL") {
            self.api.base_url = url;
        }
        if let Ok(timeout) = std::env::var("MOODSCOPE_TIMEOUT_SECS") {
            if let Ok(t) = timeout.parse() {
                self.api.request_timeout_secs = t;
            }
        }

        if let Ok(tz) = std::env::var("MOODSCOPE_TIMEZONE") {
            self.display.timezone = tz;
        }

        if let Ok(level) = std::env::var("MOODSCOPE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("MOODSCOPE_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("{0}")]
    InvalidZone(String),
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Moodscope Configuration
#
# Environment variables override these settings:
# - MOODSCOPE_API_URL
# - MOODSCOPE_TIMEOUT_SECS
# - MOODSCOPE_TIMEZONE
# - MOODSCOPE_LOG_LEVEL
# - MOODSCOPE_LOG_FORMAT

[api]
# Journal API base URL (serves GET /entries)
base_url = "http://127.0.0.1:5000"

# Request timeout in seconds
request_timeout_secs = 10

[display]
# Calendar used for date filters and week/month buckets:
# "local", "utc" or a fixed offset such as "+02:00"
timezone = "local"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty or json
format = "pretty"

# Optional log file path
# file = "/var/log/moodscope/moodscope.log"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://127.0.0.1:5000");
        assert_eq!(config.api.request_timeout_secs, 10);
        assert_eq!(config.display.timezone, "local");
        assert_eq!(config.logging.format, "pretty");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.display_zone().unwrap(), DisplayZone::Local);
    }

    #[test]
    fn test_huge_timeout_saturates() {
        let mut config = Config::default();
        config.api.request_timeout_secs = u64::MAX;

        assert_eq!(config.api.client_config().request_timeout_ms, u64::MAX);
    }

    #[test]
    fn test_generated_config_parses() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.api.base_url, "http://127.0.0.1:5000");
        assert_eq!(config.display.timezone, "local");
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[api]
base_url = "http://journal.example:8000"

[display]
timezone = "+02:00"
"#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.api.base_url, "http://journal.example:8000");
        assert_eq!(config.api.request_timeout_secs, 10);
        assert!(matches!(config.display_zone().unwrap(), DisplayZone::Fixed(_)));

        let client = config.api.client_config();
        assert_eq!(client.request_timeout_ms, 10_000);
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        assert!(matches!(Config::load(&missing), Err(ConfigError::Io { .. })));

        let broken = dir.path().join("broken.toml");
        std::fs::write(&broken, "[api\nbase_url = 3").unwrap();
        assert!(matches!(Config::load(&broken), Err(ConfigError::Parse { .. })));
        assert!(Config::resolve(Some(&broken)).is_err());
    }

    #[test]
    fn test_invalid_zone() {
        let mut config = Config::default();
        config.display.timezone = "Mars/Olympus".to_string();
        assert!(matches!(config.display_zone(), Err(ConfigError::InvalidZone(_))));
    }
}
