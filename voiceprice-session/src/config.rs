//! Configuration management.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use voiceprice_fetch::{DEFAULT_BASE_URL, RetryPolicy};

use crate::error::SessionError;

/// Calculator configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Base URL of the pricing backend.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Retry policy of backend calls.
    #[serde(default)]
    pub retry: RetryConfig,
    /// Background warm-up pings.
    #[serde(default)]
    pub keep_warm: KeepWarmConfig,
    /// Log level.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Retry settings, in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Attempts per logical call.
    pub max_attempts: u32,
    /// Timeout of the first attempt.
    pub first_attempt_timeout_ms: u64,
    /// Timeout of later attempts.
    pub retry_timeout_ms: u64,
    /// Pause after a first-attempt timeout.
    pub cold_start_pause_ms: u64,
    /// Base backoff delay.
    pub base_delay_ms: u64,
    /// Backoff cap.
    pub max_delay_ms: u64,
}

/// Keep-warm settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeepWarmConfig {
    /// Whether the backend is pinged in the background.
    pub enabled: bool,
    /// Seconds between pings.
    pub interval_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            first_attempt_timeout_ms: 8_000,
            retry_timeout_ms: 15_000,
            cold_start_pause_ms: 500,
            base_delay_ms: 1_000,
            max_delay_ms: 4_000,
        }
    }
}

impl RetryConfig {
    /// Converts the settings into a retry policy.
    pub fn to_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_attempts)
            .with_timeouts(
                Duration::from_millis(self.first_attempt_timeout_ms),
                Duration::from_millis(self.retry_timeout_ms),
            )
            .with_cold_start_pause(Duration::from_millis(self.cold_start_pause_ms))
            .with_base_delay(Duration::from_millis(self.base_delay_ms))
            .with_max_delay(Duration::from_millis(self.max_delay_ms))
    }
}

impl Default for KeepWarmConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_secs: 300,
        }
    }
}

impl KeepWarmConfig {
    /// Interval between pings.
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs.max(1))
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            retry: RetryConfig::default(),
            keep_warm: KeepWarmConfig::default(),
            log_level: default_log_level(),
        }
    }
}

impl SessionConfig {
    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("voiceprice")
            .join("config.json")
    }

    /// Loads configuration from the default path.
    pub fn load() -> Result<Self, SessionError> {
        Self::load_from(&Self::default_path())
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, SessionError> {
        if !path.exists() {
            debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: SessionConfig = serde_json::from_str(&content)?;
        config.validate()?;

        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Saves configuration to the default path.
    pub fn save(&self) -> Result<(), SessionError> {
        self.save_to(&Self::default_path())
    }

    /// Saves configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<(), SessionError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        info!(path = %path.display(), "Saved configuration");
        Ok(())
    }

    /// Checks values that serde cannot.
    pub fn validate(&self) -> Result<(), SessionError> {
        if self.base_url.trim().is_empty() {
            return Err(SessionError::Config("base_url is empty".to_string()));
        }
        if self.retry.max_attempts == 0 {
            return Err(SessionError::Config(
                "retry.max_attempts must be at least 1".to_string(),
            ));
        }
        if self.retry.first_attempt_timeout_ms == 0 || self.retry.retry_timeout_ms == 0 {
            return Err(SessionError::Config(
                "retry timeouts must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = SessionConfig::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, SessionConfig::default());
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"base_url": "http://localhost:8000", "retry": {"max_attempts": 5}}"#,
        )
        .unwrap();

        let config = SessionConfig::load_from(&path).unwrap();

        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.retry.max_attempts, 5);
        assert_eq!(config.retry.retry_timeout_ms, 15_000);
        assert!(config.keep_warm.enabled);
        assert_eq!(config.keep_warm.interval(), Duration::from_secs(300));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let mut config = SessionConfig::default();
        config.keep_warm.enabled = false;
        config.save_to(&path).unwrap();

        assert_eq!(SessionConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"retry": {"max_attempts": 0}}"#).unwrap();

        assert!(matches!(
            SessionConfig::load_from(&path),
            Err(SessionError::Config(_))
        ));

        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(
            SessionConfig::load_from(&path),
            Err(SessionError::Serialization(_))
        ));
    }

    #[test]
    fn test_retry_policy_conversion() {
        let policy = RetryConfig::default().to_policy();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.timeout_for_attempt(1), Duration::from_secs(8));
        assert_eq!(policy.timeout_for_attempt(2), Duration::from_secs(15));
        assert_eq!(policy.max_delay, Duration::from_secs(4));
    }
}
