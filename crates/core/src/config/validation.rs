//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use crate::config::AppConfig;
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },

    #[error("missing required configuration: {field} ({hint})")]
    Missing { field: String, hint: String },
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if `host` is empty, and
    /// `ConfigError::Invalid` if:
    /// - `host` is not an http(s) URL
    /// - `timeout_ms` is less than 100ms or exceeds 5 minutes
    /// - `user_agent` is empty
    /// - caching is enabled with an empty `db_path`
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.is_empty() {
            return Err(ConfigError::Missing { field: "host".into(), hint: "Set QURANC_HOST environment variable".into() });
        }
        if !(self.host.starts_with("http://") || self.host.starts_with("https://")) {
            return Err(ConfigError::Invalid { field: "host".into(), reason: "must start with http:// or https://".into() });
        }

        if self.timeout_ms < 100 {
            return Err(ConfigError::Invalid { field: "timeout_ms".into(), reason: "must be at least 100ms".into() });
        }
        if self.timeout_ms > 300_000 {
            return Err(ConfigError::Invalid {
                field: "timeout_ms".into(),
                reason: "must not exceed 5 minutes (300000ms)".into(),
            });
        }

        if self.user_agent.is_empty() {
            return Err(ConfigError::Invalid { field: "user_agent".into(), reason: "must not be empty".into() });
        }

        if self.cache_enabled && self.db_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid {
                field: "db_path".into(),
                reason: "must not be empty while caching is enabled".into(),
            });
        }

        if self.host.ends_with('/') {
            tracing::warn!(host = %self.host, "host has a trailing slash; request paths will contain '//'");
        }

        Ok(())
    }
}
