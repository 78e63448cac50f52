//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (QURANC_*)
//! 2. TOML config file (if QURANC_CONFIG_FILE set)
//! 3. Built-in defaults

use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (QURANC_*)
/// 2. TOML config file (if QURANC_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Content API host, without the `/api/v3` suffix.
    ///
    /// Set via QURANC_HOST environment variable.
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP request timeout in milliseconds.
    ///
    /// Set via QURANC_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// User-Agent string for HTTP requests.
    ///
    /// Set via QURANC_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Path to SQLite cache database.
    ///
    /// Set via QURANC_DB_PATH environment variable.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// Whether API responses are cached in `db_path`.
    ///
    /// Set via QURANC_CACHE_ENABLED environment variable.
    #[serde(default = "default_true")]
    pub cache_enabled: bool,
}

fn default_host() -> String {
    "https://api.quran.com".into()
}

fn default_timeout_ms() -> u64 {
    15_000
}

fn default_user_agent() -> String {
    concat!("quranc/", env!("CARGO_PKG_VERSION")).into()
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./quranc-cache.sqlite")
}

fn default_true() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            timeout_ms: default_timeout_ms(),
            user_agent: default_user_agent(),
            db_path: default_db_path(),
            cache_enabled: true,
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(|_| {})
    }

    /// Like [`load`](Self::load), applying `overrides` (such as command-line
    /// flags) on top of every layer before validating.
    ///
    /// An invalid value from a lower layer is accepted when an override
    /// replaces it.
    pub fn load_with(overrides: impl FnOnce(&mut Self)) -> Result<Self, ConfigError> {
        Self::from_figment(Self::figment(), overrides)
    }

    /// The layered figment `load` extracts from.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("QURANC_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment.merge(
            Env::prefixed("QURANC_")
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        )
    }

    /// Extract a configuration from `figment`, apply `overrides`, then validate.
    pub fn from_figment(figment: Figment, overrides: impl FnOnce(&mut Self)) -> Result<Self, ConfigError> {
        let mut config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;
        overrides(&mut config);

        config.validate()?;

        Ok(config)
    }

    /// Cache database path, if caching is enabled.
    pub fn cache_path(&self) -> Option<&Path> {
        self.cache_enabled.then_some(self.db_path.as_path())
    }
}
