//! Engine configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (STRATA_*)
//! 2. TOML config file (if STRATA_CONFIG_FILE set)
//! 3. Built-in defaults

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Engine configuration with layered loading.
///
/// Every knob the engine consults lives here: namespace names, classifier
/// rules, the API freshness window, and transport limits. No ambient globals.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (STRATA_*)
/// 2. TOML config file (if STRATA_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Name of the base logical cache namespace.
    #[serde(default = "default_cache_name")]
    pub cache_name: String,

    /// Name of the static-asset namespace (versioned generation).
    #[serde(default = "default_static_cache")]
    pub static_cache: String,

    /// Name of the dynamic namespace (versioned generation).
    #[serde(default = "default_dynamic_cache")]
    pub dynamic_cache: String,

    /// URL path segments that mark a request as a static asset.
    #[serde(default = "default_asset_segments")]
    pub asset_segments: Vec<String>,

    /// Hostnames always classified as static assets (font CDNs).
    #[serde(default = "default_font_hosts")]
    pub font_hosts: Vec<String>,

    /// URL path patterns that mark a request as an API call.
    ///
    /// Tested in order against the request path; first match wins.
    #[serde(default = "default_api_patterns")]
    pub api_patterns: Vec<String>,

    /// Maximum age in seconds for serving a cached API response offline.
    #[serde(default = "default_api_max_age_secs")]
    pub api_max_age_secs: u64,

    /// Path of the offline fallback page served to documents on total miss.
    #[serde(default = "default_offline_path")]
    pub offline_path: String,

    /// Path to the SQLite cache store.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// User-Agent string for outbound fetches.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Transport timeout in milliseconds. 0 disables the timeout; a hung
    /// fetch then blocks that one request indefinitely.
    #[serde(default)]
    pub timeout_ms: u64,

    /// Maximum bytes to accept per fetched response body.
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,
}

fn default_cache_name() -> String {
    "app-shell-v1".into()
}

fn default_static_cache() -> String {
    "static-v1".into()
}

fn default_dynamic_cache() -> String {
    "dynamic-v1".into()
}

fn default_asset_segments() -> Vec<String> {
    vec!["/assets/".into(), "/bundles/".into()]
}

fn default_font_hosts() -> Vec<String> {
    vec!["fonts.googleapis.com".into(), "fonts.gstatic.com".into()]
}

fn default_api_patterns() -> Vec<String> {
    vec!["/api/".into(), "/data/".into(), "/callbacks/".into()]
}

fn default_api_max_age_secs() -> u64 {
    300
}

fn default_offline_path() -> String {
    "/offline".into()
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./strata-cache.sqlite")
}

fn default_user_agent() -> String {
    "strata/0.1".into()
}

fn default_max_bytes() -> usize {
    5_242_880 // 5MB
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cache_name: default_cache_name(),
            static_cache: default_static_cache(),
            dynamic_cache: default_dynamic_cache(),
            asset_segments: default_asset_segments(),
            font_hosts: default_font_hosts(),
            api_patterns: default_api_patterns(),
            api_max_age_secs: default_api_max_age_secs(),
            offline_path: default_offline_path(),
            db_path: default_db_path(),
            user_agent: default_user_agent(),
            timeout_ms: 0,
            max_bytes: default_max_bytes(),
        }
    }
}

impl EngineConfig {
    /// Transport timeout as a Duration; None when disabled.
    pub fn timeout(&self) -> Option<Duration> {
        if self.timeout_ms == 0 { None } else { Some(Duration::from_millis(self.timeout_ms)) }
    }

    /// API freshness window as a chrono Duration.
    pub fn api_max_age(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.api_max_age_secs as i64)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `STRATA_`
    /// 2. TOML file from `STRATA_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("STRATA_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("STRATA_")
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}
