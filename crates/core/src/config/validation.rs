//! Configuration validation rules.
//!
//! This module provides validation logic for `EngineConfig` values
//! after they have been loaded from environment, files, or defaults.

use crate::config::EngineConfig;
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },
}

impl EngineConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - any namespace name is empty, or two namespaces share a name
    /// - `api_max_age_secs` is 0
    /// - `offline_path` does not start with `/`
    /// - `max_bytes` is 0 or exceeds 50MB
    /// - `user_agent` is empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, name) in [
            ("cache_name", &self.cache_name),
            ("static_cache", &self.static_cache),
            ("dynamic_cache", &self.dynamic_cache),
        ] {
            if name.is_empty() {
                return Err(ConfigError::Invalid { field: field.into(), reason: "must not be empty".into() });
            }
        }

        if self.static_cache == self.dynamic_cache
            || self.static_cache == self.cache_name
            || self.dynamic_cache == self.cache_name
        {
            return Err(ConfigError::Invalid {
                field: "static_cache".into(),
                reason: "namespace names must be distinct".into(),
            });
        }

        if self.api_max_age_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "api_max_age_secs".into(),
                reason: "must be greater than 0".into(),
            });
        }

        if !self.offline_path.starts_with('/') {
            return Err(ConfigError::Invalid {
                field: "offline_path".into(),
                reason: "must be an absolute path starting with '/'".into(),
            });
        }

        if self.max_bytes == 0 {
            return Err(ConfigError::Invalid { field: "max_bytes".into(), reason: "must be greater than 0".into() });
        }
        if self.max_bytes > 50 * 1024 * 1024 {
            return Err(ConfigError::Invalid { field: "max_bytes".into(), reason: "must not exceed 50MB".into() });
        }

        if self.user_agent.is_empty() {
            return Err(ConfigError::Invalid { field: "user_agent".into(), reason: "must not be empty".into() });
        }

        if self.api_patterns.is_empty() {
            tracing::warn!("api_patterns is empty; no request will be classified as an API call");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_default_config() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_namespace() {
        let config = EngineConfig { static_cache: String::new(), ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "static_cache"));
    }

    #[test]
    fn test_validate_duplicate_namespaces() {
        let config = EngineConfig {
            static_cache: "v1".into(),
            dynamic_cache: "v1".into(),
            ..Default::default()
        };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "static_cache"));
    }

    #[test]
    fn test_validate_zero_max_age() {
        let config = EngineConfig { api_max_age_secs: 0, ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "api_max_age_secs"));
    }

    #[test]
    fn test_validate_relative_offline_path() {
        let config = EngineConfig { offline_path: "offline.html".into(), ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "offline_path"));
    }

    #[test]
    fn test_validate_max_bytes_zero() {
        let config = EngineConfig { max_bytes: 0, ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "max_bytes"));
    }

    #[test]
    fn test_validate_empty_user_agent() {
        let config = EngineConfig { user_agent: String::new(), ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "user_agent"));
    }
}
