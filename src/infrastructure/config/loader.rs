use anyhow::{Context, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use thiserror::Error;

use crate::domain::models::config::Config;
use crate::domain::models::MAX_HISTORY_CAPACITY;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Invalid log rotation: {0}. Must be one of: daily, hourly, never")]
    InvalidRotation(String),

    #[error("Database path cannot be empty")]
    EmptyDatabasePath,

    #[error("Invalid max_connections: {0}. Must be at least 1")]
    InvalidMaxConnections(u32),

    #[error("Invalid {0}: {1}. Must be a finite, non-negative number of hours")]
    InvalidHours(&'static str, f64),

    #[error("Invalid history_capacity: {0}. Must be between 1 and 10")]
    InvalidHistoryCapacity(usize),

    #[error("Invalid timeout_secs: {0}. Must be at least 1")]
    InvalidTimeout(u64),

    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .menu-cache/config.yaml (project config)
    /// 3. .menu-cache/local.yaml (local overrides, optional)
    /// 4. Environment variables (MENU_CACHE_* prefix, `__` for nesting)
    pub fn load() -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(".menu-cache/config.yaml"))
            .merge(Yaml::file(".menu-cache/local.yaml"))
            .merge(Env::prefixed("MENU_CACHE_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file, still honoring env overrides
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .merge(Env::prefixed("MENU_CACHE_").split("__"))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.database.path.trim().is_empty() {
            return Err(ConfigError::EmptyDatabasePath);
        }

        if config.database.max_connections == 0 {
            return Err(ConfigError::InvalidMaxConnections(
                config.database.max_connections,
            ));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&config.logging.rotation.as_str()) {
            return Err(ConfigError::InvalidRotation(config.logging.rotation.clone()));
        }

        for (name, value) in [
            ("short_circuit_hours", config.cache.short_circuit_hours),
            ("default_max_age_hours", config.cache.default_max_age_hours),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidHours(name, value));
            }
        }

        if !(1..=MAX_HISTORY_CAPACITY).contains(&config.cache.history_capacity) {
            return Err(ConfigError::InvalidHistoryCapacity(
                config.cache.history_capacity,
            ));
        }

        if config.fetcher.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout(config.fetcher.timeout_secs));
        }

        if let Some(endpoint) = &config.fetcher.endpoint {
            if endpoint.trim().is_empty() {
                return Err(ConfigError::ValidationFailed(
                    "fetcher endpoint cannot be empty when set".to_string(),
                ));
            }
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
        assert_eq!(config.database.path, ".menu-cache/menu-cache.db");
        assert_eq!(config.logging.level, "info");
        assert!((config.cache.short_circuit_hours - 1.0).abs() < f64::EPSILON);
        assert!((config.cache.default_max_age_hours - 24.0).abs() < f64::EPSILON);
        assert_eq!(config.cache.history_capacity, 10);
        assert_eq!(config.fetcher.timeout_secs, 30);
        ConfigLoader::validate(&config).expect("Default config should be valid");
    }

    #[test]
    fn test_yaml_parsing() {
        let yaml = r"
database:
  path: /custom/menus.db
  max_connections: 2
logging:
  level: debug
  format: json
cache:
  short_circuit_hours: 0.5
  history_capacity: 5
fetcher:
  endpoint: http://localhost:9000/scrape
  timeout_secs: 10
";

        let config: Config = serde_yaml::from_str(yaml).expect("YAML should parse");

        assert_eq!(config.database.path, "/custom/menus.db");
        assert_eq!(config.database.max_connections, 2);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "json");
        assert!((config.cache.short_circuit_hours - 0.5).abs() < f64::EPSILON);
        assert!((config.cache.default_max_age_hours - 24.0).abs() < f64::EPSILON);
        assert_eq!(config.cache.history_capacity, 5);
        assert_eq!(
            config.fetcher.endpoint.as_deref(),
            Some("http://localhost:9000/scrape")
        );
        assert_eq!(config.fetcher.timeout_secs, 10);

        ConfigLoader::validate(&config).expect("Parsed config should be valid");
    }

    #[test]
    fn test_validate_invalid_log_level() {
        let mut config = Config::default();
        config.logging.level = "loud".to_string();

        match ConfigLoader::validate(&config).unwrap_err() {
            ConfigError::InvalidLogLevel(level) => assert_eq!(level, "loud"),
            other => panic!("Expected InvalidLogLevel error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_invalid_log_format() {
        let mut config = Config::default();
        config.logging.format = "xml".to_string();

        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::InvalidLogFormat(_)
        ));
    }

    #[test]
    fn test_validate_invalid_rotation() {
        let mut config = Config::default();
        config.logging.rotation = "weekly".to_string();

        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::InvalidRotation(_)
        ));
    }

    #[test]
    fn test_validate_empty_database_path() {
        let mut config = Config::default();
        config.database.path = String::new();

        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::EmptyDatabasePath
        ));
    }

    #[test]
    fn test_validate_zero_max_connections() {
        let mut config = Config::default();
        config.database.max_connections = 0;

        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::InvalidMaxConnections(0)
        ));
    }

    #[test]
    fn test_validate_bad_hours() {
        let mut config = Config::default();
        config.cache.short_circuit_hours = -1.0;
        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::InvalidHours("short_circuit_hours", _)
        ));

        let mut config = Config::default();
        config.cache.default_max_age_hours = f64::NAN;
        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::InvalidHours("default_max_age_hours", _)
        ));
    }

    #[test]
    fn test_validate_zero_history_and_timeout() {
        let mut config = Config::default();
        config.cache.history_capacity = 0;
        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::InvalidHistoryCapacity(0)
        ));

        let mut config = Config::default();
        config.cache.history_capacity = 11;
        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::InvalidHistoryCapacity(11)
        ));

        let mut config = Config::default();
        config.fetcher.timeout_secs = 0;
        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::InvalidTimeout(0)
        ));
    }

    #[test]
    fn test_validate_blank_endpoint() {
        let mut config = Config::default();
        config.fetcher.endpoint = Some("  ".to_string());
        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::ValidationFailed(_)
        ));
    }

    #[test]
    fn test_env_override() {
        use std::io::Write;
        use tempfile::NamedTempFile;

        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "cache:\n  short_circuit_hours: 2.0\nlogging:\n  level: warn").unwrap();
        file.flush().unwrap();

        temp_env::with_vars(
            [
                ("MENU_CACHE_LOGGING__LEVEL", Some("debug")),
                ("MENU_CACHE_FETCHER__TIMEOUT_SECS", Some("5")),
            ],
            || {
                let config = ConfigLoader::load_from_file(file.path()).unwrap();
                assert_eq!(config.logging.level, "debug", "env should beat file");
                assert_eq!(config.fetcher.timeout_secs, 5);
                assert!((config.cache.short_circuit_hours - 2.0).abs() < f64::EPSILON);
            },
        );
    }

    #[test]
    fn test_hierarchical_merging() {
        use std::io::Write;
        use tempfile::NamedTempFile;

        let mut base_file = NamedTempFile::new().unwrap();
        writeln!(
            base_file,
            "cache:\n  history_capacity: 3\nlogging:\n  level: info\n  format: json"
        )
        .unwrap();
        base_file.flush().unwrap();

        let mut override_file = NamedTempFile::new().unwrap();
        writeln!(override_file, "cache:\n  history_capacity: 7\nlogging:\n  level: debug").unwrap();
        override_file.flush().unwrap();

        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(base_file.path()))
            .merge(Yaml::file(override_file.path()))
            .extract()
            .unwrap();

        assert_eq!(config.cache.history_capacity, 7, "Override should win");
        assert_eq!(
            config.logging.level, "debug",
            "Override should win for nested fields"
        );
        assert_eq!(
            config.logging.format, "json",
            "Base value should persist when not overridden"
        );
    }

    #[test]
    fn test_invalid_file_values_are_rejected() {
        use std::io::Write;
        use tempfile::NamedTempFile;

        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "cache:\n  history_capacity: 0").unwrap();
        file.flush().unwrap();

        assert!(ConfigLoader::load_from_file(file.path()).is_err());

        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "cache:\n  history_capacity: 20").unwrap();
        file.flush().unwrap();

        assert!(ConfigLoader::load_from_file(file.path()).is_err());
    }
}
