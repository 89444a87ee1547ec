use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure for the menu cache
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Freshness and history policy
    #[serde(default)]
    pub cache: CacheConfig,

    /// External fetch collaborator configuration
    #[serde(default)]
    pub fetcher: FetcherConfig,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DatabaseConfig {
    /// Path to `SQLite` database file
    #[serde(default = "default_database_path")]
    pub path: String,

    /// Maximum number of database connections in pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_database_path() -> String {
    ".menu-cache/menu-cache.db".to_string()
}

const fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
            max_connections: default_max_connections(),
        }
    }
}

impl DatabaseConfig {
    /// sqlx connection URL for the configured path.
    pub fn url(&self) -> String {
        if self.path.starts_with("sqlite:") {
            self.path.clone()
        } else {
            format!("sqlite:{}", self.path)
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for rolling log files (stderr only when unset)
    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    /// Also write to stderr when logging to files
    #[serde(default = "default_true")]
    pub enable_stdout: bool,

    /// Rotation for file logs: daily, hourly, never
    #[serde(default = "default_rotation")]
    pub rotation: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

const fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
            enable_stdout: true,
            rotation: default_rotation(),
        }
    }
}

/// Freshness and provenance policy
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CacheConfig {
    /// Age under which a non-forced refresh reuses the cached record.
    /// `0` disables reuse: every non-forced refresh then fetches.
    #[serde(default = "default_short_circuit_hours")]
    pub short_circuit_hours: f64,

    /// Threshold used by reads when the caller gives none
    #[serde(default = "default_max_age_hours")]
    pub default_max_age_hours: f64,

    /// Attempts retained per record, between 1 and 10
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
}

const fn default_short_circuit_hours() -> f64 {
    1.0
}

const fn default_max_age_hours() -> f64 {
    24.0
}

const fn default_history_capacity() -> usize {
    10
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            short_circuit_hours: default_short_circuit_hours(),
            default_max_age_hours: default_max_age_hours(),
            history_capacity: default_history_capacity(),
        }
    }
}

/// External fetch collaborator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct FetcherConfig {
    /// Scraper service endpoint; when unset the menu URL is fetched directly
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Upper bound on a single fetch, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

const fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    concat!("menu-cache/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl FetcherConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
