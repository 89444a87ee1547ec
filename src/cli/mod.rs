//! Command-line interface.

pub mod commands;
pub mod output;
pub mod types;

use anyhow::Result;
use std::path::Path;

use crate::domain::errors::DomainError;
use crate::domain::models::Config;
use crate::infrastructure::config::ConfigLoader;

pub use types::{Cli, Commands};

/// Load configuration from `path` when given, otherwise from `.menu-cache/`.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    }
}

/// Short machine-readable kind for an error, used in JSON output.
pub fn error_kind(err: &anyhow::Error) -> &'static str {
    match err.downcast_ref::<DomainError>() {
        Some(DomainError::MenuNotFound(_)) => "not_found",
        Some(DomainError::ValidationFailed(_)) => "validation",
        Some(DomainError::ScrapeFailed(_)) => "fetch_failed",
        Some(DomainError::PersistenceError(_)) => "persistence",
        Some(DomainError::SerializationError(_)) => "serialization",
        None => "error",
    }
}

/// Print `err` and exit with a non-zero status.
pub fn handle_error(err: anyhow::Error, json_mode: bool) -> ! {
    if json_mode {
        let mut body = serde_json::json!({
            "error": format!("{err:#}"),
            "kind": error_kind(&err),
        });
        if let Some(failure) = err.downcast_ref::<DomainError>().and_then(DomainError::as_scrape_failure) {
            body["fallbackAvailable"] = serde_json::Value::Bool(failure.fallback_available());
        }
        println!("{}", serde_json::to_string_pretty(&body).unwrap_or_default());
    } else {
        eprintln!("Error: {err:#}");
    }
    std::process::exit(1);
}
