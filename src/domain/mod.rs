//! Domain layer for the menu cache
//!
//! This module contains core business logic and domain models.

pub mod errors;
pub mod models;
pub mod ports;
pub mod staleness;

// Re-export error types for convenient access
pub use errors::{DomainError, DomainResult, ScrapeFailure};
