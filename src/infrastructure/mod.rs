//! Infrastructure layer module
//!
//! Process-level plumbing that sits outside the domain:
//! - Configuration management (figment)
//! - Logging infrastructure (tracing)
//!
//! Storage and fetch adapters implementing the domain ports live in `adapters`.

pub mod config;
pub mod logging;
