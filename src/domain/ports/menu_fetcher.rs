//! Menu fetcher port.
//!
//! The fetcher owns all site-specific retrieval and parsing. The cache only
//! sees its structured result or a failure.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

use crate::domain::models::RawMenu;

/// Failure reported by (or on behalf of) the fetch collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("fetch timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    #[error("upstream returned HTTP {0}")]
    Status(u16),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("invalid menu payload: {0}")]
    InvalidPayload(String),

    #[error("no menu items found")]
    NoItems,
}

/// External collaborator that turns a URL into a raw menu.
#[async_trait]
pub trait MenuFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<RawMenu, FetchError>;
}
