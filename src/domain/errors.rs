//! Domain errors for the menu cache.

use thiserror::Error;

use crate::domain::models::MenuRecord;
use crate::domain::ports::FetchError;

/// A refresh whose fetch failed.
///
/// Carries the last-known-good record when one exists so the caller can keep
/// serving it. The record's history already includes the failed attempt.
#[derive(Debug, Clone)]
pub struct ScrapeFailure {
    pub tenant_id: String,
    pub url: String,
    pub error: FetchError,
    pub fallback: Option<MenuRecord>,
}

impl ScrapeFailure {
    /// Whether a previously fetched record can be served in place of fresh data.
    pub fn fallback_available(&self) -> bool {
        self.fallback.is_some()
    }

    pub fn into_fallback(self) -> Option<MenuRecord> {
        self.fallback
    }
}

impl std::fmt::Display for ScrapeFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "fetch of {} failed: {}", self.url, self.error)?;
        if self.fallback_available() {
            write!(f, " (serving previously cached data)")?;
        }
        Ok(())
    }
}

/// Domain-level errors that can occur in the menu cache.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Menu not found for tenant: {0}")]
    MenuNotFound(String),

    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("Scrape failed for tenant {}: {}", .0.tenant_id, .0)]
    ScrapeFailed(Box<ScrapeFailure>),

    #[error("Persistence error: {0}")]
    PersistenceError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl DomainError {
    /// The fetch failure behind this error, if it is one.
    pub fn as_scrape_failure(&self) -> Option<&ScrapeFailure> {
        match self {
            Self::ScrapeFailed(failure) => Some(failure),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::MenuNotFound(_))
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

impl From<sqlx::Error> for DomainError {
    fn from(err: sqlx::Error) -> Self {
        DomainError::PersistenceError(err.to_string())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::SerializationError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scrape_failure_without_fallback() {
        let failure = ScrapeFailure {
            tenant_id: "t1".to_string(),
            url: "https://example.com/menu".to_string(),
            error: FetchError::Status(502),
            fallback: None,
        };

        assert!(!failure.fallback_available());
        let err = DomainError::ScrapeFailed(Box::new(failure));
        assert!(err.to_string().contains("t1"));
        assert!(err.to_string().contains("502"));
        assert!(err.as_scrape_failure().is_some());
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_sqlx_error_maps_to_persistence() {
        let err: DomainError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, DomainError::PersistenceError(_)));
    }
}
