//! Input validation shared by the menu services.

use reqwest::Url;

use crate::domain::errors::{DomainError, DomainResult};

pub fn validate_tenant_id(tenant_id: &str) -> DomainResult<()> {
    if tenant_id.trim().is_empty() {
        return Err(DomainError::ValidationFailed("tenant id is required".to_string()));
    }
    Ok(())
}

/// A refresh needs an absolute http(s) URL.
pub fn validate_url(url: &str) -> DomainResult<()> {
    let url = url.trim();
    if url.is_empty() {
        return Err(DomainError::ValidationFailed("a URL is required to refresh a menu".to_string()));
    }

    let parsed = Url::parse(url)
        .map_err(|e| DomainError::ValidationFailed(format!("invalid URL '{url}': {e}")))?;

    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(DomainError::ValidationFailed(format!(
            "unsupported URL scheme '{other}', expected http or https"
        ))),
    }
}

pub fn validate_max_age(max_age_hours: f64) -> DomainResult<()> {
    if !max_age_hours.is_finite() || max_age_hours < 0.0 {
        return Err(DomainError::ValidationFailed(format!(
            "max age must be a non-negative number of hours, got {max_age_hours}"
        )));
    }
    Ok(())
}
