//! Refresh coordination: reuse, refetch, or fall back.
//!
//! A refresh first looks at the tenant's current record. Recent data is
//! reused without touching the fetch collaborator. Otherwise the collaborator
//! is called under a timeout; success replaces the record's content, failure
//! only adds an entry to its history and hands back the previous record.

use chrono::Utc;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

use crate::domain::errors::{DomainError, DomainResult, ScrapeFailure};
use crate::domain::models::{
    render_ai_context, AttemptRecord, CacheConfig, Config, DataSource, MenuRecord, RawMenu,
    ScrapingHistory, DEFAULT_HISTORY_CAPACITY, MAX_HISTORY_CAPACITY,
};
use crate::domain::ports::{FetchError, MenuFetcher, MenuRepository};
use crate::domain::staleness::is_stale;

use super::tenant_locks::TenantLocks;
use super::validation::{validate_tenant_id, validate_url};

/// Freshness, history and timeout settings shared by the menu services.
#[derive(Debug, Clone)]
pub struct CachePolicy {
    /// Records younger than this are reused by non-forced refreshes
    pub short_circuit_hours: f64,
    /// Read threshold when the caller gives none
    pub default_max_age_hours: f64,
    /// Attempts retained per record, at most `MAX_HISTORY_CAPACITY`
    pub history_capacity: usize,
    /// Upper bound on one call to the fetch collaborator
    pub fetch_timeout: Duration,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            short_circuit_hours: 1.0,
            default_max_age_hours: 24.0,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            fetch_timeout: Duration::from_secs(30),
        }
    }
}

impl CachePolicy {
    pub fn from_config(config: &Config) -> Self {
        Self::from_cache_config(&config.cache, config.fetcher.timeout())
    }

    pub fn from_cache_config(cache: &CacheConfig, fetch_timeout: Duration) -> Self {
        Self {
            short_circuit_hours: cache.short_circuit_hours,
            default_max_age_hours: cache.default_max_age_hours,
            history_capacity: cache.history_capacity.clamp(1, MAX_HISTORY_CAPACITY),
            fetch_timeout,
        }
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity.clamp(1, MAX_HISTORY_CAPACITY);
        self
    }
}

/// Successful refresh outcome.
#[derive(Debug, Clone)]
pub struct Refreshed {
    pub record: MenuRecord,
    /// True when the existing record was reused without a fetch
    pub cached: bool,
}

pub struct ScrapeCoordinator<R: MenuRepository, F: MenuFetcher> {
    repository: Arc<R>,
    fetcher: Arc<F>,
    locks: Arc<TenantLocks>,
    policy: CachePolicy,
}

impl<R: MenuRepository, F: MenuFetcher> ScrapeCoordinator<R, F> {
    pub fn new(repository: Arc<R>, fetcher: Arc<F>, locks: Arc<TenantLocks>, policy: CachePolicy) -> Self {
        Self {
            repository,
            fetcher,
            locks,
            policy,
        }
    }

    pub fn policy(&self) -> &CachePolicy {
        &self.policy
    }

    /// Refresh a tenant's menu from `url`.
    ///
    /// Returns the stored record and whether it was served from cache. A fetch
    /// failure is returned as [`DomainError::ScrapeFailed`]; its
    /// [`ScrapeFailure::fallback`] holds the previous record when there is one.
    ///
    /// Concurrent refreshes of the same tenant run one at a time. A caller that
    /// waited behind a successful fetch sees the fresh record and gets it back
    /// as a cache hit instead of fetching again.
    #[instrument(skip(self))]
    pub async fn refresh(&self, tenant_id: &str, url: &str, force_refresh: bool) -> DomainResult<Refreshed> {
        validate_tenant_id(tenant_id)?;
        validate_url(url)?;
        let url = url.trim();

        let _guard = self.locks.acquire(tenant_id).await;
        let existing = self.repository.get(tenant_id).await?;

        if !force_refresh {
            if let Some(record) = existing.as_ref() {
                if !is_stale(record.last_scraped, self.policy.short_circuit_hours) {
                    debug!("serving cached menu without fetching");
                    return Ok(Refreshed {
                        record: record.clone(),
                        cached: true,
                    });
                }
            }
        }

        let started = Instant::now();
        let outcome = self.fetch_with_timeout(url).await;
        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        match outcome {
            Ok(raw) => {
                let record = build_scraped_record(
                    tenant_id,
                    url,
                    existing.as_ref(),
                    raw,
                    elapsed_ms,
                    self.policy.history_capacity,
                );
                self.repository.put(&record).await?;
                info!(
                    items = record.item_count(),
                    processing_time_ms = elapsed_ms,
                    "menu refreshed"
                );
                Ok(Refreshed { record, cached: false })
            }
            Err(error) => self.record_failure(tenant_id, url, existing, error, elapsed_ms).await,
        }
    }

    async fn fetch_with_timeout(&self, url: &str) -> Result<RawMenu, FetchError> {
        let raw = tokio::time::timeout(self.policy.fetch_timeout, self.fetcher.fetch(url))
            .await
            .map_err(|_| FetchError::Timeout(self.policy.fetch_timeout))??;

        if raw.menu_items().is_empty() {
            return Err(FetchError::NoItems);
        }
        Ok(raw)
    }

    /// Add a failed attempt to the existing record's history, if any, and
    /// report the failure with whatever can still be served.
    async fn record_failure(
        &self,
        tenant_id: &str,
        url: &str,
        existing: Option<MenuRecord>,
        error: FetchError,
        elapsed_ms: u64,
    ) -> DomainResult<Refreshed> {
        let fallback = match existing {
            Some(mut record) => {
                let attempt = AttemptRecord::failure(url, error.to_string(), elapsed_ms);
                record.scraping_history = record
                    .scraping_history
                    .with_limit(self.policy.history_capacity)
                    .prepend(attempt);
                self.repository.put(&record).await?;
                warn!(error = %error, "menu fetch failed, previous data remains available");
                Some(record)
            }
            None => {
                warn!(error = %error, "menu fetch failed with no previous data");
                None
            }
        };

        Err(DomainError::ScrapeFailed(Box::new(ScrapeFailure {
            tenant_id: tenant_id.to_string(),
            url: url.to_string(),
            error,
            fallback,
        })))
    }
}

/// Build the record stored after a successful fetch.
///
/// Items, offers and AI context are replaced outright. Descriptive fields
/// missing from the payload keep their previous values.
pub fn build_scraped_record(
    tenant_id: &str,
    url: &str,
    existing: Option<&MenuRecord>,
    raw: RawMenu,
    processing_time_ms: u64,
    history_capacity: usize,
) -> MenuRecord {
    let now = Utc::now();
    let items = raw.menu_items();
    let special_offers = raw.offers();

    let attempt = AttemptRecord::success(url, items.len(), processing_time_ms).at(now);
    let history = existing
        .map_or_else(ScrapingHistory::new, |r| r.scraping_history.clone())
        .with_limit(history_capacity)
        .prepend(attempt);

    let mut record = existing
        .cloned()
        .unwrap_or_else(|| MenuRecord::new(tenant_id, url, DataSource::Scraped));

    let RawMenu {
        name,
        ai_context_hint,
        cuisine,
        location,
        phone,
        hours,
        website,
        ..
    } = raw;

    for (field, value) in [
        (&mut record.restaurant_name, name),
        (&mut record.cuisine, cuisine),
        (&mut record.location, location),
        (&mut record.phone, phone),
        (&mut record.hours, hours),
        (&mut record.website, website),
    ] {
        if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
            *field = value.trim().to_string();
        }
    }

    record.items = items;
    record.special_offers = special_offers;
    record.source = url.to_string();
    record.data_source = DataSource::Scraped;
    record.last_scraped = Some(now);
    record.last_updated = now;
    record.scraping_history = history;
    record.ai_context = match ai_context_hint.filter(|h| !h.trim().is_empty()) {
        Some(hint) => hint,
        None => render_ai_context(&record),
    };

    record
}
