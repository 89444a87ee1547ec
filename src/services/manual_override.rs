//! Trusted manual edits.
//!
//! Manual data always wins over automated freshness: a merged or created
//! record is reported as fresh no matter how old its last fetch is.

use chrono::Utc;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{
    render_ai_context, AttemptRecord, DataSource, MenuItem, MenuPatch, MenuRecord, MenuView,
    ScrapingHistory, MANUAL_SOURCE,
};
use crate::domain::ports::MenuRepository;

use super::tenant_locks::TenantLocks;
use super::validation::validate_tenant_id;

pub struct ManualOverrideService<R: MenuRepository> {
    repository: Arc<R>,
    locks: Arc<TenantLocks>,
    history_capacity: usize,
}

impl<R: MenuRepository> ManualOverrideService<R> {
    pub fn new(repository: Arc<R>, locks: Arc<TenantLocks>, history_capacity: usize) -> Self {
        Self {
            repository,
            locks,
            history_capacity,
        }
    }

    /// Apply a partial manual edit to an existing record.
    ///
    /// Present scalar fields overwrite; present lists replace wholesale. History
    /// and `last_scraped` are left alone.
    #[instrument(skip(self, patch))]
    pub async fn merge(&self, tenant_id: &str, mut patch: MenuPatch) -> DomainResult<MenuView> {
        validate_tenant_id(tenant_id)?;
        if let Some(items) = patch.items.take() {
            patch.items = Some(named_items(items)?);
        }

        let _guard = self.locks.acquire(tenant_id).await;
        let existing = self
            .repository
            .get(tenant_id)
            .await?
            .ok_or_else(|| DomainError::MenuNotFound(tenant_id.to_string()))?;

        let now = Utc::now();
        let record = apply_patch(existing, patch);
        let record = MenuRecord {
            last_updated: now,
            ..record
        };

        self.repository.put(&record).await?;
        info!(items = record.item_count(), "manual edit applied");
        Ok(MenuView::manual(record, now))
    }

    /// Create a record from hand-entered items. Fails if one already exists.
    #[instrument(skip(self, items), fields(submitted = items.len()))]
    pub async fn create(&self, tenant_id: &str, items: Vec<MenuItem>) -> DomainResult<MenuView> {
        validate_tenant_id(tenant_id)?;

        let items = named_items(items)?;

        let _guard = self.locks.acquire(tenant_id).await;
        if self.repository.get(tenant_id).await?.is_some() {
            return Err(DomainError::ValidationFailed(format!(
                "a menu already exists for tenant {tenant_id}; use update to change it"
            )));
        }

        let now = Utc::now();
        let seed = AttemptRecord::success(MANUAL_SOURCE, items.len(), 0).at(now);
        let mut record = MenuRecord::new(tenant_id, MANUAL_SOURCE, DataSource::Manual).with_items(items);
        record.last_scraped = Some(now);
        record.last_updated = now;
        record.scraping_history = ScrapingHistory::with_capacity(self.history_capacity).prepend(seed);
        record.ai_context = render_ai_context(&record);

        self.repository.put(&record).await?;
        info!(items = record.item_count(), "manual menu created");
        Ok(MenuView::manual(record, now))
    }
}

/// Drop items without a name; at least one must remain.
fn named_items(items: Vec<MenuItem>) -> DomainResult<Vec<MenuItem>> {
    let items: Vec<MenuItem> = items.into_iter().filter(MenuItem::has_name).collect();
    if items.is_empty() {
        return Err(DomainError::ValidationFailed(
            "at least one named menu item is required".to_string(),
        ));
    }
    Ok(items)
}

/// Shallow-merge `patch` into `record` and mark it as manual.
pub fn apply_patch(mut record: MenuRecord, patch: MenuPatch) -> MenuRecord {
    let MenuPatch {
        restaurant_name,
        cuisine,
        location,
        phone,
        hours,
        website,
        items,
        special_offers,
        ai_context,
    } = patch;

    for (field, value) in [
        (&mut record.restaurant_name, restaurant_name),
        (&mut record.cuisine, cuisine),
        (&mut record.location, location),
        (&mut record.phone, phone),
        (&mut record.hours, hours),
        (&mut record.website, website),
    ] {
        if let Some(value) = value {
            *field = value;
        }
    }

    let content_replaced = items.is_some() || special_offers.is_some();
    if let Some(items) = items {
        record.items = items;
    }
    if let Some(offers) = special_offers {
        record.special_offers = offers;
    }

    match ai_context {
        Some(context) => record.ai_context = context,
        None if content_replaced => record.ai_context = render_ai_context(&record),
        None => {}
    }

    record.data_source = DataSource::Manual;
    record
}
