//! Menu service facade.
//!
//! Wires the refresh coordinator and the manual override path around one
//! repository and one shared lock registry, and exposes the read path.

use chrono::Utc;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{MenuItem, MenuPatch, MenuView};
use crate::domain::ports::{MenuFetcher, MenuRepository};

use super::manual_override::ManualOverrideService;
use super::scrape_coordinator::{CachePolicy, Refreshed, ScrapeCoordinator};
use super::tenant_locks::TenantLocks;
use super::validation::{validate_max_age, validate_tenant_id};

pub struct MenuService<R: MenuRepository, F: MenuFetcher> {
    repository: Arc<R>,
    locks: Arc<TenantLocks>,
    coordinator: ScrapeCoordinator<R, F>,
    manual: ManualOverrideService<R>,
    default_max_age_hours: f64,
}

impl<R: MenuRepository, F: MenuFetcher> MenuService<R, F> {
    pub fn new(repository: Arc<R>, fetcher: Arc<F>, policy: CachePolicy) -> Self {
        let locks = Arc::new(TenantLocks::new());
        let manual = ManualOverrideService::new(
            Arc::clone(&repository),
            Arc::clone(&locks),
            policy.history_capacity,
        );
        let default_max_age_hours = policy.default_max_age_hours;
        let coordinator = ScrapeCoordinator::new(Arc::clone(&repository), fetcher, Arc::clone(&locks), policy);

        Self {
            repository,
            locks,
            coordinator,
            manual,
            default_max_age_hours,
        }
    }

    pub fn policy(&self) -> &CachePolicy {
        self.coordinator.policy()
    }

    /// Read a tenant's menu with staleness evaluated against `max_age_hours`
    /// (or the configured default).
    pub async fn get(&self, tenant_id: &str, max_age_hours: Option<f64>) -> DomainResult<MenuView> {
        validate_tenant_id(tenant_id)?;
        let max_age_hours = max_age_hours.unwrap_or(self.default_max_age_hours);
        validate_max_age(max_age_hours)?;

        let record = self
            .repository
            .get(tenant_id)
            .await?
            .ok_or_else(|| DomainError::MenuNotFound(tenant_id.to_string()))?;

        Ok(MenuView::evaluate(record, max_age_hours, Utc::now()))
    }

    pub async fn refresh(&self, tenant_id: &str, url: &str, force_refresh: bool) -> DomainResult<Refreshed> {
        self.coordinator.refresh(tenant_id, url, force_refresh).await
    }

    pub async fn merge(&self, tenant_id: &str, patch: MenuPatch) -> DomainResult<MenuView> {
        self.manual.merge(tenant_id, patch).await
    }

    pub async fn create(&self, tenant_id: &str, items: Vec<MenuItem>) -> DomainResult<MenuView> {
        self.manual.create(tenant_id, items).await
    }

    /// Remove a tenant's record and history. Returns whether one existed.
    #[instrument(skip(self))]
    pub async fn delete(&self, tenant_id: &str) -> DomainResult<bool> {
        validate_tenant_id(tenant_id)?;
        let _guard = self.locks.acquire(tenant_id).await;
        let removed = self.repository.delete(tenant_id).await?;
        if removed {
            info!("menu deleted");
        }
        Ok(removed)
    }
}
