//! Menu repository port.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::MenuRecord;

/// Repository interface for menu record persistence.
///
/// A plain keyed store: one record per tenant, full overwrites only. Freshness,
/// merging and history policy live in the services built on top of it.
#[async_trait]
pub trait MenuRepository: Send + Sync {
    /// Get the record for a tenant.
    async fn get(&self, tenant_id: &str) -> DomainResult<Option<MenuRecord>>;

    /// Insert or fully replace the record keyed by `record.tenant_id`.
    async fn put(&self, record: &MenuRecord) -> DomainResult<()>;

    /// Remove a tenant's record and its history. Returns whether one existed.
    async fn delete(&self, tenant_id: &str) -> DomainResult<bool>;
}
