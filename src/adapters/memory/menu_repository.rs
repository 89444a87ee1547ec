//! In-memory implementation of the MenuRepository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::errors::DomainResult;
use crate::domain::models::MenuRecord;
use crate::domain::ports::MenuRepository;

/// Menu repository backed by a shared `HashMap`.
///
/// Clones share the same underlying map.
#[derive(Clone, Default)]
pub struct InMemoryMenuRepository {
    records: Arc<RwLock<HashMap<String, MenuRecord>>>,
}

impl InMemoryMenuRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tenants currently stored.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl MenuRepository for InMemoryMenuRepository {
    async fn get(&self, tenant_id: &str) -> DomainResult<Option<MenuRecord>> {
        Ok(self.records.read().await.get(tenant_id).cloned())
    }

    async fn put(&self, record: &MenuRecord) -> DomainResult<()> {
        self.records
            .write()
            .await
            .insert(record.tenant_id.clone(), record.clone());
        Ok(())
    }

    async fn delete(&self, tenant_id: &str) -> DomainResult<bool> {
        Ok(self.records.write().await.remove(tenant_id).is_some())
    }
}
