//! Per-tenant mutual exclusion.
//!
//! Every mutation of a tenant's record (refresh, manual merge, manual create,
//! delete) runs while holding that tenant's lock. Tenants never contend with
//! each other.

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex, PoisonError};
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Registry of async mutexes keyed by tenant id.
#[derive(Debug, Default)]
pub struct TenantLocks {
    locks: StdMutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl TenantLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `tenant_id`. Released when the guard drops.
    pub async fn acquire(&self, tenant_id: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            // Entries only referenced by the map have no holder and no waiter.
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            Arc::clone(locks.entry(tenant_id.to_string()).or_default())
        };
        lock.lock_owned().await
    }

    /// Number of tenants with a live lock entry.
    pub fn tracked(&self) -> usize {
        self.locks.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_same_tenant_is_exclusive() {
        let locks = Arc::new(TenantLocks::new());
        let guard = locks.acquire("t1").await;

        let contender = {
            let locks = Arc::clone(&locks);
            tokio::spawn(async move {
                let _guard = locks.acquire("t1").await;
            })
        };

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!contender.is_finished());

        drop(guard);
        tokio::time::timeout(Duration::from_secs(1), contender)
            .await
            .expect("contender should acquire after release")
            .unwrap();
    }

    #[tokio::test]
    async fn test_different_tenants_do_not_block() {
        let locks = TenantLocks::new();
        let _a = locks.acquire("a").await;
        let b = tokio::time::timeout(Duration::from_millis(100), locks.acquire("b")).await;
        assert!(b.is_ok());
    }

    #[tokio::test]
    async fn test_idle_entries_are_pruned() {
        let locks = TenantLocks::new();
        drop(locks.acquire("a").await);
        drop(locks.acquire("b").await);
        let _c = locks.acquire("c").await;

        assert_eq!(locks.tracked(), 1);
    }
}
