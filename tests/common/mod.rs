//! Common test utilities for integration tests
//!
//! Provides shared fixtures and helpers used across multiple integration
//! test files.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tempfile::TempDir;

use menu_cache::adapters::fetchers::{MockFetch, MockMenuFetcher};
use menu_cache::adapters::memory::InMemoryMenuRepository;
use menu_cache::{CachePolicy, MenuRecord, MenuRepository, MenuService};

pub const MENU_URL: &str = "https://bistro.example/menu";

pub type MemoryService = MenuService<InMemoryMenuRepository, MockMenuFetcher>;

/// Create a temporary directory for test isolation
pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Create a temporary test database path
///
/// Returns the path to a SQLite database file in a temporary directory.
pub fn temp_db_path() -> (TempDir, PathBuf) {
    let dir = temp_dir();
    let db_path = dir.path().join("menus.db");
    (dir, db_path)
}

/// Setup test logging
///
/// Initializes a tracing subscriber writing to the test output.
pub fn setup_test_logging() {
    use tracing_subscriber::fmt;

    let _ = fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Policy with a short fetch timeout so hung-fetch tests finish quickly.
pub fn test_policy() -> CachePolicy {
    CachePolicy::default().with_fetch_timeout(Duration::from_millis(200))
}

/// In-memory service plus handles on its repository and fetcher.
pub fn memory_service(
    fetcher: MockMenuFetcher,
) -> (MemoryService, Arc<InMemoryMenuRepository>, Arc<MockMenuFetcher>) {
    let repo = Arc::new(InMemoryMenuRepository::new());
    let fetcher = Arc::new(fetcher);
    let service = MenuService::new(Arc::clone(&repo), Arc::clone(&fetcher), test_policy());
    (service, repo, fetcher)
}

/// Fetcher that always returns a menu named `name` with `count` items.
pub fn menu_fetcher(name: &str, count: usize) -> MockMenuFetcher {
    MockMenuFetcher::new(MockFetch::items(name, count))
}

/// Move a stored record's last successful fetch `hours` into the past.
pub async fn backdate<R: MenuRepository>(repo: &R, tenant_id: &str, hours: i64) -> MenuRecord {
    let mut record = repo
        .get(tenant_id)
        .await
        .expect("repository read failed")
        .expect("record should exist");
    record.last_scraped = Some(Utc::now() - chrono::Duration::hours(hours));
    repo.put(&record).await.expect("repository write failed");
    record
}
