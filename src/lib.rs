//! menu-cache - per-tenant menu freshness and provenance cache
//!
//! Keeps one menu record per tenant, refreshed from an external fetch
//! collaborator or edited by hand. Every record carries where its data came
//! from and a bounded history of fetch attempts. Reads report whether the data
//! is stale against a caller-chosen threshold; a failed refresh keeps serving
//! the last good data.
//!
//! # Architecture
//!
//! This crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): models, staleness rules and port traits
//! - **Service Layer** (`services`): refresh coordination, manual overrides, per-tenant locking
//! - **Adapters** (`adapters`): SQLite and in-memory stores, HTTP and mock fetchers
//! - **Infrastructure Layer** (`infrastructure`): configuration and logging
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use menu_cache::adapters::fetchers::HttpMenuFetcher;
//! use menu_cache::adapters::memory::InMemoryMenuRepository;
//! use menu_cache::{CachePolicy, Config, MenuService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     let service = MenuService::new(
//!         Arc::new(InMemoryMenuRepository::new()),
//!         Arc::new(HttpMenuFetcher::new(&config.fetcher)?),
//!         CachePolicy::from_config(&config),
//!     );
//!
//!     let refreshed = service.refresh("bistro-42", "https://bistro.example/menu", false).await?;
//!     println!("{} items (cached: {})", refreshed.record.item_count(), refreshed.cached);
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::models::{
    AttemptRecord, Config, DataSource, MenuItem, MenuPatch, MenuRecord, MenuView, RawMenu,
    ScrapingHistory,
};
pub use domain::ports::{FetchError, MenuFetcher, MenuRepository};
pub use domain::{DomainError, DomainResult, ScrapeFailure};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{CachePolicy, MenuService, Refreshed};
