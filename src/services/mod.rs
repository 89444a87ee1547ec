pub mod manual_override;
pub mod menu_service;
pub mod scrape_coordinator;
pub mod tenant_locks;
pub mod validation;

pub use manual_override::{apply_patch, ManualOverrideService};
pub use menu_service::MenuService;
pub use scrape_coordinator::{build_scraped_record, CachePolicy, Refreshed, ScrapeCoordinator};
pub use tenant_locks::TenantLocks;
