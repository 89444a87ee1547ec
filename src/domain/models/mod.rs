pub mod ai_context;
pub mod config;
pub mod history;
pub mod menu;
pub mod menu_view;

pub use ai_context::{render_ai_context, render_menu_sections};
pub use config::{CacheConfig, Config, DatabaseConfig, FetcherConfig, LoggingConfig};
pub use history::{
    prepend, AttemptRecord, ScrapingHistory, DEFAULT_HISTORY_CAPACITY, MAX_HISTORY_CAPACITY,
};
pub use menu::{
    DataSource, MenuItem, MenuPatch, MenuRecord, RawMenu, RawMenuItem, DEFAULT_CATEGORY,
    MANUAL_SOURCE,
};
pub use menu_view::{MenuMetadata, MenuView};
