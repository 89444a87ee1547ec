//! In-process adapters, used by tests and ephemeral runs.

pub mod menu_repository;

pub use menu_repository::InMemoryMenuRepository;
