//! Infrastructure adapters for external systems.

pub mod fetchers;
pub mod memory;
pub mod sqlite;
