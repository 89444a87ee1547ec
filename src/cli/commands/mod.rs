//! CLI command implementations.

pub mod menu;
