//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines async trait interfaces that infrastructure adapters must implement:
//! - MenuRepository: authoritative per-tenant record store
//! - MenuFetcher: external collaborator that fetches and parses menus
//!
//! These traits define the contracts that allow the domain to be independent
//! of specific infrastructure implementations.

pub mod menu_fetcher;
pub mod menu_repository;

pub use menu_fetcher::{FetchError, MenuFetcher};
pub use menu_repository::MenuRepository;
