//! Adapters for the external menu fetch collaborator.

pub mod http;
pub mod mock;

pub use http::HttpMenuFetcher;
pub use mock::{MockFetch, MockMenuFetcher};
