//! OpenSearch implementation of the search index provider.
//!
//! This module provides a concrete implementation of `SearchIndexProvider`
//! using OpenSearch as the backend, together with the index schema, query
//! builders, and response parsing it relies on.

mod client;
pub mod index_config;
pub mod queries;
pub mod responses;

pub use client::OpenSearchClient;
pub use index_config::{get_index_settings, INDEX_NAME};
