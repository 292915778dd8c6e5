//! # Legal Indexer Repository
//!
//! This crate provides the interface the pipeline uses to talk to the search
//! engine, and a concrete implementation for OpenSearch/Elasticsearch over
//! HTTP. It also owns everything that depends on the engine's wire format:
//! the index schema, query bodies, and response parsing.

pub mod config;
pub mod errors;
pub mod interfaces;
pub mod opensearch;
pub mod types;

pub use config::ClientConfig;
pub use errors::SearchIndexError;
pub use interfaces::SearchIndexProvider;
pub use opensearch::OpenSearchClient;
pub use types::{
    BulkOutcome, BulkRequest, DeleteOutcome, DocumentFailure, EngineInfo, SearchHit,
    SearchResponse,
};
