//! Search index provider trait definition.
//!
//! This module defines the abstract interface for the engine operations the
//! indexer needs, allowing for different backend implementations
//! (OpenSearch, Elasticsearch, test doubles).

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::SearchIndexError;
use crate::types::{BulkOutcome, BulkRequest, DeleteOutcome, EngineInfo, SearchResponse};

/// Abstracts the underlying search engine.
///
/// Implementations report engine-level outcomes only. Decisions such as which
/// failures are fatal belong to the caller.
///
/// All methods return `Result<T, SearchIndexError>` for consistent error
/// handling across backends.
#[async_trait]
pub trait SearchIndexProvider: Send + Sync {
    /// Lightweight reachability probe (`GET /`).
    ///
    /// # Returns
    ///
    /// * `Ok(EngineInfo)` - The engine answered 200 with a version string
    /// * `Err(SearchIndexError)` - The engine is unreachable or answered otherwise
    async fn ping(&self) -> Result<EngineInfo, SearchIndexError>;

    /// Check whether `index` exists (`HEAD /{index}`).
    ///
    /// Any success status means the index exists; any other status means it
    /// does not. Only transport failures are errors.
    async fn index_exists(&self, index: &str) -> Result<bool, SearchIndexError>;

    /// Delete `index` (`DELETE /{index}`).
    ///
    /// # Returns
    ///
    /// * `Ok(DeleteOutcome::Deleted)` - On 200
    /// * `Ok(DeleteOutcome::AlreadyAbsent)` - On 404
    /// * `Err(SearchIndexError::IndexDeletionError)` - On any other status
    async fn delete_index(&self, index: &str) -> Result<DeleteOutcome, SearchIndexError>;

    /// Create `index` with the given settings and mappings (`PUT /{index}`).
    async fn create_index(&self, index: &str, schema: &Value) -> Result<(), SearchIndexError>;

    /// Submit a bulk write (`POST /_bulk`).
    ///
    /// # Returns
    ///
    /// * `Ok(BulkOutcome)` - The engine accepted the request; per-document
    ///   rejections are reported inside the outcome
    /// * `Err(SearchIndexError)` - The request as a whole failed, none of its
    ///   documents should be counted as indexed
    async fn bulk_index(&self, request: &BulkRequest) -> Result<BulkOutcome, SearchIndexError>;

    /// Run a search query against `index` (`POST /{index}/_search`).
    async fn search(&self, index: &str, query: &Value) -> Result<SearchResponse, SearchIndexError>;
}
