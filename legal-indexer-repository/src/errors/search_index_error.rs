//! Search index error types.
//!
//! This module defines the error types that can occur while talking to the
//! search engine.

use thiserror::Error;

/// Errors that can occur during search index operations.
#[derive(Debug, Clone, Error)]
pub enum SearchIndexError {
    /// The engine could not be reached, or the request failed in transit.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Deleting the index failed.
    #[error("Index deletion error: {0}")]
    IndexDeletionError(String),

    /// Creating the index with its schema failed.
    #[error("Index creation error: {0}")]
    IndexCreationError(String),

    /// The engine rejected a bulk request as a whole.
    #[error("Bulk operation error: {0}")]
    BulkOperationError(String),

    /// A search request was rejected.
    #[error("Query error: {0}")]
    QueryError(String),

    /// The engine answered with a body we could not interpret.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// A document could not be serialized into the bulk payload.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl SearchIndexError {
    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create an index deletion error.
    pub fn index_deletion(msg: impl Into<String>) -> Self {
        Self::IndexDeletionError(msg.into())
    }

    /// Create an index creation error.
    pub fn index_creation(msg: impl Into<String>) -> Self {
        Self::IndexCreationError(msg.into())
    }

    /// Create a bulk operation error.
    pub fn bulk_operation(msg: impl Into<String>) -> Self {
        Self::BulkOperationError(msg.into())
    }

    /// Create a query error.
    pub fn query(msg: impl Into<String>) -> Self {
        Self::QueryError(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }

    /// Create a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::SerializationError(msg.into())
    }
}
