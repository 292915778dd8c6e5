//! Error types for the legal indexer repository.

mod search_index_error;

pub use search_index_error::SearchIndexError;
