//! Error types for the legal indexer pipeline.

use legal_indexer_repository::SearchIndexError;
use thiserror::Error;

/// Errors that can occur in the pipeline.
///
/// Every variant ends the job. Failures the job recovers from (rejected
/// documents, failed batches, a failed verification query) are logged and
/// counted instead of being returned.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The engine never answered the reachability probe.
    #[error("Engine unreachable after {attempts} attempts: {last_error}")]
    ConnectionExhausted {
        attempts: u32,
        last_error: SearchIndexError,
    },

    /// The record collection could not be read.
    #[error("Input error: {0}")]
    InputError(String),

    /// The index could not be recreated with its schema.
    #[error("Provisioning error: {0}")]
    ProvisioningError(String),

    /// The verification query failed.
    #[error("Verification error: {0}")]
    VerificationError(String),

    /// Error from the search engine.
    #[error("Search error: {0}")]
    SearchError(#[from] SearchIndexError),
}

impl PipelineError {
    /// Create an input error.
    pub fn input(msg: impl Into<String>) -> Self {
        Self::InputError(msg.into())
    }

    /// Create a provisioning error.
    pub fn provisioning(msg: impl Into<String>) -> Self {
        Self::ProvisioningError(msg.into())
    }

    /// Create a verification error.
    pub fn verification(msg: impl Into<String>) -> Self {
        Self::VerificationError(msg.into())
    }
}
