//! Provisioner module for the legal indexer pipeline.
//!
//! Waits for the engine to answer, then recreates the target index from
//! scratch so every run starts from an empty index with the current schema.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::errors::PipelineError;
use crate::retry::{retry, RetryPolicy};
use legal_indexer_repository::{DeleteOutcome, EngineInfo, SearchIndexProvider};

/// Recreates the target index.
pub struct IndexProvisioner {
    client: Arc<dyn SearchIndexProvider>,
    index_name: String,
    schema: Value,
    handshake: RetryPolicy,
}

impl IndexProvisioner {
    /// Create a provisioner with the default handshake budget.
    pub fn new(client: Arc<dyn SearchIndexProvider>, index_name: impl Into<String>, schema: Value) -> Self {
        Self {
            client,
            index_name: index_name.into(),
            schema,
            handshake: RetryPolicy::default(),
        }
    }

    /// Use a different handshake budget.
    pub fn with_handshake(mut self, policy: RetryPolicy) -> Self {
        self.handshake = policy;
        self
    }

    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    /// Probe the engine until it answers or the handshake budget runs out.
    #[instrument(skip(self))]
    pub async fn connect(&self) -> Result<EngineInfo, PipelineError> {
        let client = &self.client;

        let engine = retry(self.handshake, |attempt| async move {
            debug!(attempt = attempt, "Probing search engine");
            client.ping().await
        })
        .await
        .map_err(|exhausted| PipelineError::ConnectionExhausted {
            attempts: exhausted.attempts,
            last_error: exhausted.last_error,
        })?;

        info!(
            version = %engine.version,
            cluster = engine.cluster_name.as_deref().unwrap_or("unknown"),
            "Connected to search engine"
        );
        Ok(engine)
    }

    /// Drop the index if present and create it again with the schema.
    ///
    /// On success the index exists and holds no documents.
    #[instrument(skip(self), fields(index = %self.index_name))]
    pub async fn provision(&self) -> Result<(), PipelineError> {
        let exists = self.client.index_exists(&self.index_name).await.map_err(|e| {
            PipelineError::provisioning(format!(
                "Failed to check index {}: {}",
                self.index_name, e
            ))
        })?;

        if exists {
            info!("Deleting existing index");
            match self.client.delete_index(&self.index_name).await {
                Ok(DeleteOutcome::Deleted) => info!("Deleted existing index"),
                Ok(DeleteOutcome::AlreadyAbsent) => debug!("Index vanished before deletion"),
                Err(e) => {
                    return Err(PipelineError::provisioning(format!(
                        "Failed to delete index {}: {}",
                        self.index_name, e
                    )))
                }
            }
        }

        self.client
            .create_index(&self.index_name, &self.schema)
            .await
            .map_err(|e| {
                PipelineError::provisioning(format!(
                    "Failed to create index {}: {}",
                    self.index_name, e
                ))
            })?;

        info!("Created index");
        Ok(())
    }
}
