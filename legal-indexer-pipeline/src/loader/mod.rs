//! Loader module for the legal indexer pipeline.
//!
//! Submits normalized documents to the search index in fixed-size bulk
//! batches and keeps count of what the engine accepted.

use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, instrument, warn};

use crate::processor::RecordProcessor;
use legal_indexer_repository::{BulkOutcome, BulkRequest, SearchIndexError, SearchIndexProvider};
use legal_indexer_shared::Record;

/// Configuration for the bulk loader.
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Number of documents per bulk request.
    pub batch_size: usize,
    /// Timeout of a single bulk request.
    pub bulk_timeout: Duration,
    /// Rejected documents logged in detail per batch.
    pub max_failure_details: usize,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            batch_size: 50,
            bulk_timeout: Duration::from_secs(60),
            max_failure_details: 3,
        }
    }
}

/// Totals of one load run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LoadSummary {
    /// Records handed to the loader.
    pub total_documents: usize,
    /// Documents the engine accepted.
    pub succeeded: usize,
    /// Bulk requests attempted.
    pub batches_submitted: usize,
    /// Batches lost entirely to a transport or serialization error.
    pub failed_batches: usize,
    pub elapsed: Duration,
}

impl LoadSummary {
    pub fn failed(&self) -> usize {
        self.total_documents.saturating_sub(self.succeeded)
    }
}

/// Loader that indexes records into the search engine.
///
/// The loader is responsible for:
/// - Normalizing each record before it is sent
/// - Splitting the collection into bulk batches, in input order
/// - Counting accepted documents and reporting rejected ones
pub struct BulkLoader {
    client: Arc<dyn SearchIndexProvider>,
    index_name: String,
    processor: RecordProcessor,
    config: LoaderConfig,
}

impl BulkLoader {
    /// Create a new bulk loader with the given client.
    pub fn new(client: Arc<dyn SearchIndexProvider>, index_name: impl Into<String>) -> Self {
        Self::with_config(client, index_name, LoaderConfig::default())
    }

    /// Create a new bulk loader with custom configuration.
    pub fn with_config(
        client: Arc<dyn SearchIndexProvider>,
        index_name: impl Into<String>,
        config: LoaderConfig,
    ) -> Self {
        Self {
            client,
            index_name: index_name.into(),
            processor: RecordProcessor::new(),
            config,
        }
    }

    /// Load every record, one bulk request per batch.
    ///
    /// Rejected documents and failed batches are logged and counted; they
    /// never stop the run.
    #[instrument(skip(self, records), fields(index = %self.index_name, record_count = records.len()))]
    pub async fn load(&self, records: &[Record]) -> LoadSummary {
        let started = Instant::now();
        let batch_size = self.config.batch_size.max(1);
        let batch_count = records.len().div_ceil(batch_size);

        let mut summary = LoadSummary {
            total_documents: records.len(),
            ..LoadSummary::default()
        };

        info!(
            total = records.len(),
            batch_size = batch_size,
            batches = batch_count,
            "Starting bulk load"
        );

        for (position, batch) in records.chunks(batch_size).enumerate() {
            let batch_number = position + 1;
            summary.batches_submitted += 1;

            match self.submit_batch(batch).await {
                Ok(outcome) => {
                    if outcome.has_failures() {
                        self.log_failures(batch_number, &outcome);
                    }
                    summary.succeeded += outcome.succeeded;

                    info!(
                        batch = %format!("{}/{}", batch_number, batch_count),
                        succeeded = outcome.succeeded,
                        attempted = outcome.attempted,
                        "Indexed batch"
                    );
                }
                Err(e) => {
                    summary.failed_batches += 1;
                    error!(
                        batch = %format!("{}/{}", batch_number, batch_count),
                        count = batch.len(),
                        error = %e,
                        "Failed to index batch"
                    );
                }
            }
        }

        summary.elapsed = started.elapsed();
        summary
    }

    /// Normalize, serialize and send one batch.
    async fn submit_batch(&self, batch: &[Record]) -> Result<BulkOutcome, SearchIndexError> {
        let mut request = BulkRequest::with_capacity(&self.index_name, batch.len())
            .with_timeout(self.config.bulk_timeout);

        for document in self.processor.process_batch(batch) {
            request.push(document.document_id(), &document)?;
        }

        debug!(count = request.len(), "Submitting bulk request");
        self.client.bulk_index(&request).await
    }

    fn log_failures(&self, batch_number: usize, outcome: &BulkOutcome) {
        warn!(
            batch = batch_number,
            failed = outcome.failed(),
            attempted = outcome.attempted,
            "Bulk request reported errors"
        );

        for failure in outcome.failures.iter().take(self.config.max_failure_details) {
            match &failure.caused_by {
                Some(cause) => warn!(
                    document_id = %failure.document_id,
                    status = failure.status,
                    category = %failure.category,
                    reason = %failure.reason,
                    caused_by = %cause,
                    "Document rejected"
                ),
                None => warn!(
                    document_id = %failure.document_id,
                    status = failure.status,
                    category = %failure.category,
                    reason = %failure.reason,
                    "Document rejected"
                ),
            }
        }

        let hidden = outcome.failed().saturating_sub(self.config.max_failure_details);
        if hidden > 0 {
            warn!("... and {} more errors not shown", hidden);
        }

        for (category, count) in outcome.failures_by_category() {
            warn!(category = category, count = count, "Rejected documents by error type");
        }
    }
}
