//! Orchestrator module for the legal indexer pipeline.
//!
//! Coordinates the provisioner, source, loader, and verification components.

use chrono::{DateTime, Utc};
use std::time::Instant;
use tracing::{error, info, instrument};

use crate::errors::PipelineError;
use crate::loader::{BulkLoader, LoadSummary};
use crate::provisioner::IndexProvisioner;
use crate::source::RecordSource;
use crate::verification::{VerificationProbe, VerificationReport};

/// Outcome of one complete indexing job.
#[derive(Debug, Clone)]
pub struct JobReport {
    pub started_at: DateTime<Utc>,
    /// Version the engine reported on the handshake.
    pub engine_version: String,
    pub load: LoadSummary,
    /// `None` when the verification query failed.
    pub verification: Option<VerificationReport>,
}

/// Orchestrator that runs the indexing job end to end.
///
/// The orchestrator:
/// - Waits for the engine and reads the input before touching the index
/// - Recreates the index, then loads every record into it
/// - Runs the verification query and reports totals
pub struct Orchestrator {
    source: Box<dyn RecordSource>,
    provisioner: IndexProvisioner,
    loader: BulkLoader,
    probe: VerificationProbe,
}

impl Orchestrator {
    /// Create a new orchestrator with the given components.
    pub fn new(
        source: Box<dyn RecordSource>,
        provisioner: IndexProvisioner,
        loader: BulkLoader,
        probe: VerificationProbe,
    ) -> Self {
        Self {
            source,
            provisioner,
            loader,
            probe,
        }
    }

    /// Run the job.
    ///
    /// Fails only when the engine never answers, the input cannot be read,
    /// or the index cannot be recreated. Rejected documents, failed batches
    /// and a failed verification query are logged and reflected in the
    /// returned report.
    #[instrument(skip(self), fields(index = %self.provisioner.index_name()))]
    pub async fn run(&self) -> Result<JobReport, PipelineError> {
        let started_at = Utc::now();
        let started = Instant::now();
        info!(source = %self.source.describe(), "Starting legal indexer job");

        let engine = self.provisioner.connect().await?;

        let records = self.source.load()?;

        self.provisioner.provision().await?;

        let load = self.loader.load(&records).await;

        info!(
            "Successfully indexed {} out of {} documents",
            load.succeeded, load.total_documents
        );
        info!("Time taken: {:.2} seconds", load.elapsed.as_secs_f64());

        let verification = match self.probe.probe().await {
            Ok(report) => Some(report),
            Err(e) => {
                error!(error = %e, "Verification query failed");
                None
            }
        };

        info!(
            elapsed_secs = started.elapsed().as_secs_f64(),
            failed_batches = load.failed_batches,
            "Legal indexer job complete"
        );

        Ok(JobReport {
            started_at,
            engine_version: engine.version,
            load,
            verification,
        })
    }
}
