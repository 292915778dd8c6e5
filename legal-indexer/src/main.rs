//! Legal indexer entry point.
//!
//! Recreates the `peraturan_indonesia` index and bulk-loads the record
//! collection into it. Exits with status 1 when the job cannot run to
//! completion; rejected documents alone never fail the job.

use std::error::Error;
use std::process;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use legal_indexer::config::LogFormat;
use legal_indexer::{Dependencies, IndexingError, Settings};

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
}

async fn run() -> Result<(), IndexingError> {
    let settings = Settings::from_env()?;
    let dependencies = Dependencies::new(&settings).await?;

    let report = dependencies.orchestrator.run().await?;

    info!(
        started_at = %report.started_at,
        engine_version = %report.engine_version,
        indexed = report.load.succeeded,
        total = report.load.total_documents,
        failed_batches = report.load.failed_batches,
        verified = report.verification.is_some(),
        "Indexing finished"
    );
    Ok(())
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    init_tracing(Settings::log_format_from_env());

    if let Err(e) = run().await {
        error!(error = %e, "Indexing failed");
        eprintln!("Error: {}", e);

        let mut source = e.source();
        while let Some(err) = source {
            eprintln!("  Caused by: {}", err);
            source = err.source();
        }

        process::exit(1);
    }
}
