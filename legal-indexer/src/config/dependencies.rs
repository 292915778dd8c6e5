//! Dependency initialization and wiring for the legal indexer.

use std::sync::Arc;
use tracing::info;

use crate::config::Settings;
use crate::IndexingError;
use legal_indexer_pipeline::{
    loader::BulkLoader, orchestrator::Orchestrator, provisioner::IndexProvisioner,
    source::FileRecordSource, verification::VerificationProbe,
};
use legal_indexer_repository::opensearch::{get_index_settings, INDEX_NAME};
use legal_indexer_repository::{ClientConfig, OpenSearchClient, SearchIndexProvider};

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The configured orchestrator ready to run.
    pub orchestrator: Orchestrator,
}

impl Dependencies {
    /// Build every component from `settings`.
    ///
    /// No request is sent to the engine here; the orchestrator's handshake
    /// is the first contact.
    pub async fn new(settings: &Settings) -> Result<Self, IndexingError> {
        info!(
            engine_url = %settings.engine_url,
            username = %settings.username,
            input_path = %settings.input_path.display(),
            index = INDEX_NAME,
            "Initializing dependencies"
        );

        let client_config = ClientConfig::new(&settings.engine_url)
            .with_basic_auth(&settings.username, &settings.password);

        let search_client = OpenSearchClient::new(client_config)
            .await
            .map_err(|e| IndexingError::config(format!("Failed to create search client: {}", e)))?;
        let client: Arc<dyn SearchIndexProvider> = Arc::new(search_client);

        let source = FileRecordSource::new(&settings.input_path);
        let provisioner = IndexProvisioner::new(client.clone(), INDEX_NAME, get_index_settings());
        let loader = BulkLoader::new(client.clone(), INDEX_NAME);
        let probe = VerificationProbe::new(client, INDEX_NAME);

        let orchestrator = Orchestrator::new(Box::new(source), provisioner, loader, probe);

        Ok(Self { orchestrator })
    }
}
