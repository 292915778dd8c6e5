//! Scriptable in-memory `SearchIndexProvider` shared by the pipeline tests.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use legal_indexer_repository::{
    BulkOutcome, BulkRequest, DeleteOutcome, DocumentFailure, EngineInfo, SearchIndexError,
    SearchIndexProvider, SearchResponse,
};

/// How the mock answers one bulk request.
#[derive(Debug, Clone)]
pub enum BulkScript {
    /// Every document accepted.
    Accept,
    /// Reject the documents at these positions within the batch.
    Reject(Vec<usize>),
    /// Fail the whole request at transport level.
    TransportError,
}

/// Provider calls in the order they were made.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Ping,
    Exists(String),
    Delete(String),
    Create(String),
    Bulk(Vec<String>),
    Search(String),
}

#[derive(Default)]
pub struct MockProvider {
    pub ping_failures: Mutex<u32>,
    pub index_present: bool,
    pub fail_exists: bool,
    pub fail_delete: bool,
    pub fail_create: bool,
    pub bulk_script: Mutex<VecDeque<BulkScript>>,
    pub search_result: Option<SearchResponse>,
    pub calls: Mutex<Vec<Call>>,
    pub schemas: Mutex<Vec<Value>>,
    pub bodies: Mutex<Vec<Vec<String>>>,
    pub bulk_timeouts: Mutex<Vec<Option<Duration>>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ping_failures(self, failures: u32) -> Self {
        *self.ping_failures.lock().unwrap() = failures;
        self
    }

    pub fn with_existing_index(mut self) -> Self {
        self.index_present = true;
        self
    }

    pub fn with_bulk_script(self, script: Vec<BulkScript>) -> Self {
        *self.bulk_script.lock().unwrap() = script.into();
        self
    }

    pub fn with_search_result(mut self, response: SearchResponse) -> Self {
        self.search_result = Some(response);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Document ids of every bulk request, one entry per batch.
    pub fn bulk_batches(&self) -> Vec<Vec<String>> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Bulk(ids) => Some(ids),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl SearchIndexProvider for MockProvider {
    async fn ping(&self) -> Result<EngineInfo, SearchIndexError> {
        self.record(Call::Ping);
        let mut remaining = self.ping_failures.lock().unwrap();
        if *remaining > 0 {
            *remaining -= 1;
            return Err(SearchIndexError::connection("connection refused"));
        }
        Ok(EngineInfo {
            version: "8.13.4".to_string(),
            cluster_name: Some("test".to_string()),
        })
    }

    async fn index_exists(&self, index: &str) -> Result<bool, SearchIndexError> {
        self.record(Call::Exists(index.to_string()));
        if self.fail_exists {
            return Err(SearchIndexError::connection("connection reset"));
        }
        Ok(self.index_present)
    }

    async fn delete_index(&self, index: &str) -> Result<DeleteOutcome, SearchIndexError> {
        self.record(Call::Delete(index.to_string()));
        if self.fail_delete {
            return Err(SearchIndexError::index_deletion("Status 403: forbidden"));
        }
        Ok(DeleteOutcome::Deleted)
    }

    async fn create_index(&self, index: &str, schema: &Value) -> Result<(), SearchIndexError> {
        self.record(Call::Create(index.to_string()));
        if self.fail_create {
            return Err(SearchIndexError::index_creation(
                "Status 400: resource_already_exists_exception",
            ));
        }
        self.schemas.lock().unwrap().push(schema.clone());
        Ok(())
    }

    async fn bulk_index(&self, request: &BulkRequest) -> Result<BulkOutcome, SearchIndexError> {
        let ids = request.document_ids().to_vec();
        self.record(Call::Bulk(ids.clone()));
        self.bodies.lock().unwrap().push(request.lines().to_vec());
        self.bulk_timeouts.lock().unwrap().push(request.timeout());

        let script = self
            .bulk_script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(BulkScript::Accept);

        match script {
            BulkScript::Accept => Ok(BulkOutcome::all_succeeded(ids.len())),
            BulkScript::Reject(positions) => {
                let failures = positions
                    .into_iter()
                    .filter_map(|position| ids.get(position))
                    .map(|id| DocumentFailure {
                        document_id: id.clone(),
                        status: 400,
                        category: "mapper_parsing_exception".to_string(),
                        reason: "failed to parse field [metadata.Tanggal Berlaku]".to_string(),
                        caused_by: Some("unparseable date".to_string()),
                    })
                    .collect();
                Ok(BulkOutcome::with_failures(ids.len(), failures))
            }
            BulkScript::TransportError => {
                Err(SearchIndexError::bulk_operation("Status 502: bad gateway"))
            }
        }
    }

    async fn search(&self, index: &str, _query: &Value) -> Result<SearchResponse, SearchIndexError> {
        self.record(Call::Search(index.to_string()));
        self.search_result
            .clone()
            .ok_or_else(|| SearchIndexError::query("Status 503: no shards available"))
    }
}
