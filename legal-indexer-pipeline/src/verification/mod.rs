//! Verification module for the legal indexer pipeline.
//!
//! Runs one query after loading to check that indexed content is searchable.

use std::sync::Arc;

use serde_json::Value;
use tracing::{info, instrument};

use crate::errors::PipelineError;
use legal_indexer_repository::opensearch::queries::build_verification_query;
use legal_indexer_repository::{SearchHit, SearchIndexProvider};
use legal_indexer_shared::fields::JUDUL;

/// Term searched for after loading.
pub const VERIFICATION_TERM: &str = "peraturan";

/// Number of hits requested.
pub const VERIFICATION_HITS: usize = 5;

/// Title shown for hits without `metadata.Judul`.
pub const NO_TITLE: &str = "No title";

/// One hit of the verification query.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeHit {
    pub title: String,
    pub score: Option<f64>,
}

impl ProbeHit {
    fn from_hit(hit: &SearchHit) -> Self {
        let title = hit
            .source
            .get("metadata")
            .and_then(|metadata| metadata.get(JUDUL))
            .and_then(Value::as_str)
            .unwrap_or(NO_TITLE)
            .to_string();

        Self {
            title,
            score: hit.score,
        }
    }
}

/// What the verification query found.
#[derive(Debug, Clone, PartialEq)]
pub struct VerificationReport {
    /// Total documents matching the term.
    pub total: u64,
    /// Top hits in engine order.
    pub hits: Vec<ProbeHit>,
}

/// Read-only probe against the freshly loaded index.
pub struct VerificationProbe {
    client: Arc<dyn SearchIndexProvider>,
    index_name: String,
}

impl VerificationProbe {
    pub fn new(client: Arc<dyn SearchIndexProvider>, index_name: impl Into<String>) -> Self {
        Self {
            client,
            index_name: index_name.into(),
        }
    }

    #[instrument(skip(self), fields(index = %self.index_name, term = VERIFICATION_TERM))]
    pub async fn probe(&self) -> Result<VerificationReport, PipelineError> {
        let query = build_verification_query(VERIFICATION_TERM, VERIFICATION_HITS);

        let response = self
            .client
            .search(&self.index_name, &query)
            .await
            .map_err(|e| PipelineError::verification(e.to_string()))?;

        let report = VerificationReport {
            total: response.total,
            hits: response.hits.iter().map(ProbeHit::from_hit).collect(),
        };

        info!(total = report.total, "Verification query matched documents");
        for hit in &report.hits {
            match hit.score {
                Some(score) => info!(title = %hit.title, score = score, "Verification hit"),
                None => info!(title = %hit.title, "Verification hit"),
            }
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{Call, MockProvider};
    use legal_indexer_repository::SearchResponse;
    use serde_json::json;

    fn hit(source: Value, score: Option<f64>) -> SearchHit {
        SearchHit {
            id: None,
            score,
            source,
        }
    }

    #[tokio::test]
    async fn test_probe_reports_titles_and_scores() {
        let client = Arc::new(MockProvider::new().with_search_result(SearchResponse {
            total: 42,
            hits: vec![
                hit(json!({"metadata": {"Judul": "Peraturan Pemerintah 1"}}), Some(3.5)),
                hit(json!({"abstrak": "tanpa judul"}), Some(1.25)),
                hit(json!({"metadata": {"Judul": 7}}), None),
            ],
        }));

        let report = VerificationProbe::new(client.clone(), "peraturan_indonesia")
            .probe()
            .await
            .unwrap();

        assert_eq!(report.total, 42);
        assert_eq!(
            report.hits,
            vec![
                ProbeHit {
                    title: "Peraturan Pemerintah 1".to_string(),
                    score: Some(3.5)
                },
                ProbeHit {
                    title: NO_TITLE.to_string(),
                    score: Some(1.25)
                },
                ProbeHit {
                    title: NO_TITLE.to_string(),
                    score: None
                },
            ]
        );
        assert_eq!(client.calls(), vec![Call::Search("peraturan_indonesia".to_string())]);
    }

    #[tokio::test]
    async fn test_probe_failure_is_a_verification_error() {
        let client = Arc::new(MockProvider::new());

        let err = VerificationProbe::new(client, "peraturan_indonesia")
            .probe()
            .await
            .unwrap_err();

        assert!(matches!(err, PipelineError::VerificationError(_)));
    }
}
