//! Request and response types for search index operations.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::Serialize;
use serde_json::{json, Value};

use crate::errors::SearchIndexError;

/// What the engine reported about itself on the reachability probe.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineInfo {
    /// Engine version, e.g. `8.13.4`.
    pub version: String,
    /// Cluster name, when reported.
    pub cluster_name: Option<String>,
}

/// Result of deleting an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The index existed and was removed.
    Deleted,
    /// There was no index to remove (HTTP 404).
    AlreadyAbsent,
}

/// A bulk-write payload in the engine's newline-delimited format.
///
/// Every document contributes two lines: an `index` action naming the target
/// index and document id, followed by the document itself. Documents keep the
/// order in which they were pushed.
#[derive(Debug, Clone)]
pub struct BulkRequest {
    index: String,
    lines: Vec<String>,
    document_ids: Vec<String>,
    timeout: Option<Duration>,
}

impl BulkRequest {
    /// Create an empty request targeting `index`.
    pub fn new(index: impl Into<String>) -> Self {
        Self {
            index: index.into(),
            lines: Vec::new(),
            document_ids: Vec::new(),
            timeout: None,
        }
    }

    /// Create an empty request with room for `documents` documents.
    pub fn with_capacity(index: impl Into<String>, documents: usize) -> Self {
        Self {
            index: index.into(),
            lines: Vec::with_capacity(documents * 2),
            document_ids: Vec::with_capacity(documents),
            timeout: None,
        }
    }

    /// Use a request timeout other than the client default.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Append an index action for `document` under `id`.
    ///
    /// Nothing is appended if the document fails to serialize.
    pub fn push<T: Serialize>(
        &mut self,
        id: impl Into<String>,
        document: &T,
    ) -> Result<(), SearchIndexError> {
        let id = id.into();
        let body = serde_json::to_string(document).map_err(|e| {
            SearchIndexError::serialization(format!("document {}: {}", id, e))
        })?;
        let action = json!({ "index": { "_index": self.index, "_id": id } }).to_string();

        self.lines.push(action);
        self.lines.push(body);
        self.document_ids.push(id);
        Ok(())
    }

    pub fn index(&self) -> &str {
        &self.index
    }

    /// Number of documents in the request.
    pub fn len(&self) -> usize {
        self.document_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.document_ids.is_empty()
    }

    /// Document ids in submission order.
    pub fn document_ids(&self) -> &[String] {
        &self.document_ids
    }

    /// Serialized lines without their terminating newlines.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// The full request body: every line terminated by `\n`.
    pub fn to_ndjson(&self) -> String {
        let mut body = String::with_capacity(self.lines.iter().map(|l| l.len() + 1).sum());
        for line in &self.lines {
            body.push_str(line);
            body.push('\n');
        }
        body
    }
}

/// A document the engine refused inside an otherwise accepted bulk request.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentFailure {
    /// Id of the rejected document, or `unknown` if the engine omitted it.
    pub document_id: String,
    /// HTTP status reported for the item.
    pub status: u16,
    /// Engine error type, e.g. `mapper_parsing_exception`.
    pub category: String,
    /// Human-readable reason.
    pub reason: String,
    /// Reason of the underlying cause, when the engine reports one.
    pub caused_by: Option<String>,
}

/// Per-batch result of a bulk write.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BulkOutcome {
    /// Documents submitted.
    pub attempted: usize,
    /// Documents the engine accepted.
    pub succeeded: usize,
    /// Rejected documents in response order.
    pub failures: Vec<DocumentFailure>,
}

impl BulkOutcome {
    /// Every submitted document was accepted.
    pub fn all_succeeded(attempted: usize) -> Self {
        Self {
            attempted,
            succeeded: attempted,
            failures: Vec::new(),
        }
    }

    /// Some documents were rejected; the rest count as accepted.
    pub fn with_failures(attempted: usize, failures: Vec<DocumentFailure>) -> Self {
        Self {
            attempted,
            succeeded: attempted.saturating_sub(failures.len()),
            failures,
        }
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Number of failures per error category.
    pub fn failures_by_category(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for failure in &self.failures {
            *counts.entry(failure.category.as_str()).or_insert(0) += 1;
        }
        counts
    }
}

/// A single search hit.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub id: Option<String>,
    /// Relevance score; `None` when the engine did not score the hit.
    pub score: Option<f64>,
    /// The stored document.
    pub source: Value,
}

/// Parsed search response.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchResponse {
    /// Total number of matching documents.
    pub total: u64,
    pub hits: Vec<SearchHit>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failure(id: &str, category: &str) -> DocumentFailure {
        DocumentFailure {
            document_id: id.to_string(),
            status: 400,
            category: category.to_string(),
            reason: "failed to parse".to_string(),
            caused_by: None,
        }
    }

    #[test]
    fn test_bulk_request_wire_format() {
        let mut request = BulkRequest::new("peraturan_indonesia");
        request.push("UU_1_2020", &json!({"abstrak": "a"})).unwrap();
        request.push("UU_2_2020", &json!({"abstrak": "b"})).unwrap();

        let body = request.to_ndjson();
        let lines: Vec<&str> = body.split_terminator('\n').collect();

        assert!(body.ends_with('\n'));
        assert_eq!(lines.len(), 4);
        assert_eq!(
            serde_json::from_str::<Value>(lines[0]).unwrap(),
            json!({"index": {"_index": "peraturan_indonesia", "_id": "UU_1_2020"}})
        );
        assert_eq!(
            serde_json::from_str::<Value>(lines[1]).unwrap(),
            json!({"abstrak": "a"})
        );
        assert_eq!(
            serde_json::from_str::<Value>(lines[2]).unwrap()["index"]["_id"],
            "UU_2_2020"
        );
        assert_eq!(request.document_ids(), ["UU_1_2020", "UU_2_2020"]);
        assert_eq!(request.len(), 2);
    }

    #[test]
    fn test_bulk_request_keeps_documents_on_one_line() {
        let mut request = BulkRequest::new("idx");
        request
            .push("x", &json!({"content": "baris pertama\nbaris kedua"}))
            .unwrap();

        assert_eq!(request.to_ndjson().matches('\n').count(), 2);
    }

    #[test]
    fn test_empty_bulk_request() {
        let request = BulkRequest::new("idx").with_timeout(Duration::from_secs(60));

        assert!(request.is_empty());
        assert_eq!(request.to_ndjson(), "");
        assert_eq!(request.timeout(), Some(Duration::from_secs(60)));
    }

    #[test]
    fn test_bulk_outcome_counts() {
        let outcome = BulkOutcome::with_failures(
            50,
            vec![
                failure("a", "mapper_parsing_exception"),
                failure("b", "mapper_parsing_exception"),
                failure("c", "illegal_argument_exception"),
            ],
        );

        assert_eq!(outcome.succeeded, 47);
        assert_eq!(outcome.failed(), 3);
        let counts = outcome.failures_by_category();
        assert_eq!(counts.get("mapper_parsing_exception"), Some(&2));
        assert_eq!(counts.get("illegal_argument_exception"), Some(&1));
    }

    #[test]
    fn test_bulk_outcome_never_negative() {
        let outcome = BulkOutcome::with_failures(1, vec![failure("a", "x"), failure("b", "x")]);

        assert_eq!(outcome.succeeded, 0);
    }
}
