//! Response parsing.
//!
//! Everything that depends on the shape of the engine's JSON answers lives
//! here, so the rest of the crate deals only with the typed results in
//! [`crate::types`].

use serde_json::Value;

use crate::errors::SearchIndexError;
use crate::types::{BulkOutcome, DocumentFailure, EngineInfo, SearchHit, SearchResponse};

/// Status assumed for a bulk item that carries none.
const MISSING_ITEM_STATUS: u64 = 500;

/// Parse the body of `GET /`.
///
/// A version string at `version.number` is required.
pub fn parse_engine_info(body: &Value) -> Result<EngineInfo, SearchIndexError> {
    let version = body
        .get("version")
        .and_then(|v| v.get("number"))
        .and_then(Value::as_str)
        .ok_or_else(|| SearchIndexError::parse("Engine info is missing version.number"))?;

    Ok(EngineInfo {
        version: version.to_string(),
        cluster_name: body
            .get("cluster_name")
            .and_then(Value::as_str)
            .map(str::to_string),
    })
}

/// Parse the body of an accepted `POST /_bulk` for `attempted` documents.
///
/// When the top-level `errors` flag is unset every document counts as
/// indexed. Otherwise each item whose `index.status` is 400 or above is a
/// failure, and everything else counts as indexed. A body that reports
/// errors without an `items` array cannot be attributed and is an error.
pub fn parse_bulk_response(body: &Value, attempted: usize) -> Result<BulkOutcome, SearchIndexError> {
    let has_errors = body.get("errors").and_then(Value::as_bool).unwrap_or(false);
    if !has_errors {
        return Ok(BulkOutcome::all_succeeded(attempted));
    }

    let items = body.get("items").and_then(Value::as_array).ok_or_else(|| {
        SearchIndexError::parse("Bulk response reports errors but has no items array")
    })?;

    let failures: Vec<DocumentFailure> =
        items.iter().filter_map(parse_bulk_item_failure).collect();

    Ok(BulkOutcome::with_failures(attempted, failures))
}

/// Extract the failure of a single bulk item, if it failed.
fn parse_bulk_item_failure(item: &Value) -> Option<DocumentFailure> {
    let result = item.get("index");
    let status = result
        .and_then(|r| r.get("status"))
        .and_then(Value::as_u64)
        .unwrap_or(MISSING_ITEM_STATUS);

    if status < 400 {
        return None;
    }

    let document_id = result
        .and_then(|r| r.get("_id"))
        .and_then(Value::as_str)
        .unwrap_or("unknown")
        .to_string();

    let (category, reason, caused_by) = match result.and_then(|r| r.get("error")) {
        Some(Value::Object(error)) => (
            error
                .get("type")
                .and_then(Value::as_str)
                .unwrap_or("unknown")
                .to_string(),
            error
                .get("reason")
                .and_then(Value::as_str)
                .unwrap_or("No reason provided")
                .to_string(),
            error
                .get("caused_by")
                .and_then(|c| c.get("reason"))
                .and_then(Value::as_str)
                .filter(|r| !r.is_empty())
                .map(str::to_string),
        ),
        Some(Value::String(details)) => ("unknown".to_string(), details.clone(), None),
        Some(Value::Null) | None => (
            "unknown".to_string(),
            "No reason provided".to_string(),
            None,
        ),
        Some(other) => ("unknown".to_string(), other.to_string(), None),
    };

    Some(DocumentFailure {
        document_id,
        status: u16::try_from(status).unwrap_or(u16::MAX),
        category,
        reason,
        caused_by,
    })
}

/// Parse the body of a `_search` response.
///
/// Reads `hits.total.value`, falling back to a plain numeric `hits.total`
/// as returned by older engines.
pub fn parse_search_response(body: &Value) -> Result<SearchResponse, SearchIndexError> {
    let hits = body
        .get("hits")
        .ok_or_else(|| SearchIndexError::parse("Search response is missing hits"))?;

    let total = hits
        .get("total")
        .and_then(|t| t.get("value").and_then(Value::as_u64).or_else(|| t.as_u64()))
        .unwrap_or(0);

    let hits = hits
        .get("hits")
        .and_then(Value::as_array)
        .map(|hits| hits.iter().map(parse_hit).collect())
        .unwrap_or_default();

    Ok(SearchResponse { total, hits })
}

fn parse_hit(hit: &Value) -> SearchHit {
    SearchHit {
        id: hit.get("_id").and_then(Value::as_str).map(str::to_string),
        score: hit.get("_score").and_then(Value::as_f64),
        source: hit.get("_source").cloned().unwrap_or(Value::Null),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ok_item(id: &str) -> Value {
        json!({"index": {"_index": "peraturan_indonesia", "_id": id, "status": 201, "result": "created"}})
    }

    fn date_error_item(id: &str) -> Value {
        json!({"index": {
            "_index": "peraturan_indonesia",
            "_id": id,
            "status": 400,
            "error": {
                "type": "document_parsing_exception",
                "reason": "[1:120] failed to parse field [metadata.Tanggal Berlaku] of type [date]",
                "caused_by": {
                    "type": "illegal_argument_exception",
                    "reason": "failed to parse date field [31 Juni 2020]"
                }
            }
        }})
    }

    #[test]
    fn test_parse_engine_info() {
        let body = json!({
            "name": "node-1",
            "cluster_name": "lexin",
            "version": {"number": "8.13.4", "build_flavor": "default"},
            "tagline": "You Know, for Search"
        });

        let info = parse_engine_info(&body).unwrap();
        assert_eq!(info.version, "8.13.4");
        assert_eq!(info.cluster_name.as_deref(), Some("lexin"));
    }

    #[test]
    fn test_parse_engine_info_without_version() {
        let result = parse_engine_info(&json!({"name": "node-1"}));

        assert!(matches!(result, Err(SearchIndexError::ParseError(_))));
    }

    #[test]
    fn test_parse_bulk_response_without_errors() {
        let body = json!({"took": 30, "errors": false, "items": [ok_item("a"), ok_item("b")]});

        let outcome = parse_bulk_response(&body, 2).unwrap();
        assert_eq!(outcome, BulkOutcome::all_succeeded(2));
    }

    #[test]
    fn test_parse_bulk_response_two_failures_of_fifty() {
        let items: Vec<Value> = (0..50)
            .map(|i| match i {
                7 => date_error_item("UU_7_2020"),
                31 => date_error_item("PP_31_2019"),
                _ => ok_item(&format!("UU_{}_2020", i)),
            })
            .collect();
        let body = json!({"took": 12, "errors": true, "items": items});

        let outcome = parse_bulk_response(&body, 50).unwrap();

        assert_eq!(outcome.attempted, 50);
        assert_eq!(outcome.succeeded, 48);
        assert_eq!(outcome.failed(), 2);
        assert_eq!(outcome.failures[0].document_id, "UU_7_2020");
        assert_eq!(outcome.failures[1].document_id, "PP_31_2019");
        assert_eq!(outcome.failures[0].status, 400);
        assert_eq!(outcome.failures[0].category, "document_parsing_exception");
        assert_eq!(
            outcome.failures[0].caused_by.as_deref(),
            Some("failed to parse date field [31 Juni 2020]")
        );
    }

    #[test]
    fn test_parse_bulk_item_with_string_error() {
        let body = json!({"errors": true, "items": [
            {"index": {"_id": "x", "status": 429, "error": "rejected execution"}}
        ]});

        let outcome = parse_bulk_response(&body, 1).unwrap();
        let failure = &outcome.failures[0];
        assert_eq!(failure.category, "unknown");
        assert_eq!(failure.reason, "rejected execution");
        assert!(failure.caused_by.is_none());
    }

    #[test]
    fn test_parse_bulk_item_without_status_is_failure() {
        let body = json!({"errors": true, "items": [{"index": {"_id": "x"}}, {"create": {}}]});

        let outcome = parse_bulk_response(&body, 2).unwrap();
        assert_eq!(outcome.failed(), 2);
        assert_eq!(outcome.failures[0].status, 500);
        assert_eq!(outcome.failures[0].reason, "No reason provided");
        assert_eq!(outcome.failures[1].document_id, "unknown");
        assert_eq!(outcome.succeeded, 0);
    }

    #[test]
    fn test_parse_bulk_response_errors_flag_without_failed_items() {
        let body = json!({"errors": true, "items": [ok_item("a")]});

        let outcome = parse_bulk_response(&body, 1).unwrap();
        assert_eq!(outcome.succeeded, 1);
        assert!(!outcome.has_failures());
    }

    #[test]
    fn test_parse_bulk_response_errors_flag_without_items_is_error() {
        for body in [json!({"errors": true}), json!({"errors": true, "items": "n/a"})] {
            let result = parse_bulk_response(&body, 50);

            assert!(matches!(result, Err(SearchIndexError::ParseError(_))));
        }
    }

    #[test]
    fn test_parse_search_response() {
        let body = json!({
            "hits": {
                "total": {"value": 42, "relation": "eq"},
                "max_score": 3.2,
                "hits": [
                    {"_id": "UU_11_2020", "_score": 3.2, "_source": {"metadata": {"Judul": "Cipta Kerja"}}},
                    {"_id": "PP_5_2021", "_score": 1.1, "_source": {}}
                ]
            }
        });

        let response = parse_search_response(&body).unwrap();
        assert_eq!(response.total, 42);
        assert_eq!(response.hits.len(), 2);
        assert_eq!(response.hits[0].id.as_deref(), Some("UU_11_2020"));
        assert_eq!(response.hits[0].score, Some(3.2));
        assert_eq!(response.hits[0].source["metadata"]["Judul"], "Cipta Kerja");
    }

    #[test]
    fn test_parse_search_response_legacy_total() {
        let body = json!({"hits": {"total": 7, "hits": [{"_id": "a", "_score": null}]}});

        let response = parse_search_response(&body).unwrap();
        assert_eq!(response.total, 7);
        assert!(response.hits[0].score.is_none());
        assert!(response.hits[0].source.is_null());
    }

    #[test]
    fn test_parse_search_response_without_hits() {
        let result = parse_search_response(&json!({"error": "boom"}));

        assert!(matches!(result, Err(SearchIndexError::ParseError(_))));
    }
}
