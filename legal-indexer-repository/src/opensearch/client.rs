//! OpenSearch client implementation.
//!
//! This module provides the concrete implementation of `SearchIndexProvider`
//! using the OpenSearch Rust client. The endpoints it uses are shared with
//! Elasticsearch, so the same client loads either engine.

use async_trait::async_trait;
use opensearch::{
    auth::Credentials,
    http::{
        response::Response,
        transport::{SingleNodeConnectionPool, TransportBuilder},
    },
    indices::{IndicesCreateParts, IndicesDeleteParts, IndicesExistsParts},
    BulkParts, OpenSearch, SearchParts,
};
use serde_json::Value;
use tracing::{debug, error, info, instrument};
use url::Url;

use crate::config::ClientConfig;
use crate::errors::SearchIndexError;
use crate::interfaces::SearchIndexProvider;
use crate::opensearch::responses::{parse_bulk_response, parse_engine_info, parse_search_response};
use crate::types::{BulkOutcome, BulkRequest, DeleteOutcome, EngineInfo, SearchResponse};

/// Longest slice of an error body kept in error messages.
const MAX_ERROR_BODY_CHARS: usize = 500;

/// OpenSearch client implementation.
///
/// # Example
///
/// ```ignore
/// use legal_indexer_repository::{ClientConfig, OpenSearchClient, SearchIndexProvider};
///
/// let config = ClientConfig::new("https://localhost:9200").with_basic_auth("elastic", "secret");
/// let client = OpenSearchClient::new(config).await?;
/// let info = client.ping().await?;
/// println!("Connected to {}", info.version);
/// ```
pub struct OpenSearchClient {
    client: OpenSearch,
}

impl OpenSearchClient {
    /// Create a new client for the engine described by `config`.
    ///
    /// No request is sent; use [`SearchIndexProvider::ping`] to check
    /// reachability.
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchClient)` - A new client instance
    /// * `Err(SearchIndexError)` - If the URL is invalid or the transport cannot be built
    pub async fn new(config: ClientConfig) -> Result<Self, SearchIndexError> {
        let parsed_url =
            Url::parse(&config.url).map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let mut builder = TransportBuilder::new(conn_pool)
            .disable_proxy()
            .timeout(config.request_timeout);
        if let Some((username, password)) = config.credentials.clone() {
            builder = builder.auth(Credentials::Basic(username, password));
        }
        let transport = builder
            .build()
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let client = OpenSearch::new(transport);

        info!(
            url = %config.url,
            authenticated = config.credentials.is_some(),
            timeout_secs = config.request_timeout.as_secs(),
            "Created OpenSearch client"
        );

        Ok(Self { client })
    }

    /// Read a response body as JSON.
    async fn json_body(response: Response) -> Result<Value, SearchIndexError> {
        response
            .json::<Value>()
            .await
            .map_err(|e| SearchIndexError::parse(e.to_string()))
    }

    /// Read an error body, shortened for logs and error messages.
    async fn error_body(response: Response) -> String {
        let body = response.text().await.unwrap_or_default();
        truncate_chars(&body, MAX_ERROR_BODY_CHARS)
    }
}

/// Keep at most `max` characters of `text`, marking the cut with `...`.
fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

#[async_trait]
impl SearchIndexProvider for OpenSearchClient {
    async fn ping(&self) -> Result<EngineInfo, SearchIndexError> {
        let response = self
            .client
            .info()
            .send()
            .await
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = Self::error_body(response).await;
            return Err(SearchIndexError::connection(format!(
                "Ping failed with status {}: {}",
                status, error_body
            )));
        }

        let body = Self::json_body(response).await?;
        parse_engine_info(&body)
    }

    #[instrument(skip(self))]
    async fn index_exists(&self, index: &str) -> Result<bool, SearchIndexError> {
        let response = self
            .client
            .indices()
            .exists(IndicesExistsParts::Index(&[index]))
            .send()
            .await
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let status = response.status_code();
        debug!(status = %status, "Index existence check");
        Ok(status.is_success())
    }

    #[instrument(skip(self))]
    async fn delete_index(&self, index: &str) -> Result<DeleteOutcome, SearchIndexError> {
        let response = self
            .client
            .indices()
            .delete(IndicesDeleteParts::Index(&[index]))
            .send()
            .await
            .map_err(|e| SearchIndexError::index_deletion(e.to_string()))?;

        let status = response.status_code();

        // 404 is acceptable - the index may already be gone
        if status.as_u16() == 404 {
            debug!("Index already absent");
            return Ok(DeleteOutcome::AlreadyAbsent);
        }
        if !status.is_success() {
            let error_body = Self::error_body(response).await;
            error!(status = %status, body = %error_body, "Delete index request failed");
            return Err(SearchIndexError::index_deletion(format!(
                "Delete failed with status {}: {}",
                status, error_body
            )));
        }

        debug!("Index deleted");
        Ok(DeleteOutcome::Deleted)
    }

    #[instrument(skip(self, schema))]
    async fn create_index(&self, index: &str, schema: &Value) -> Result<(), SearchIndexError> {
        let response = self
            .client
            .indices()
            .create(IndicesCreateParts::Index(index))
            .body(schema.clone())
            .send()
            .await
            .map_err(|e| SearchIndexError::index_creation(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = Self::error_body(response).await;
            error!(status = %status, body = %error_body, "Create index request failed");
            return Err(SearchIndexError::index_creation(format!(
                "Create failed with status {}: {}",
                status, error_body
            )));
        }

        debug!("Index created");
        Ok(())
    }

    async fn bulk_index(&self, request: &BulkRequest) -> Result<BulkOutcome, SearchIndexError> {
        if request.is_empty() {
            return Ok(BulkOutcome::all_succeeded(0));
        }

        // Each line is sent followed by a newline, so the body ends with one
        let mut bulk = self
            .client
            .bulk(BulkParts::None)
            .body(request.lines().to_vec());
        if let Some(timeout) = request.timeout() {
            bulk = bulk.request_timeout(timeout);
        }

        let response = bulk
            .send()
            .await
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = Self::error_body(response).await;
            return Err(SearchIndexError::bulk_operation(format!(
                "Bulk request failed with status {}: {}",
                status, error_body
            )));
        }

        let body = Self::json_body(response).await?;
        let outcome = parse_bulk_response(&body, request.len())?;

        debug!(
            index = request.index(),
            attempted = outcome.attempted,
            succeeded = outcome.succeeded,
            failed = outcome.failed(),
            "Bulk request completed"
        );
        Ok(outcome)
    }

    #[instrument(skip(self, query))]
    async fn search(&self, index: &str, query: &Value) -> Result<SearchResponse, SearchIndexError> {
        let response = self
            .client
            .search(SearchParts::Index(&[index]))
            .body(query.clone())
            .send()
            .await
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = Self::error_body(response).await;
            return Err(SearchIndexError::query(format!(
                "Search failed with status {}: {}",
                status, error_body
            )));
        }

        let body = Self::json_body(response).await?;
        parse_search_response(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_chars_short_text() {
        assert_eq!(truncate_chars("index_not_found", 500), "index_not_found");
    }

    #[test]
    fn test_truncate_chars_respects_char_boundaries() {
        let text = "é".repeat(600);

        let truncated = truncate_chars(&text, 500);
        assert_eq!(truncated.chars().count(), 503);
        assert!(truncated.ends_with("..."));
    }

    #[tokio::test]
    async fn test_new_rejects_invalid_url() {
        let result = OpenSearchClient::new(ClientConfig::new("not a url")).await;

        assert!(matches!(result, Err(SearchIndexError::ConnectionError(_))));
    }

    #[tokio::test]
    async fn test_new_with_basic_auth() {
        let config = ClientConfig::new("https://localhost:9200").with_basic_auth("elastic", "password");

        assert!(OpenSearchClient::new(config).await.is_ok());
    }

    #[tokio::test]
    async fn test_empty_bulk_request_is_not_sent() {
        let client = OpenSearchClient::new(ClientConfig::new("http://127.0.0.1:1"))
            .await
            .unwrap();

        let outcome = client.bulk_index(&BulkRequest::new("idx")).await.unwrap();
        assert_eq!(outcome.attempted, 0);
    }
}
