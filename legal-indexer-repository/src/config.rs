//! Configuration types for the OpenSearch client.

use std::time::Duration;

/// Default timeout applied to every request unless the request overrides it.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for [`crate::OpenSearchClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the engine, e.g. `https://search.example.org`.
    pub url: String,
    /// HTTP Basic credentials. `None` sends unauthenticated requests.
    pub credentials: Option<(String, String)>,
    /// Transport-level request timeout.
    pub request_timeout: Duration,
}

impl ClientConfig {
    /// Create a config for the given URL with no credentials.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            credentials: None,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Authenticate with HTTP Basic credentials.
    pub fn with_basic_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.credentials = Some((username.into(), password.into()));
        self
    }
}
