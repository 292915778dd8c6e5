//! Runtime settings read from the environment.

use std::env;
use std::path::PathBuf;

use crate::IndexingError;

/// Default engine host.
const DEFAULT_ES_HOST: &str = "localhost:9200";

/// Scheme used when `ES_HOST` carries none.
const DEFAULT_ES_SCHEME: &str = "https";

const DEFAULT_ES_USERNAME: &str = "elastic";
const DEFAULT_ES_PASSWORD: &str = "password";

/// Default input collection.
const DEFAULT_INPUT_PATH: &str = "items.json";

/// Log line layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Everything the job needs from its environment.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Engine base URL, scheme included.
    pub engine_url: String,
    pub username: String,
    pub password: String,
    pub input_path: PathBuf,
    pub log_format: LogFormat,
}

impl Settings {
    /// Read settings from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `ES_HOST`: engine host, optionally with scheme (default: localhost:9200)
    /// - `ES_SCHEME`: scheme used when `ES_HOST` has none (default: https)
    /// - `ES_USERNAME` / `ES_PASSWORD`: basic-auth credentials (default: elastic / password)
    /// - `INPUT_PATH`: record collection file (default: items.json)
    /// - `LOG_FORMAT`: `json` for JSON log lines, anything else for text
    pub fn from_env() -> Result<Self, IndexingError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read settings through `lookup`, treating empty values as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, IndexingError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let engine_url = engine_url(&var("ES_HOST", DEFAULT_ES_HOST), &var("ES_SCHEME", DEFAULT_ES_SCHEME))?;

        let log_format = if var("LOG_FORMAT", "text").eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Text
        };

        Ok(Self {
            engine_url,
            username: var("ES_USERNAME", DEFAULT_ES_USERNAME),
            password: var("ES_PASSWORD", DEFAULT_ES_PASSWORD),
            input_path: PathBuf::from(var("INPUT_PATH", DEFAULT_INPUT_PATH)),
            log_format,
        })
    }

    /// Log format alone, for setting up logging before the full settings
    /// are validated.
    pub fn log_format_from_env() -> LogFormat {
        match env::var("LOG_FORMAT") {
            Ok(value) if value.trim().eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        }
    }
}

fn engine_url(host: &str, scheme: &str) -> Result<String, IndexingError> {
    if host.contains("://") {
        return Ok(host.trim_end_matches('/').to_string());
    }

    let scheme = scheme.to_ascii_lowercase();
    if scheme != "http" && scheme != "https" {
        return Err(IndexingError::config(format!(
            "ES_SCHEME must be http or https, got {}",
            scheme
        )));
    }

    Ok(format!("{}://{}", scheme, host.trim_end_matches('/')))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> Result<Settings, IndexingError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let settings = settings(&[]).unwrap();

        assert_eq!(settings.engine_url, "https://localhost:9200");
        assert_eq!(settings.username, "elastic");
        assert_eq!(settings.password, "password");
        assert_eq!(settings.input_path, PathBuf::from("items.json"));
        assert_eq!(settings.log_format, LogFormat::Text);
    }

    #[test]
    fn test_host_without_scheme_uses_configured_scheme() {
        let settings = settings(&[("ES_HOST", "search.internal"), ("ES_SCHEME", "HTTP")]).unwrap();

        assert_eq!(settings.engine_url, "http://search.internal");
    }

    #[test]
    fn test_host_with_scheme_is_kept() {
        let settings = settings(&[("ES_HOST", "http://10.0.0.5:9200/"), ("ES_SCHEME", "https")]).unwrap();

        assert_eq!(settings.engine_url, "http://10.0.0.5:9200");
    }

    #[test]
    fn test_empty_values_fall_back_to_defaults() {
        let settings = settings(&[("ES_HOST", "  "), ("INPUT_PATH", "")]).unwrap();

        assert_eq!(settings.engine_url, "https://localhost:9200");
        assert_eq!(settings.input_path, PathBuf::from("items.json"));
    }

    #[test]
    fn test_overrides() {
        let settings = settings(&[
            ("ES_USERNAME", "indexer"),
            ("ES_PASSWORD", "s3cret"),
            ("INPUT_PATH", "/data/items.jsonl"),
            ("LOG_FORMAT", "JSON"),
        ])
        .unwrap();

        assert_eq!(settings.username, "indexer");
        assert_eq!(settings.password, "s3cret");
        assert_eq!(settings.input_path, PathBuf::from("/data/items.jsonl"));
        assert_eq!(settings.log_format, LogFormat::Json);
    }

    #[test]
    fn test_unknown_scheme_is_rejected() {
        let err = settings(&[("ES_SCHEME", "ftp")]).unwrap_err();

        assert!(matches!(err, IndexingError::ConfigError(_)));
    }
}
