//! Index settings and mappings.
//!
//! This module defines the schema of the legal document index. It never
//! varies at runtime.

use serde_json::{json, Map, Value};

use legal_indexer_shared::fields::{
    DATE_FIELDS, JUDUL, KEYWORD_FIELDS, SUMBER, TEU,
};

/// The name of the search index.
pub const INDEX_NAME: &str = "peraturan_indonesia";

/// Name of the Indonesian analyzer declared in the index settings.
pub const ANALYZER_NAME: &str = "indonesian_analyzer";

/// Accepted input layouts for the date fields, tried in order.
///
/// The first two match normalized values such as `17 August 1945`.
pub const DATE_FORMATS: [&str; 4] = [
    "d MMMM yyyy",
    "dd MMMM yyyy",
    "yyyy-MM-dd",
    "strict_date_optional_time",
];

/// Get the index settings and mappings for the legal document index.
///
/// The configuration includes:
/// - **indonesian_analyzer**: standard tokenizer, lowercase, Indonesian stop
///   words and stemming; used for titles and narrative text
/// - **Keyword fields**: categorical metadata for exact filtering
/// - **Date fields**: the three metadata dates with the layouts in [`DATE_FORMATS`]
/// - **files**: nested attachments so each file's text is matched on its own
pub fn get_index_settings() -> Value {
    json!({
        "settings": {
            "analysis": {
                "analyzer": {
                    ANALYZER_NAME: {
                        "type": "custom",
                        "tokenizer": "standard",
                        "filter": ["lowercase", "indonesian_stop", "indonesian_stemmer"]
                    }
                },
                "filter": {
                    "indonesian_stop": {
                        "type": "stop",
                        "stopwords": "_indonesian_"
                    },
                    "indonesian_stemmer": {
                        "type": "stemmer",
                        "language": "indonesian"
                    }
                }
            }
        },
        "mappings": {
            "properties": {
                "metadata": {
                    "properties": metadata_properties()
                },
                "relations": {
                    "type": "object"
                },
                "files": {
                    "type": "nested",
                    "properties": {
                        "file_id": { "type": "keyword" },
                        "filename": { "type": "text" },
                        "download_url": { "type": "text" },
                        "content": { "type": "text", "analyzer": ANALYZER_NAME }
                    }
                },
                "abstrak": analyzed_text_with_keyword(),
                "catatan": analyzed_text_with_keyword()
            }
        }
    })
}

fn metadata_properties() -> Map<String, Value> {
    let mut properties = Map::new();

    for field in KEYWORD_FIELDS {
        properties.insert(field.to_string(), json!({ "type": "keyword" }));
    }
    properties.insert(JUDUL.to_string(), json!({ "type": "text", "analyzer": ANALYZER_NAME }));
    properties.insert(TEU.to_string(), json!({ "type": "text" }));
    properties.insert(SUMBER.to_string(), json!({ "type": "text" }));

    let date_format = DATE_FORMATS.join("||");
    for field in DATE_FIELDS {
        properties.insert(
            field.to_string(),
            json!({ "type": "date", "format": date_format }),
        );
    }

    properties
}

fn analyzed_text_with_keyword() -> Value {
    json!({
        "type": "text",
        "analyzer": ANALYZER_NAME,
        "fields": {
            "keyword": { "type": "keyword" }
        }
    })
}
