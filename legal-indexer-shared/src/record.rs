//! Legal document records.
//!
//! A [`Record`] is one entry of the upstream collection exactly as it was
//! serialized. A [`NormalizedRecord`] is the same entry after its date fields
//! have been made safe for the index schema.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::document_id::DocumentId;

/// One legal document as produced by the upstream collector.
///
/// Fields are kept as raw JSON so that any JSON object is a valid record:
/// a wrong-typed value is the engine's to reject, per document, not a reason
/// to refuse the collection. An explicit `null` stays `null` on the way out;
/// only an absent key is skipped. Keys the indexer does not name are kept in
/// `extra` and written back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Registry metadata keyed by Indonesian labels (see [`crate::fields`]).
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
    /// Links to amended, revoked or related regulations. Opaque to the indexer.
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub relations: Option<Value>,
    /// Attachment descriptors (`file_id`, `filename`, `download_url`,
    /// `content`) with their extracted text.
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub files: Option<Value>,
    /// Abstract.
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub abstrak: Option<Value>,
    /// Notes.
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub catatan: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A key that is present deserializes to `Some`, even when its value is `null`.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl Record {
    /// The metadata mapping, if the record has one.
    pub fn metadata_map(&self) -> Option<&Map<String, Value>> {
        self.metadata.as_ref().and_then(Value::as_object)
    }

    /// Mutable access to the metadata mapping, if the record has one.
    pub fn metadata_map_mut(&mut self) -> Option<&mut Map<String, Value>> {
        self.metadata.as_mut().and_then(Value::as_object_mut)
    }

    /// Look up a metadata value by field name.
    pub fn metadata_value(&self, field: &str) -> Option<&Value> {
        self.metadata_map().and_then(|metadata| metadata.get(field))
    }

    /// Look up a metadata value that is a string.
    pub fn metadata_str(&self, field: &str) -> Option<&str> {
        self.metadata_value(field).and_then(Value::as_str)
    }

    /// The index key for this record.
    pub fn document_id(&self) -> DocumentId {
        DocumentId::from_metadata(self.metadata_map())
    }
}

/// A record whose date fields are either parser-ready or removed.
///
/// Serializes exactly like the wrapped [`Record`], so it can be used directly
/// as a bulk document body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct NormalizedRecord(Record);

impl NormalizedRecord {
    /// Wrap a record whose date fields have already been normalized.
    pub fn new(record: Record) -> Self {
        Self(record)
    }

    pub fn record(&self) -> &Record {
        &self.0
    }

    pub fn into_record(self) -> Record {
        self.0
    }

    pub fn document_id(&self) -> DocumentId {
        self.0.document_id()
    }
}
