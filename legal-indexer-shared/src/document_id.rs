//! Document identity.

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::fields::{BENTUK_SINGKAT, NOMOR, TAHUN};

/// Placeholder used when a record has no short form code.
pub const DEFAULT_SHORT_FORM: &str = "doc";

/// Index key of a legal document: `{Bentuk Singkat}_{Nomor}_{Tahun}`.
///
/// Derived only from those three metadata fields. Two different records that
/// share them get the same id, and whichever is written last replaces the
/// other in the index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    /// Derive the id from a record's metadata.
    ///
    /// Missing or `null` fields fall back to `doc` for the short form and to
    /// an empty string for number and year.
    pub fn from_metadata(metadata: Option<&Map<String, Value>>) -> Self {
        let field = |name: &str| metadata.and_then(|m| m.get(name)).and_then(render);

        let short_form = field(BENTUK_SINGKAT).unwrap_or_else(|| DEFAULT_SHORT_FORM.to_string());
        let number = field(NOMOR).unwrap_or_default();
        let year = field(TAHUN).unwrap_or_default();

        Self(format!("{}_{}_{}", short_form, number, year))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Render a metadata value as id text. `null` counts as missing.
fn render(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<DocumentId> for String {
    fn from(id: DocumentId) -> Self {
        id.0
    }
}

impl AsRef<str> for DocumentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
