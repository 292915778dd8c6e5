//! Record processor implementation.
//!
//! Rewrites the Indonesian date fields of a record so the engine's date
//! parser accepts them, and removes the ones it never could.

use serde_json::{Map, Value};
use tracing::{debug, instrument, warn};

use legal_indexer_shared::fields::DATE_FIELDS;
use legal_indexer_shared::{NormalizedRecord, Record};

/// Indonesian month names and their English equivalents, in the order they
/// are substituted.
pub const MONTH_NAMES: [(&str, &str); 12] = [
    ("Januari", "January"),
    ("Februari", "February"),
    ("Maret", "March"),
    ("April", "April"),
    ("Mei", "May"),
    ("Juni", "June"),
    ("Juli", "July"),
    ("Agustus", "August"),
    ("September", "September"),
    ("Oktober", "October"),
    ("November", "November"),
    ("Desember", "December"),
];

/// Replace every Indonesian month name in `value` with its English name.
///
/// Pure substring substitution: no other character is touched and the
/// result is not checked for being a valid date.
pub fn translate_month_names(value: &str) -> String {
    let mut translated = value.to_string();
    for (indonesian, english) in MONTH_NAMES {
        if translated.contains(indonesian) {
            translated = translated.replace(indonesian, english);
        }
    }
    translated
}

/// Processor that turns raw records into index-safe documents.
///
/// The processor is responsible for:
/// - Rewriting month names in the three metadata date fields
/// - Dropping date fields that are empty or not strings
/// - Leaving every other field exactly as it was
#[derive(Debug, Default)]
pub struct RecordProcessor {}

impl RecordProcessor {
    /// Create a new record processor.
    pub fn new() -> Self {
        Self {}
    }

    /// Normalize a batch of records, preserving their order.
    #[instrument(skip(self, records), fields(record_count = records.len()))]
    pub fn process_batch(&self, records: &[Record]) -> Vec<NormalizedRecord> {
        let processed: Vec<NormalizedRecord> =
            records.iter().map(|record| self.process(record)).collect();

        debug!(processed_count = processed.len(), "Processed record batch");
        processed
    }

    /// Normalize a single record.
    ///
    /// The input is left untouched; a record without metadata comes back
    /// unchanged.
    pub fn process(&self, record: &Record) -> NormalizedRecord {
        let mut normalized = record.clone();

        if let Some(metadata) = normalized.metadata_map_mut() {
            for field in DATE_FIELDS {
                normalize_date_field(metadata, field);
            }
        }

        NormalizedRecord::new(normalized)
    }
}

fn normalize_date_field(metadata: &mut Map<String, Value>, field: &str) {
    let rewritten = match metadata.get(field) {
        None => return,
        Some(Value::String(raw)) if !raw.is_empty() => rewrite_date(raw),
        Some(other) => {
            debug!(field = field, value = %other, "Dropping empty or non-string date field");
            None
        }
    };

    match rewritten {
        Some(value) => {
            metadata.insert(field.to_string(), Value::String(value));
        }
        None => {
            if let Some(Value::String(raw)) = metadata.remove(field) {
                if !raw.is_empty() {
                    warn!(field = field, value = %raw, "Could not rewrite date field, dropping it");
                }
            }
        }
    }
}

/// Trim and translate a raw date. `None` when nothing usable remains.
fn rewrite_date(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(translate_month_names(trimmed))
}
