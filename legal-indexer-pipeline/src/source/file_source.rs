//! File-backed record source.
//!
//! The collector exports the collection as JSON. Two layouts are accepted:
//! one JSON array holding every record, or one record per line
//! (`.jsonl` / `.ndjson`).

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info, warn};

use legal_indexer_shared::Record;

use super::RecordSource;
use crate::errors::PipelineError;

/// Layout of the input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// A single JSON array.
    JsonArray,
    /// One JSON record per line.
    JsonLines,
}

impl InputFormat {
    /// Pick the layout from the file extension.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("jsonl") || ext.eq_ignore_ascii_case("ndjson") => {
                Self::JsonLines
            }
            _ => Self::JsonArray,
        }
    }
}

/// Reads the record collection from a local file.
#[derive(Debug, Clone)]
pub struct FileRecordSource {
    path: PathBuf,
    format: InputFormat,
}

impl FileRecordSource {
    /// Create a source for `path`, inferring the layout from its extension.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let format = InputFormat::from_path(&path);
        Self { path, format }
    }

    fn open(&self) -> Result<BufReader<File>, PipelineError> {
        let file = File::open(&self.path).map_err(|e| {
            PipelineError::input(format!("Failed to open {}: {}", self.path.display(), e))
        })?;
        Ok(BufReader::new(file))
    }

    fn load_array(&self) -> Result<Vec<Record>, PipelineError> {
        let entries: Vec<Value> = serde_json::from_reader(self.open()?).map_err(|e| {
            PipelineError::input(format!("Failed to parse {}: {}", self.path.display(), e))
        })?;

        Ok(entries
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| self.to_record(entry, "entry", index + 1))
            .collect())
    }

    fn load_lines(&self) -> Result<Vec<Record>, PipelineError> {
        let mut records = Vec::new();

        for (index, line) in self.open()?.lines().enumerate() {
            let line = line.map_err(|e| {
                PipelineError::input(format!("Failed to read {}: {}", self.path.display(), e))
            })?;
            if line.trim().is_empty() {
                continue;
            }

            let entry: Value = serde_json::from_str(&line).map_err(|e| {
                PipelineError::input(format!(
                    "Failed to parse {} line {}: {}",
                    self.path.display(),
                    index + 1,
                    e
                ))
            })?;
            records.extend(self.to_record(entry, "line", index + 1));
        }

        Ok(records)
    }

    /// Well-formed JSON that is not a record (e.g. a bare string) is skipped.
    fn to_record(&self, entry: Value, unit: &str, position: usize) -> Option<Record> {
        match serde_json::from_value(entry) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    position = %format!("{} {}", unit, position),
                    error = %e,
                    "Skipping unreadable record"
                );
                None
            }
        }
    }
}

impl RecordSource for FileRecordSource {
    fn load(&self) -> Result<Vec<Record>, PipelineError> {
        debug!(path = %self.path.display(), format = ?self.format, "Reading record collection");

        let records = match self.format {
            InputFormat::JsonArray => self.load_array()?,
            InputFormat::JsonLines => self.load_lines()?,
        };

        info!(path = %self.path.display(), records = records.len(), "Loaded record collection");
        Ok(records)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
