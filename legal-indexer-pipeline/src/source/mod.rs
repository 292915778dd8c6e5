//! Source module for the legal indexer pipeline.
//!
//! Provides the record collection the job loads.

mod file_source;

pub use file_source::{FileRecordSource, InputFormat};

use legal_indexer_shared::Record;

use crate::errors::PipelineError;

/// Supplies the full record collection at job start.
pub trait RecordSource: Send + Sync {
    /// Read every record, in collection order.
    fn load(&self) -> Result<Vec<Record>, PipelineError>;

    /// Human-readable origin for logs.
    fn describe(&self) -> String;
}

/// A collection already held in memory.
impl RecordSource for Vec<Record> {
    fn load(&self) -> Result<Vec<Record>, PipelineError> {
        Ok(self.clone())
    }

    fn describe(&self) -> String {
        format!("{} in-memory records", self.len())
    }
}
