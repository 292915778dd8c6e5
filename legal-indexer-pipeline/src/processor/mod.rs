//! Processor module for the legal indexer pipeline.
//!
//! Transforms raw records into documents the index schema accepts.

mod record_processor;

pub use record_processor::{translate_month_names, RecordProcessor, MONTH_NAMES};
