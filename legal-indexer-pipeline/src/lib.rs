//! # Legal Indexer Pipeline
//!
//! This crate provides the pipeline components that load a collection of
//! legal documents into the search index.
//!
//! ## Architecture
//!
//! The pipeline is a single sequential job:
//!
//! 1. **Provisioner**: waits for the engine, then recreates the index with its schema
//! 2. **Source**: reads the record collection
//! 3. **Processor**: normalizes each record into an index-safe document
//! 4. **Loader**: submits documents in fixed-size bulk batches and counts outcomes
//! 5. **Verification**: runs one query to check the indexed content is searchable
//! 6. **Orchestrator**: runs the steps above in order

pub mod errors;
pub mod loader;
pub mod orchestrator;
pub mod processor;
pub mod provisioner;
pub mod retry;
pub mod source;
pub mod verification;

#[cfg(test)]
pub(crate) mod test_support;

pub use errors::PipelineError;
