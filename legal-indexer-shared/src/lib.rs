//! # Legal Indexer Shared
//!
//! Data model shared by the repository and pipeline crates: the input
//! [`Record`], its normalized form, the derived [`DocumentId`], and the
//! metadata field names the schema and the normalizer agree on.

pub mod document_id;
pub mod fields;
pub mod record;

pub use document_id::DocumentId;
pub use record::{NormalizedRecord, Record};
