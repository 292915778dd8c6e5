//! Query builders.

use serde_json::{json, Value};

/// Text fields the post-load check searches.
pub const VERIFICATION_FIELDS: [&str; 3] = ["abstrak", "files.content", "catatan"];

/// Build a query that matches `term` in any of `fields`.
///
/// Each field gets its own `match` clause inside a `bool.should`, so a
/// document scores for every field that contains the term.
pub fn build_any_field_query(term: &str, fields: &[&str], size: usize) -> Value {
    let should: Vec<Value> = fields
        .iter()
        .map(|field| json!({ "match": { *field: term } }))
        .collect();

    json!({
        "query": {
            "bool": {
                "should": should
            }
        },
        "size": size
    })
}

/// Build the verification query for `term` over [`VERIFICATION_FIELDS`].
pub fn build_verification_query(term: &str, size: usize) -> Value {
    build_any_field_query(term, &VERIFICATION_FIELDS, size)
}
