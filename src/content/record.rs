//! Reply normalization
//!
//! The model is asked for a JSON object with the keys `Explanation`,
//! `Example`, `Test`, `Solution`. Replies being free text, any key may be
//! absent; deserialization substitutes a fixed per-field placeholder so a
//! record is never partially constructed. A reply that is not valid JSON at
//! all is a [`MalformedResponse`](crate::error::Error::MalformedResponse)
//! and that page's result is dropped.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// Placeholder text for absent reply fields
pub const NO_EXPLANATION: &str = "No explanation available.";
pub const NO_EXAMPLE: &str = "No example available.";
pub const NO_TEST: &str = "No test available.";
pub const NO_SOLUTION: &str = "No test solution available.";

fn default_explanation() -> String {
    NO_EXPLANATION.to_string()
}
fn default_example() -> String {
    NO_EXAMPLE.to_string()
}
fn default_test() -> String {
    NO_TEST.to_string()
}
fn default_solution() -> String {
    NO_SOLUTION.to_string()
}

/// The four fields read out of a model reply, defaulted at deserialization.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ReplyFields {
    #[serde(rename = "Explanation", default = "default_explanation")]
    pub explanation: String,
    #[serde(rename = "Example", default = "default_example")]
    pub example: String,
    #[serde(rename = "Test", default = "default_test")]
    pub test: String,
    #[serde(rename = "Solution", default = "default_solution")]
    pub solution: String,
}

/// Parse a raw provider reply into its normalized fields.
pub fn normalize(raw: &str) -> Result<ReplyFields> {
    serde_json::from_str(raw).map_err(|source| Error::MalformedResponse { source })
}

/// One processed page: 1-based page number plus the normalized reply.
///
/// Serializes with the `Page`/`Explanation`/`Example`/`Test`/`Solution` keys
/// used by the on-screen JSON block.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct GenerationRecord {
    pub page: usize,
    pub explanation: String,
    pub example: String,
    pub test: String,
    pub solution: String,
}

impl GenerationRecord {
    pub fn new(page: usize, fields: ReplyFields) -> Self {
        Self {
            page,
            explanation: fields.explanation,
            example: fields.example,
            test: fields.test,
            solution: fields.solution,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
