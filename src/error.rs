//! Error taxonomy
//!
//! Every failure the pipeline can surface to the user. The CLI layer converts
//! these into `anyhow` errors at its boundary; library code returns them
//! directly so callers can tell a whole-submission abort (unsupported format,
//! invalid range syntax) from a single-page degradation (unknown field,
//! provider error, malformed reply).

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Declared MIME type is none of pdf/docx/pptx/txt. Aborts the submission.
    #[error("unsupported file type: {mime}")]
    UnsupportedFormat { mime: String },

    /// A page-range token is not exactly two `-`-separated integers.
    /// Aborts the submission, no partial processing.
    #[error("invalid page range format: '{token}' (use the format 'start-end')")]
    InvalidRangeFormat { token: String },

    /// No prompt template for the requested subject. Skips that page only.
    #[error("no prompt template available for field: {field}")]
    UnknownField { field: String },

    /// Transport, auth, or empty-reply failure at the generation service.
    #[error("generation provider error: {message}")]
    Provider { message: String },

    /// Provider reply was not valid JSON. That page's result is dropped.
    #[error("failed to decode JSON response from the model")]
    MalformedResponse {
        #[source]
        source: serde_json::Error,
    },

    /// A format adapter could not parse its input file.
    #[error("failed to extract text from {path}: {message}")]
    Extract { path: String, message: String },

    /// DOCX emission failed.
    #[error("failed to build DOCX export: {message}")]
    Export { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
