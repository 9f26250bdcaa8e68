//! interactify - per-page lesson generator
//!
//! Extracts text from a document (PDF, DOCX, PPTX, or plain text), sends each
//! selected page to the Gemini API with a subject-specific instructional
//! prompt, and collects the structured replies (explanation, example, test,
//! solution) into exportable result batches.

pub mod cli;
pub mod content;
pub mod error;
pub mod extractor;
pub mod generation;
pub mod pages;
pub mod pipeline;
pub mod prompt;

// Re-exports
pub use content::{
    emit, normalize, GenerationRecord, ReplyFields, ResultBatch, SessionHistory, EXPORT_FILE_NAME,
    EXPORT_MIME,
};
pub use error::{Error, Result};
pub use extractor::{DocumentExtractor, DocumentFormat};
pub use generation::{get_api_key, has_api_key, GeminiClient, GenerationProvider, EMPTY_REPLY};
pub use pipeline::{ask, run_submission, SubmissionOutcome};
pub use prompt::{Field, ALL_FIELDS};
