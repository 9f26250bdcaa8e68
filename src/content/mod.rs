//! Generated content - normalized records, session history, DOCX export
//!
//! - record: parse the provider's raw reply into a fixed-shape record,
//!   placeholder-filling any missing field
//! - history: session-lifetime append-only log of result batches
//! - export: render a batch into downloadable DOCX bytes

mod export;
mod history;
mod record;

// Re-exports
pub use export::{emit, EXPORT_FILE_NAME, EXPORT_MIME};
pub use history::{ResultBatch, SessionHistory};
pub use record::{
    normalize, GenerationRecord, ReplyFields, NO_EXAMPLE, NO_EXPLANATION, NO_SOLUTION, NO_TEST,
};
