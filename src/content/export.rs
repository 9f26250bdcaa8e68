//! DOCX export
//!
//! Renders a result batch into a downloadable Word document: a title heading,
//! then per record a page heading and four labeled paragraphs. Pure and
//! deterministic - the only output is the returned byte stream.

use std::io::Cursor;

use docx_rs::{BreakType, Docx, Paragraph, Run};

use crate::error::{Error, Result};

use super::history::ResultBatch;
use super::record::{NO_EXAMPLE, NO_EXPLANATION, NO_SOLUTION, NO_TEST};

/// Default download filename.
pub const EXPORT_FILE_NAME: &str = "generated_content.docx";

/// MIME type of the emitted document.
pub const EXPORT_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Render a batch as DOCX bytes.
pub fn emit(batch: &ResultBatch) -> Result<Vec<u8>> {
    let mut docx = Docx::new().add_paragraph(heading("Generated Content", "Heading1"));

    for record in &batch.records {
        docx = docx
            .add_paragraph(heading(&format!("Page {}", record.page), "Heading2"))
            .add_paragraph(labeled("Explanation:", &record.explanation, NO_EXPLANATION))
            .add_paragraph(labeled("Example:", &record.example, NO_EXAMPLE))
            .add_paragraph(labeled("Test:", &record.test, NO_TEST))
            .add_paragraph(labeled("Solution:", &record.solution, NO_SOLUTION))
            // blank line between records
            .add_paragraph(Paragraph::new());
    }

    let mut cursor = Cursor::new(Vec::new());
    docx.build().pack(&mut cursor).map_err(|e| Error::Export {
        message: format!("{e:?}"),
    })?;
    Ok(cursor.into_inner())
}

fn heading(text: &str, style: &str) -> Paragraph {
    Paragraph::new()
        .add_run(Run::new().add_text(text))
        .style(style)
}

/// Bold label, line break, field text (or the field's placeholder if empty).
fn labeled(label: &str, value: &str, placeholder: &str) -> Paragraph {
    let value = if value.is_empty() { placeholder } else { value };
    Paragraph::new()
        .add_run(Run::new().add_text(label).bold())
        .add_run(Run::new().add_break(BreakType::TextWrapping).add_text(value))
}

// ============================================================================
// Tests
// ============================================================================
