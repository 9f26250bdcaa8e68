//! Word document extraction via docx-rs.
//!
//! Word has no fixed page geometry in the file, so the extraction unit is the
//! paragraph: downstream page numbering is really a paragraph index for this
//! format. Documented limitation, inherited from the design.

use std::path::Path;

use docx_rs::{read_docx, DocumentChild, ParagraphChild, RunChild};

use crate::error::{Error, Result};

/// Extract one string per paragraph, in document order.
///
/// Runs within a paragraph are concatenated with no separator since they are
/// parts of the same sentence. Empty paragraphs are preserved as empty
/// strings so paragraph numbering stays aligned with the source document.
pub fn extract_paragraphs(path: &Path) -> Result<Vec<String>> {
    let bytes = std::fs::read(path).map_err(|e| Error::Extract {
        path: path.display().to_string(),
        message: format!("failed to read DOCX: {e}"),
    })?;

    let docx = read_docx(&bytes).map_err(|e| Error::Extract {
        path: path.display().to_string(),
        message: format!("failed to parse DOCX: {e:?}"),
    })?;

    let mut paragraphs = Vec::new();
    for child in &docx.document.children {
        if let DocumentChild::Paragraph(para) = child {
            paragraphs.push(paragraph_text(para));
        }
    }
    Ok(paragraphs)
}

/// Collect the text of every run in a paragraph.
fn paragraph_text(para: &docx_rs::Paragraph) -> String {
    let mut text = String::new();
    for child in &para.children {
        if let ParagraphChild::Run(run) = child {
            for run_child in &run.children {
                if let RunChild::Text(t) = run_child {
                    text.push_str(&t.text);
                }
            }
        }
    }
    text
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_reports_extract_error() {
        let err = extract_paragraphs(Path::new("/nonexistent/lecture.docx")).unwrap_err();
        assert!(matches!(err, Error::Extract { .. }));
    }

    #[test]
    fn test_garbage_bytes_report_extract_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, b"not a zip archive").unwrap();

        let err = extract_paragraphs(file.path()).unwrap_err();
        assert!(matches!(err, Error::Extract { .. }));
    }
}
