//! Document text extraction
//!
//! Turns an uploaded file into an ordered sequence of per-unit plain-text
//! strings. One adapter per format, all with the same contract:
//! - PDF: one string per page
//! - Word: one string per paragraph (not per visual page; downstream "page"
//!   numbering is really a paragraph index for this format)
//! - PowerPoint: one string per slide
//! - Plain text: one string per line
//!
//! The declared MIME type, not the file extension, picks the adapter.

pub mod docx;
pub mod pdf;
pub mod pptx;

use std::path::Path;

use crate::error::{Error, Result};

// ============================================================================
// Document Formats
// ============================================================================

pub const MIME_PDF: &str = "application/pdf";
pub const MIME_DOCX: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const MIME_PPTX: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation";
pub const MIME_TXT: &str = "text/plain";

/// Supported upload formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Pptx,
    Txt,
}

impl DocumentFormat {
    /// Pick the format from a declared MIME type.
    pub fn from_mime(mime: &str) -> Result<Self> {
        match mime {
            MIME_PDF => Ok(DocumentFormat::Pdf),
            MIME_DOCX => Ok(DocumentFormat::Docx),
            MIME_PPTX => Ok(DocumentFormat::Pptx),
            MIME_TXT => Ok(DocumentFormat::Txt),
            other => Err(Error::UnsupportedFormat {
                mime: other.to_string(),
            }),
        }
    }

    /// Guess the MIME type from a file extension.
    ///
    /// The CLI has no upload header to read, so it derives the declared MIME
    /// from the path and then dispatches on the MIME like everything else.
    pub fn guess_mime(path: &Path) -> Option<&'static str> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "pdf" => Some(MIME_PDF),
            "docx" => Some(MIME_DOCX),
            "pptx" => Some(MIME_PPTX),
            "txt" => Some(MIME_TXT),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "PDF",
            DocumentFormat::Docx => "DOCX",
            DocumentFormat::Pptx => "PPTX",
            DocumentFormat::Txt => "TXT",
        }
    }
}

// ============================================================================
// Document Extractor
// ============================================================================

/// Format-dispatched text extractor.
pub struct DocumentExtractor;

impl DocumentExtractor {
    /// Extract per-unit text from a file.
    ///
    /// An empty string is a valid unit: a blank PDF page and a page whose
    /// extraction yielded nothing are indistinguishable by design.
    pub fn extract(path: &Path, format: DocumentFormat) -> Result<Vec<String>> {
        match format {
            DocumentFormat::Pdf => pdf::extract_pages(path),
            DocumentFormat::Docx => docx::extract_paragraphs(path),
            DocumentFormat::Pptx => pptx::extract_slides(path),
            DocumentFormat::Txt => extract_lines(path),
        }
    }
}

/// Plain text: one unit per newline-delimited line.
fn extract_lines(path: &Path) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path).map_err(|e| Error::Extract {
        path: path.display().to_string(),
        message: format!("failed to read text file: {e}"),
    })?;
    Ok(text.lines().map(str::to_string).collect())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_format_from_mime() {
        assert_eq!(DocumentFormat::from_mime(MIME_PDF).unwrap(), DocumentFormat::Pdf);
        assert_eq!(DocumentFormat::from_mime(MIME_DOCX).unwrap(), DocumentFormat::Docx);
        assert_eq!(DocumentFormat::from_mime(MIME_PPTX).unwrap(), DocumentFormat::Pptx);
        assert_eq!(DocumentFormat::from_mime(MIME_TXT).unwrap(), DocumentFormat::Txt);
    }

    #[test]
    fn test_unsupported_mime_is_rejected() {
        let err = DocumentFormat::from_mime("image/png").unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_guess_mime_from_extension() {
        assert_eq!(DocumentFormat::guess_mime(Path::new("slides.PPTX")), Some(MIME_PPTX));
        assert_eq!(DocumentFormat::guess_mime(Path::new("notes.txt")), Some(MIME_TXT));
        assert_eq!(DocumentFormat::guess_mime(Path::new("archive.tar.gz")), None);
        assert_eq!(DocumentFormat::guess_mime(Path::new("no_extension")), None);
    }

    #[test]
    fn test_extract_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "line one\n\nline three").unwrap();

        let lines = extract_lines(file.path()).unwrap();
        assert_eq!(lines, vec!["line one", "", "line three"]);
    }

    #[test]
    fn test_extract_dispatch_on_text() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "a\nb").unwrap();

        let pages = DocumentExtractor::extract(file.path(), DocumentFormat::Txt).unwrap();
        assert_eq!(pages.len(), 2);
    }
}
