//! PDF page extraction via the pdf-extract crate.

use std::path::Path;

use crate::error::{Error, Result};

/// Extract one string per PDF page.
///
/// pdf-extract returns the whole document as one string with form-feed
/// characters between pages, so the page boundaries are recovered by
/// splitting. A page with no extractable text (scanned image, blank page)
/// comes back as an empty string rather than being dropped.
pub fn extract_pages(path: &Path) -> Result<Vec<String>> {
    let bytes = std::fs::read(path).map_err(|e| Error::Extract {
        path: path.display().to_string(),
        message: format!("failed to read PDF: {e}"),
    })?;

    let text = pdf_extract::extract_text_from_mem(&bytes).map_err(|e| Error::Extract {
        path: path.display().to_string(),
        message: format!("failed to extract text from PDF: {e}"),
    })?;

    if text.trim().is_empty() {
        tracing::warn!(
            "no text extracted from PDF {:?}; it might be a scanned document",
            path
        );
        return Ok(vec![String::new()]);
    }

    Ok(split_pages(&text))
}

/// Split extracted PDF text into pages.
fn split_pages(text: &str) -> Vec<String> {
    // Form feed (\x0c) is the usual page delimiter
    let mut pages: Vec<String> = text.split('\x0c').map(|s| s.trim().to_string()).collect();

    // A trailing form feed after the last page leaves one empty tail entry
    if pages.len() > 1 && pages.last().is_some_and(|p| p.is_empty()) {
        pages.pop();
    }
    if pages.len() > 1 {
        return pages;
    }

    // Some PDFs carry textual separators instead, e.g. "--- Page 1 ---"
    let page_pattern = regex::Regex::new(r"(?m)^[\s]*[-=]+[\s]*(?:Page[\s]*)?(\d+)[\s]*[-=]+[\s]*$")
        .expect("invalid page separator regex");

    if page_pattern.is_match(text) {
        let pages: Vec<String> = page_pattern
            .split(text)
            .map(|s| s.trim().to_string())
            .collect();
        if pages.len() > 1 {
            return pages;
        }
    }

    // No separator found: the whole document is one page
    vec![text.trim().to_string()]
}

// ============================================================================
// Tests
// ============================================================================
