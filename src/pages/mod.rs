//! Page-range selection
//!
//! Parses the user's range expression ("4-7" or "1-2,5-5") into the concrete
//! zero-based indices to process. Endpoints are 1-based inclusive page
//! numbers as the user sees them.
//!
//! Indices are kept in token order, never deduplicated or merged: a page
//! named in two overlapping ranges is processed twice. Out-of-range indices
//! are NOT filtered here - the pipeline skips them one by one with a warning,
//! so a fully out-of-range submission still reports each skipped page.

use crate::error::{Error, Result};

/// Expand a range expression into zero-based page indices.
///
/// An empty or blank expression selects every page of the document. A
/// reversed token ("7-4") contributes nothing; a token that is not two
/// `-`-separated integers fails with [`Error::InvalidRangeFormat`] and the
/// whole submission must abort.
pub fn select(range_expr: &str, total_pages: usize) -> Result<Vec<usize>> {
    let expr = range_expr.trim();
    if expr.is_empty() {
        return Ok((0..total_pages).collect());
    }

    let mut indices = Vec::new();
    for token in expr.split(',') {
        let (start, end) = parse_token(token)?;
        // 1-based inclusive -> zero-based inclusive; reversed tokens are empty
        indices.extend(start.saturating_sub(1)..end);
    }
    Ok(indices)
}

/// Parse one `start-end` token into its 1-based endpoints.
fn parse_token(token: &str) -> Result<(usize, usize)> {
    let invalid = || Error::InvalidRangeFormat {
        token: token.trim().to_string(),
    };

    let mut parts = token.trim().splitn(2, '-');
    let start = parts
        .next()
        .and_then(|s| s.trim().parse::<usize>().ok())
        .ok_or_else(invalid)?;
    let end = parts
        .next()
        .and_then(|s| s.trim().parse::<usize>().ok())
        .ok_or_else(invalid)?;

    // Page numbers are 1-based; 0 can never name a page
    if start == 0 || end == 0 {
        return Err(invalid());
    }
    Ok((start, end))
}

// ============================================================================
// Tests
// ============================================================================
