//! Session history
//!
//! In-memory, append-only log of result batches, owned by the interactive
//! session and discarded with it. Unbounded by design: a session lives for
//! one shell run and nothing persists across sessions.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::record::GenerationRecord;

/// The full set of generated records from one submission.
#[derive(Debug, Clone, Serialize)]
pub struct ResultBatch {
    /// Subject field the submission was generated under.
    pub field: String,
    /// Display name of the processed file.
    pub source: String,
    pub created_at: DateTime<Utc>,
    pub records: Vec<GenerationRecord>,
}

impl ResultBatch {
    pub fn new(field: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            source: source.into(),
            created_at: Utc::now(),
            records: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Ordered, append-only batch log for one session.
#[derive(Debug, Default)]
pub struct SessionHistory {
    batches: Vec<ResultBatch>,
}

impl SessionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, batch: ResultBatch) {
        self.batches.push(batch);
    }

    /// All batches, oldest first.
    pub fn all(&self) -> &[ResultBatch] {
        &self.batches
    }

    /// Look up one entry by its 1-based position.
    pub fn entry(&self, number: usize) -> Option<&ResultBatch> {
        number.checked_sub(1).and_then(|i| self.batches.get(i))
    }

    pub fn len(&self) -> usize {
        self.batches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::record::ReplyFields;

    fn batch_with_pages(pages: &[usize]) -> ResultBatch {
        let mut batch = ResultBatch::new("Law", "lecture.pdf");
        for &page in pages {
            let fields: ReplyFields = serde_json::from_str("{}").unwrap();
            batch.records.push(GenerationRecord::new(page, fields));
        }
        batch
    }

    #[test]
    fn test_append_preserves_order() {
        let mut history = SessionHistory::new();
        assert!(history.is_empty());

        history.append(batch_with_pages(&[1]));
        history.append(batch_with_pages(&[2, 3]));

        assert_eq!(history.len(), 2);
        assert_eq!(history.all()[0].records.len(), 1);
        assert_eq!(history.all()[1].records.len(), 2);
    }

    #[test]
    fn test_entry_is_one_based() {
        let mut history = SessionHistory::new();
        history.append(batch_with_pages(&[7]));

        assert!(history.entry(0).is_none());
        assert_eq!(history.entry(1).unwrap().records[0].page, 7);
        assert!(history.entry(2).is_none());
    }

    #[test]
    fn test_empty_batches_are_still_recorded() {
        // a fully out-of-range submission appends an empty batch, matching
        // the processed-run count the user saw
        let mut history = SessionHistory::new();
        history.append(batch_with_pages(&[]));
        assert_eq!(history.len(), 1);
        assert!(history.all()[0].is_empty());
    }
}
