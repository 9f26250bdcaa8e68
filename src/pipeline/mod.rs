//! Submission pipeline
//!
//! The per-run control flow: select the requested page indices, then for each
//! one build the prompt, call the generation provider, normalize the reply,
//! and accumulate a result batch. Sequential and blocking by design - one
//! provider call at a time, no parallelism across pages, no cancellation.
//!
//! Error policy (who aborts, who degrades):
//! - invalid range syntax aborts the whole submission before any page runs
//! - an out-of-range index is skipped with a warning, the walk continues
//! - an unknown field skips that page before the provider is called
//! - a malformed (non-JSON) reply drops that page's record; the page still
//!   counts as processed

use crate::content::{normalize, GenerationRecord, ResultBatch};
use crate::error::Result;
use crate::generation::GenerationProvider;
use crate::{pages, prompt};

/// What one submission produced.
#[derive(Debug)]
pub struct SubmissionOutcome {
    pub batch: ResultBatch,
    /// User-visible warnings, in the order they occurred.
    pub warnings: Vec<String>,
    /// Pages that reached the provider (records dropped for malformed
    /// replies are still counted here).
    pub processed: usize,
}

/// Run one submission over already-extracted pages.
pub async fn run_submission(
    provider: &dyn GenerationProvider,
    pages_text: &[String],
    field: &str,
    range_expr: &str,
    source: &str,
) -> Result<SubmissionOutcome> {
    let indices = pages::select(range_expr, pages_text.len())?;

    let mut batch = ResultBatch::new(field, source);
    let mut warnings = Vec::new();
    let mut processed = 0;

    for index in indices {
        let page_number = index + 1;

        let Some(page_text) = pages_text.get(index) else {
            let message = format!("Page {page_number} is out of range.");
            tracing::warn!("{message}");
            warnings.push(message);
            continue;
        };

        let prompt = match prompt::build(field, page_text) {
            Ok(prompt) => prompt,
            Err(e) => {
                tracing::warn!("skipping page {page_number}: {e}");
                warnings.push(e.to_string());
                continue;
            }
        };

        let raw = provider.generate(&prompt).await;
        processed += 1;

        match normalize(&raw) {
            Ok(fields) => batch.records.push(GenerationRecord::new(page_number, fields)),
            Err(e) => {
                tracing::error!("page {page_number}: {e}");
                warnings.push(format!("Page {page_number}: {e}"));
            }
        }
    }

    Ok(SubmissionOutcome {
        batch,
        warnings,
        processed,
    })
}

/// Free-form question path: the question is the prompt, the reply is shown
/// raw, no normalization.
pub async fn ask(provider: &dyn GenerationProvider, question: &str) -> String {
    provider.generate(question).await
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{NO_EXAMPLE, NO_SOLUTION, NO_TEST};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Canned-reply provider that counts how often it is called.
    struct MockProvider {
        reply: String,
        calls: AtomicUsize,
    }

    impl MockProvider {
        fn new(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl GenerationProvider for MockProvider {
        async fn generate(&self, _prompt: &str) -> String {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.reply.clone()
        }

        fn name(&self) -> &str {
            "mock"
        }
    }

    fn ten_lines() -> Vec<String> {
        (1..=10).map(|i| format!("line {i}")).collect()
    }

    #[tokio::test]
    async fn test_range_selects_exactly_the_named_pages() {
        let provider = MockProvider::new(r#"{"Explanation":"e"}"#);
        let outcome = run_submission(&provider, &ten_lines(), "Law", "2-3", "notes.txt")
            .await
            .unwrap();

        assert_eq!(outcome.batch.records.len(), 2);
        assert_eq!(outcome.batch.records[0].page, 2);
        assert_eq!(outcome.batch.records[1].page, 3);
        assert_eq!(outcome.processed, 2);
        assert!(outcome.warnings.is_empty());
        assert_eq!(provider.calls(), 2);
    }

    #[tokio::test]
    async fn test_fully_out_of_range_warns_without_provider_calls() {
        let provider = MockProvider::new("{}");
        let outcome = run_submission(&provider, &ten_lines(), "Law", "11-12", "notes.txt")
            .await
            .unwrap();

        assert!(outcome.batch.is_empty());
        assert_eq!(outcome.warnings.len(), 2);
        assert!(outcome.warnings[0].contains("Page 11"));
        assert!(outcome.warnings[1].contains("Page 12"));
        assert_eq!(outcome.processed, 0);
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_partial_reply_fills_placeholders() {
        let provider = MockProvider::new(r#"{"Explanation":"x"}"#);
        let outcome = run_submission(&provider, &ten_lines(), "Law", "1-1", "notes.txt")
            .await
            .unwrap();

        let record = &outcome.batch.records[0];
        assert_eq!(record.explanation, "x");
        assert_eq!(record.example, NO_EXAMPLE);
        assert_eq!(record.test, NO_TEST);
        assert_eq!(record.solution, NO_SOLUTION);
    }

    #[tokio::test]
    async fn test_invalid_range_aborts_before_any_call() {
        let provider = MockProvider::new("{}");
        let err = run_submission(&provider, &ten_lines(), "Law", "abc", "notes.txt")
            .await
            .unwrap_err();

        assert!(matches!(err, crate::error::Error::InvalidRangeFormat { .. }));
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_unknown_field_skips_every_page_without_calls() {
        let provider = MockProvider::new("{}");
        let outcome = run_submission(&provider, &ten_lines(), "Alchemy", "1-3", "notes.txt")
            .await
            .unwrap();

        assert!(outcome.batch.is_empty());
        assert_eq!(outcome.warnings.len(), 3);
        assert_eq!(outcome.processed, 0);
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_malformed_reply_drops_record_but_counts_page() {
        let provider = MockProvider::new("the model ignored the format");
        let outcome = run_submission(&provider, &ten_lines(), "Law", "1-2", "notes.txt")
            .await
            .unwrap();

        assert!(outcome.batch.is_empty());
        assert_eq!(outcome.processed, 2);
        assert_eq!(outcome.warnings.len(), 2);
        assert_eq!(provider.calls(), 2);
    }

    #[tokio::test]
    async fn test_empty_range_processes_every_page() {
        let provider = MockProvider::new("{}");
        let outcome = run_submission(&provider, &ten_lines(), "Arts", "", "notes.txt")
            .await
            .unwrap();

        assert_eq!(outcome.batch.records.len(), 10);
        assert_eq!(provider.calls(), 10);
    }

    #[tokio::test]
    async fn test_overlapping_ranges_process_pages_twice() {
        let provider = MockProvider::new("{}");
        let outcome = run_submission(&provider, &ten_lines(), "Arts", "1-2,2-2", "notes.txt")
            .await
            .unwrap();

        let pages: Vec<usize> = outcome.batch.records.iter().map(|r| r.page).collect();
        assert_eq!(pages, vec![1, 2, 2]);
        assert_eq!(provider.calls(), 3);
    }

    #[tokio::test]
    async fn test_round_trip_emit_never_fails_for_well_formed_replies() {
        for reply in ["{}", r#"{"Explanation":"e"}"#, r#"{"Test":"t","Solution":"s"}"#] {
            let provider = MockProvider::new(reply);
            let outcome = run_submission(&provider, &ten_lines(), "Law", "1-1", "notes.txt")
                .await
                .unwrap();
            assert!(crate::content::emit(&outcome.batch).is_ok());
        }
    }

    #[tokio::test]
    async fn test_ask_passes_reply_through_raw() {
        let provider = MockProvider::new("free text answer");
        assert_eq!(ask(&provider, "what is a slide?").await, "free text answer");
    }
}
