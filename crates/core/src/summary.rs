//! Message board summarization contract
//!
//! Summaries come from an external service. They are best-effort: a failed
//! call becomes a fallback line for the user and never touches the store.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::Message;

/// Shown in place of a summary when the service cannot be reached
pub const FALLBACK_SUMMARY: &str = "Sorry, I couldn't generate a summary at this time.";

/// One message as sent to the summarization service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryEntry {
    pub author: String,
    pub text: String,
}

impl From<&Message> for SummaryEntry {
    fn from(message: &Message) -> Self {
        Self {
            author: message.author.clone(),
            text: message.text.clone(),
        }
    }
}

/// A text summarization service.
///
/// Entries are ordered oldest to newest. Implementations report every
/// transport or service failure as `Error::SummarizationUnavailable`.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, entries: &[SummaryEntry]) -> Result<String>;
}

/// Summarizer used when no service is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredSummarizer;

#[async_trait]
impl Summarizer for UnconfiguredSummarizer {
    async fn summarize(&self, _entries: &[SummaryEntry]) -> Result<String> {
        Err(Error::SummarizationUnavailable(
            "no summarization service configured".into(),
        ))
    }
}

/// Single attempt; any failure turns into [`FALLBACK_SUMMARY`]
pub async fn summarize_or_fallback(
    summarizer: &dyn Summarizer,
    entries: &[SummaryEntry],
) -> String {
    match summarizer.summarize(entries).await {
        Ok(summary) => summary,
        Err(e) => {
            tracing::warn!(error = %e, count = entries.len(), "Failed to summarize messages");
            FALLBACK_SUMMARY.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct RecordingSummarizer {
        seen: Mutex<Vec<SummaryEntry>>,
        reply: Result<String>,
    }

    #[async_trait]
    impl Summarizer for RecordingSummarizer {
        async fn summarize(&self, entries: &[SummaryEntry]) -> Result<String> {
            self.seen.lock().unwrap().extend_from_slice(entries);
            self.reply.clone()
        }
    }

    fn entries() -> Vec<SummaryEntry> {
        vec![
            SummaryEntry {
                author: "Front Desk".into(),
                text: "204 needs extra towels".into(),
            },
            SummaryEntry {
                author: "Alex".into(),
                text: "On it".into(),
            },
        ]
    }

    #[tokio::test]
    async fn test_summary_passthrough() {
        let summarizer = RecordingSummarizer {
            seen: Mutex::new(Vec::new()),
            reply: Ok("Towels requested for 204; Alex is handling it.".into()),
        };

        let summary = summarize_or_fallback(&summarizer, &entries()).await;
        assert_eq!(summary, "Towels requested for 204; Alex is handling it.");
        assert_eq!(*summarizer.seen.lock().unwrap(), entries());
    }

    #[tokio::test]
    async fn test_failure_falls_back() {
        let summarizer = RecordingSummarizer {
            seen: Mutex::new(Vec::new()),
            reply: Err(Error::SummarizationUnavailable("timeout".into())),
        };

        let summary = summarize_or_fallback(&summarizer, &entries()).await;
        assert_eq!(summary, FALLBACK_SUMMARY);
    }

    #[tokio::test]
    async fn test_unconfigured() {
        let result = UnconfiguredSummarizer.summarize(&entries()).await;
        assert!(matches!(result, Err(Error::SummarizationUnavailable(_))));
        assert_eq!(summarize_or_fallback(&UnconfiguredSummarizer, &[]).await, FALLBACK_SUMMARY);
    }
}
