//! HTTP summarization client
//!
//! One request per user-triggered summary; there are no retries. Every
//! failure (transport, timeout, non-2xx, empty body) surfaces to the core
//! as `SummarizationUnavailable`.

use std::time::Duration;

use async_trait::async_trait;
use cleansweep_core::{Summarizer, SummaryEntry};
use reqwest::{Client, Url};
use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::error::{Error, Result};
use crate::DEFAULT_TIMEOUT_SECS;

/// Environment variable holding the service base URL
pub const URL_ENV: &str = "CLEANSWEEP_SUMMARIZER_URL";

/// Connection settings for the summarization service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummarizerConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl SummarizerConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Debug, Serialize)]
struct SummarizeRequest<'a> {
    messages: &'a [SummaryEntry],
}

/// Summarizer backed by an HTTP service
#[derive(Debug, Clone)]
pub struct HttpSummarizer {
    endpoint: Url,
    client: Client,
}

impl HttpSummarizer {
    pub fn new(config: SummarizerConfig) -> Result<Self> {
        let base = config.base_url.trim().trim_end_matches('/');
        let endpoint = Url::parse(&format!("{}/summarize", base))
            .map_err(|e| Error::InvalidUrl(format!("{}: {}", config.base_url, e)))?;

        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self { endpoint, client })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Send the board to the service and return the summary text
    #[instrument(skip(self, entries), fields(endpoint = %self.endpoint, count = entries.len()))]
    pub async fn request_summary(&self, entries: &[SummaryEntry]) -> Result<String> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&SummarizeRequest { messages: entries })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Summarization service rejected request");
            return Err(Error::Status {
                status: status.as_u16(),
                body,
            });
        }

        let summary = response.text().await?.trim().to_string();
        if summary.is_empty() {
            return Err(Error::EmptySummary);
        }

        debug!(len = summary.len(), "Received summary");
        Ok(summary)
    }
}

#[async_trait]
impl Summarizer for HttpSummarizer {
    async fn summarize(&self, entries: &[SummaryEntry]) -> cleansweep_core::Result<String> {
        Ok(self.request_summary(entries).await?)
    }
}
