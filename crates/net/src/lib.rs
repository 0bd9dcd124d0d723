//! CleanSweep Network Library
//!
//! HTTP adapter for the external message summarization service.
//!
//! # Wire format
//!
//! - Request: `POST {base_url}/summarize` with JSON
//!   `{"messages": [{"author": "...", "text": "..."}]}`, oldest message first
//! - Response: the summary as a plain-text body
//!
//! # Usage
//!
//! ```ignore
//! let summarizer = HttpSummarizer::new(SummarizerConfig::new("http://localhost:8400"))?;
//! let entries = store.lock().unwrap().summary_request()?;
//! let text = summarize_or_fallback(&summarizer, &entries).await;
//! ```

pub mod error;
pub mod summarizer;

pub use error::{Error, Result};
pub use summarizer::{HttpSummarizer, SummarizerConfig, URL_ENV};

/// Default request timeout for summaries, in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
