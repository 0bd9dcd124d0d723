//! Application state management

use std::sync::{Arc, Mutex, MutexGuard};

use cleansweep_core::{summarize_or_fallback, Result, Store, Summarizer, UnconfiguredSummarizer};
use cleansweep_net::HttpSummarizer;

use crate::config::AppConfig;

/// Main application state: one store shared by every view
pub struct AppState {
    pub store: Arc<Mutex<Store>>,
    pub summarizer: Arc<dyn Summarizer>,
}

impl AppState {
    pub fn new(config: &AppConfig) -> std::result::Result<Self, cleansweep_net::Error> {
        let summarizer: Arc<dyn Summarizer> = match config.summarizer_config() {
            Some(summarizer_config) => {
                tracing::info!(
                    url = %summarizer_config.base_url,
                    "Summarization service configured"
                );
                Arc::new(HttpSummarizer::new(summarizer_config)?)
            }
            None => {
                tracing::info!(
                    "No summarization service configured; summaries will use the fallback"
                );
                Arc::new(UnconfiguredSummarizer)
            }
        };

        Ok(Self::with_parts(Store::new(), summarizer))
    }

    pub fn with_parts(store: Store, summarizer: Arc<dyn Summarizer>) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            summarizer,
        }
    }

    /// Lock the store. Mutations are atomic under this lock.
    pub fn store(&self) -> MutexGuard<'_, Store> {
        // Store operations validate before mutating, so a poisoned lock
        // still guards consistent data
        self.store.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Summarize the board for the front desk.
    ///
    /// The request is snapshotted under the lock and the lock is released
    /// before awaiting the service, so other handlers keep mutating the
    /// store meanwhile. Service failures come back as the fallback text.
    pub async fn summarize(&self) -> Result<String> {
        let entries = self.store().summary_request()?;
        Ok(summarize_or_fallback(self.summarizer.as_ref(), &entries).await)
    }
}
