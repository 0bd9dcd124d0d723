//! Network error types

/// Network result type
pub type Result<T> = std::result::Result<T, Error>;

/// Summarization transport errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Service responded with {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Service returned an empty summary")]
    EmptySummary,

    #[error("Invalid service URL: {0}")]
    InvalidUrl(String),
}

impl From<Error> for cleansweep_core::Error {
    fn from(e: Error) -> Self {
        cleansweep_core::Error::SummarizationUnavailable(e.to_string())
    }
}
