//! Error types for the FPL fetcher

use thiserror::Error;

/// Transport-level failures talking to the FPL API
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Network failure requesting {url}: {message}")]
    Network { url: String, message: String },

    #[error("Upstream returned HTTP {status} for {url}")]
    Http { url: String, status: u16 },

    #[error("Request to {url} timed out after {timeout_secs}s")]
    Timeout { url: String, timeout_secs: u64 },
}

/// Upstream body did not match the expected payload shape
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Malformed payload from {url}: {message}")]
pub struct ParseError {
    pub url: String,
    pub message: String,
}

/// Any failure produced by the fetcher
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetcherError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl FetchError {
    /// HTTP status for `Http` failures
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type for fetcher operations
pub type FetchResult<T> = Result<T, FetcherError>;
