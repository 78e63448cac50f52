//! Content API client error types.

use std::sync::Arc;

/// Errors from the content API and anything standing in for it.
///
/// Cloneable so a failure can be replayed or fanned out to several callers.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    /// Invalid request parameters, rejected before any I/O.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// The configured host is not a usable base URL.
    #[error("invalid host: {0}")]
    InvalidHost(String),

    /// HTTP error response.
    #[error("HTTP error: {status}")]
    HttpError { status: u16 },

    /// Request timeout.
    #[error("request timeout")]
    Timeout,

    /// The caller gave up before the call completed.
    #[error("request cancelled")]
    Cancelled,

    /// Network error.
    #[error("network error: {0}")]
    Network(Arc<reqwest::Error>),

    /// Response parse error.
    #[error("parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { ApiError::Timeout } else { ApiError::Network(Arc::new(err)) }
    }
}
