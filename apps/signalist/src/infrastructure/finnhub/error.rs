//! Finnhub-specific error types.

use thiserror::Error;

use crate::application::ports::MarketDataError;

/// Errors from the Finnhub adapter.
#[derive(Debug, Error, Clone)]
pub enum FinnhubError {
    /// No API key configured.
    #[error("Finnhub API key is not configured")]
    MissingApiKey,

    /// HTTP transport failed.
    #[error("HTTP error: {0}")]
    Http(String),

    /// API returned a non-success status.
    #[error("Fetch failed {status}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body.
        message: String,
    },

    /// Rate limited on every attempt.
    #[error("Rate limited")]
    RateLimited,

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(String),

    /// Max retries exceeded.
    #[error("Max retries exceeded after {attempts} attempts: {last_error}")]
    MaxRetriesExceeded {
        /// Number of attempts made before giving up.
        attempts: u32,
        /// Failure of the final attempt.
        last_error: String,
    },
}

impl From<FinnhubError> for MarketDataError {
    fn from(err: FinnhubError) -> Self {
        match err {
            FinnhubError::Http(message) => Self::ConnectionError { message },
            FinnhubError::MissingApiKey => Self::ConnectionError {
                message: err.to_string(),
            },
            FinnhubError::Api { status, message } => Self::ApiError { status, message },
            FinnhubError::RateLimited => Self::RateLimited,
            FinnhubError::JsonParse(message) => Self::InvalidResponse { message },
            FinnhubError::MaxRetriesExceeded { .. } => Self::ConnectionError {
                message: err.to_string(),
            },
        }
    }
}
