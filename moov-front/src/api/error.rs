//! Moov API error types.

use crate::domain::DomainError;

/// Errors that can occur when talking to the moov API.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Request URL could not be built from the base URL
    #[error("invalid URL: {message}")]
    InvalidUrl { message: String },

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Response parsed but carried an unusable payload
    #[error("invalid payload: {0}")]
    Payload(#[from] DomainError),
}
