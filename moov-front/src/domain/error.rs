//! Domain error types.
//!
//! Validation failures on data received from the API or the user. They are
//! distinct from transport errors.

/// Domain-level validation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// A suggestion label without the `" - "` separator
    #[error("malformed suggestion label: {0:?}")]
    MalformedLabel(String),

    /// Image payload is not valid base64
    #[error("invalid image payload: {0}")]
    InvalidImage(String),
}
