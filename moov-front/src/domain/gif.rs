//! Decorative card image.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use super::error::DomainError;

/// A base64-encoded GIF, validated on construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GifImage {
    encoded: String,
}

impl GifImage {
    /// Wrap a base64 payload, rejecting anything that does not decode.
    ///
    /// Whitespace anywhere in the payload is dropped, so MIME-style wrapped
    /// base64 is accepted.
    pub fn from_base64(payload: &str) -> Result<Self, DomainError> {
        let encoded: String = payload.chars().filter(|c| !c.is_ascii_whitespace()).collect();
        STANDARD
            .decode(&encoded)
            .map_err(|e| DomainError::InvalidImage(e.to_string()))?;

        Ok(Self { encoded })
    }

    /// Inline URI suitable for an `<img src>`.
    pub fn data_uri(&self) -> String {
        format!("data:image/gif;base64,{}", self.encoded)
    }

    pub fn as_base64(&self) -> &str {
        &self.encoded
    }
}
