//! Error types for the Gatekeep Core.

use thiserror::Error;

/// Errors raised by the crypt primitive and token handling.
#[derive(Debug, Error)]
pub enum CryptError {
    /// The stored token does not parse under the crypt format.
    #[error("malformed crypt token: {0}")]
    MalformedToken(String),

    /// The token names an algorithm this build does not handle.
    #[error("unsupported crypt algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// The stored token bytes are not valid UTF-8.
    #[error("crypt token is not valid UTF-8")]
    InvalidEncoding(#[from] std::str::Utf8Error),

    /// The underlying hash primitive failed to produce output.
    #[error("crypt primitive failure: {0}")]
    Primitive(String),
}

impl CryptError {
    /// Whether this error describes bad stored data rather than a primitive fault.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            CryptError::MalformedToken(_)
                | CryptError::UnsupportedAlgorithm(_)
                | CryptError::InvalidEncoding(_)
        )
    }
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CryptError>;
