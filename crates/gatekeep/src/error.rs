//! Error types for Gatekeep.

use gatekeep_cache::CacheError;
use gatekeep_core::CryptError;
use gatekeep_perms::PermsError;
use thiserror::Error;

/// Errors that can occur in Gatekeep operations.
///
/// Verification never returns one of these; a credential that cannot be
/// checked is reported as a mismatch.
#[derive(Debug, Error)]
pub enum GatekeepError {
    /// Hash primitive error.
    #[error("crypt error: {0}")]
    Crypt(#[from] CryptError),

    /// Permission encoding error.
    #[error("permission error: {0}")]
    Permission(#[from] PermsError),

    /// Cache error.
    #[error("cache error: {0}")]
    Cache(#[from] CacheError),

    /// Configuration could not be parsed.
    #[error("configuration parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// Configuration parsed but is unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for Gatekeep operations.
pub type Result<T> = std::result::Result<T, GatekeepError>;
