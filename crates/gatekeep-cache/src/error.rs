//! Error types for the cache module.

use thiserror::Error;

/// Errors that can occur when configuring or driving a cache.
#[derive(Debug, Error)]
pub enum CacheError {
    /// Bounds that would make the cache useless or unbounded.
    #[error("invalid cache bounds: {0}")]
    InvalidBounds(String),

    /// A janitor was requested outside a tokio runtime.
    #[error("no tokio runtime available to run the cache janitor")]
    NoRuntime,
}

/// Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;
