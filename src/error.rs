//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Errors returned by cache operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Attempt to store an absent value
    #[error("nil value is not allowed")]
    NilValue,

    /// Key was never set or has already been removed
    #[error("key not found in cache: {0}")]
    KeyNotFound(String),

    /// Key was set but its expiration passed before the read
    #[error("key has expired: {0}")]
    KeyExpired(String),
}

// == Result Type Alias ==
/// Convenience Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;
