//! Error types for the cache layer
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for all cache operations.
///
/// Configuration violations fail fast at construction time; per-operation
/// failures are returned to the caller so it can fall back to the source
/// of truth (treat any cache error as a miss).
#[derive(Error, Debug)]
pub enum CacheError {
    /// Key not found in cache
    #[error("Key not found: {0}")]
    KeyNotFound(String),

    /// Value could not be serialized
    #[error("Serialization failed: {message}")]
    Serialization {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Stored bytes could not be deserialized
    #[error("Deserialization failed: {message}")]
    Deserialization {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Compression hook failed
    #[error("Compression failed: {0}")]
    Compression(String),

    /// Encryption hook failed
    #[error("Encryption failed: {0}")]
    Encryption(String),

    /// Underlying storage failed
    #[error("Storage error: {0}")]
    Storage(String),

    /// Invalid cache configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// Operation exceeded its time budget
    #[error("Operation timed out: {0}")]
    OperationTimeout(String),

    /// Capacity exceeded and eviction could not make room
    #[error("Capacity exceeded: {0}")]
    CapacityExceeded(String),
}

impl CacheError {
    /// Builds a serialization error from an underlying cause.
    pub fn serialization(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Serialization {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Builds a deserialization error from an underlying cause.
    pub fn deserialization(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Deserialization {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// == Result Type Alias ==
/// Convenience Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;
