//! Error types for the memory subsystem.

/// Errors that can occur in memory operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Snapshot or import document is malformed
    #[error("deserialization error: {0}")]
    Deserialization(String),

    /// Long-term store reached its hard ceiling
    #[error("capacity exceeded: hard ceiling of {ceiling} memories reached")]
    CapacityExceeded {
        /// Configured ceiling
        ceiling: usize,
    },

    /// Embedding length does not match the store dimensionality
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Store dimensionality
        expected: usize,
        /// Length of the offending vector
        actual: usize,
    },

    /// External embedder failed
    #[error("embedding error: {0}")]
    Embedding(String),

    /// External embedder did not answer in time
    #[error("embedding timed out after {timeout_ms}ms")]
    EmbeddingTimeout {
        /// Configured timeout
        timeout_ms: u64,
    },

    /// Invalid configuration value
    #[error("invalid configuration: {field}: {message}")]
    InvalidConfig {
        /// Config field name
        field: String,
        /// Detailed message
        message: String,
    },

    /// Session directory access failed
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error while exporting
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn invalid_config(field: &str, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Convenience Result type.
pub type Result<T> = std::result::Result<T, Error>;
