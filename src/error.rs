//! Error types for the VP-tree index

use thiserror::Error;

/// Result type alias for index operations
pub type Result<T> = std::result::Result<T, VpTreeError>;

/// Error types that can occur while building or querying an index
#[derive(Error, Debug)]
pub enum VpTreeError {
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Invalid capacity: {capacity} (must be at least 1)")]
    InvalidCapacity { capacity: usize },

    #[error("Cannot build a non-empty tree from an empty point set")]
    EmptyInput,

    #[error("Invalid vector: {reason}")]
    InvalidVector { reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Config error: {0}")]
    ConfigError(String),
}
