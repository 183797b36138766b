use thiserror::Error;

/// Errors that can occur when saving or loading lot snapshots.
#[derive(Debug, Error)]
pub enum StateStoreError {
    /// Reading or writing the backing file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A serialization/deserialization error occurred.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for state store operations.
pub type Result<T> = std::result::Result<T, StateStoreError>;
