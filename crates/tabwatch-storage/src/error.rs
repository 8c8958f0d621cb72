//! Storage errors.

use thiserror::Error;

/// State store error types.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored state could not be parsed.
    #[error("Corrupt state file: {0}")]
    Corrupt(#[from] serde_json::Error),
}
