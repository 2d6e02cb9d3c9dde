//! Error types for storage operations.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The batch log is corrupted.
    #[error("storage corrupted: {0}")]
    Corrupted(String),

    /// Another handle holds the store's exclusive lock.
    #[error("store locked: another process has exclusive access to {path:?}")]
    Locked {
        /// Path of the locked log file.
        path: PathBuf,
    },

    /// The store does not exist and creation was not requested.
    #[error("store not found: {path:?}")]
    NotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// A batch does not fit in a single log frame.
    #[error("batch too large: {size} bytes exceeds maximum of {max} bytes")]
    BatchTooLarge {
        /// Encoded size of the batch.
        size: usize,
        /// Largest encodable batch.
        max: usize,
    },
}

impl StorageError {
    /// Creates a corruption error.
    pub fn corrupted(message: impl Into<String>) -> Self {
        Self::Corrupted(message.into())
    }
}
