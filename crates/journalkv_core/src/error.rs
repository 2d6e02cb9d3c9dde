//! Error types for journal operations.

use crate::types::RecordNumber;
use thiserror::Error;

/// Result type for journal operations.
pub type JournalResult<T> = Result<T, JournalError>;

/// Errors that can occur in journal operations.
#[derive(Debug, Error)]
pub enum JournalError {
    /// The underlying store failed; the error is not interpreted further.
    #[error("storage error: {0}")]
    Storage(#[from] journalkv_storage::StorageError),

    /// The store has no `committed` key, so it was never initialized as a journal.
    #[error("not a journal: committed pointer is missing")]
    NotAJournal,

    /// A prepare is already outstanding.
    #[error("record {pending} is already prepared")]
    AlreadyPrepared {
        /// The outstanding prepared record.
        pending: RecordNumber,
    },

    /// `commit` was called with nothing prepared.
    #[error("nothing to commit")]
    NothingToCommit,

    /// No record is currently prepared.
    #[error("nothing pending")]
    NothingPending,

    /// No entry exists for the requested record.
    #[error("record {record} not found")]
    RecordNotFound {
        /// The record that was looked up.
        record: RecordNumber,
    },

    /// A reserved key is missing or holds an undecodable value.
    #[error("journal corrupt: {key}: {message}")]
    CorruptState {
        /// The reserved key at fault.
        key: String,
        /// Description of the problem.
        message: String,
    },

    /// Committing the prepared record would move the committed pointer backwards.
    #[error("commit of record {pending} would regress committed pointer from {}", display_committed(.committed))]
    CommitRegression {
        /// The prepared record.
        pending: RecordNumber,
        /// The current committed record.
        committed: Option<RecordNumber>,
    },

    /// The committed record is `u64::MAX`; no further record can be prepared.
    #[error("record numbers exhausted")]
    RecordSpaceExhausted,
}

fn display_committed(committed: &Option<RecordNumber>) -> String {
    committed.map_or_else(|| "<none>".to_string(), |r| r.to_string())
}

impl JournalError {
    /// Creates a corrupt state error for `key`.
    pub fn corrupt(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::CorruptState {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Returns true if the error reports a missing record or missing prepare
    /// rather than a failure.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::RecordNotFound { .. } | Self::NothingPending | Self::NothingToCommit
        )
    }
}
