//! Reference model of the journal protocol.
//!
//! The model keeps the journal state as plain fields and applies operations
//! with no store underneath. Model-based tests run the same operation
//! sequence against a real [`Journal`] and compare outcomes step by step.

use journalkv_core::{Journal, JournalError, RecordNumber};
use journalkv_storage::OrderedStore;
use std::collections::BTreeMap;

/// An operation against a journal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JournalOp {
    /// `prepare(data)`
    Prepare(String),
    /// `commit()`
    Commit,
    /// `rollback()`
    Rollback,
    /// `set_committed(record, data)`
    SetCommitted(RecordNumber, String),
}

/// Result of one operation, comparable between model and journal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A record was prepared.
    Prepared(RecordNumber),
    /// A record was committed.
    Committed(RecordNumber),
    /// A rollback ran; carries the discarded record.
    RolledBack(Option<RecordNumber>),
    /// `set_committed` succeeded.
    Installed,
    /// The operation was refused.
    Rejected(Rejection),
}

/// Why an operation was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// A prepare was already outstanding.
    AlreadyPrepared,
    /// Nothing was prepared.
    NothingToCommit,
    /// The commit would have moved the committed pointer backwards.
    CommitRegression,
    /// No record number is left.
    Exhausted,
}

/// In-memory reference journal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JournalModel {
    /// Committed pointer.
    pub committed: Option<RecordNumber>,
    /// Pending pointer.
    pub pending: Option<RecordNumber>,
    /// Record payloads, committed or not.
    pub records: BTreeMap<RecordNumber, String>,
    /// Whether commits refuse to regress.
    pub strict_commit_order: bool,
}

impl JournalModel {
    /// Creates an empty model with strict commit ordering.
    pub fn new() -> Self {
        Self {
            strict_commit_order: true,
            ..Self::default()
        }
    }

    /// Applies `op` and returns its outcome.
    pub fn apply(&mut self, op: &JournalOp) -> Outcome {
        match op {
            JournalOp::Prepare(data) => {
                if self.pending.is_some() {
                    return Outcome::Rejected(Rejection::AlreadyPrepared);
                }
                let next = match self.committed {
                    None => Some(RecordNumber::new(0)),
                    Some(c) => c.checked_next(),
                };
                let Some(record) = next else {
                    return Outcome::Rejected(Rejection::Exhausted);
                };
                self.records.insert(record, data.clone());
                self.pending = Some(record);
                Outcome::Prepared(record)
            }
            JournalOp::Commit => {
                let Some(pending) = self.pending else {
                    return Outcome::Rejected(Rejection::NothingToCommit);
                };
                if self.strict_commit_order && self.committed.is_some_and(|c| pending <= c) {
                    return Outcome::Rejected(Rejection::CommitRegression);
                }
                self.committed = Some(pending);
                self.pending = None;
                Outcome::Committed(pending)
            }
            JournalOp::Rollback => Outcome::RolledBack(self.pending.take()),
            JournalOp::SetCommitted(record, data) => {
                self.records.insert(*record, data.clone());
                if self.committed.is_none_or(|c| c < *record) {
                    self.committed = Some(*record);
                }
                Outcome::Installed
            }
        }
    }
}

/// Runs `op` against a real journal.
///
/// # Panics
///
/// Panics on errors the model has no counterpart for (storage failures,
/// corruption), since those mean the test itself is broken.
pub fn run_op<S: OrderedStore>(journal: &Journal<S>, op: &JournalOp) -> Outcome {
    let result = match op {
        JournalOp::Prepare(data) => journal.prepare(data).map(Outcome::Prepared),
        JournalOp::Commit => journal.commit().map(Outcome::Committed),
        JournalOp::Rollback => journal.rollback().map(Outcome::RolledBack),
        JournalOp::SetCommitted(record, data) => journal
            .set_committed(*record, data)
            .map(|()| Outcome::Installed),
    };

    match result {
        Ok(outcome) => outcome,
        Err(JournalError::AlreadyPrepared { .. }) => Outcome::Rejected(Rejection::AlreadyPrepared),
        Err(JournalError::NothingToCommit) => Outcome::Rejected(Rejection::NothingToCommit),
        Err(JournalError::CommitRegression { .. }) => {
            Outcome::Rejected(Rejection::CommitRegression)
        }
        Err(JournalError::RecordSpaceExhausted) => Outcome::Rejected(Rejection::Exhausted),
        Err(other) => panic!("unexpected journal error for {op:?}: {other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rn(n: u64) -> RecordNumber {
        RecordNumber::new(n)
    }

    #[test]
    fn model_prepare_commit() {
        let mut model = JournalModel::new();
        assert_eq!(
            model.apply(&JournalOp::Prepare("a".into())),
            Outcome::Prepared(rn(0))
        );
        assert_eq!(
            model.apply(&JournalOp::Prepare("b".into())),
            Outcome::Rejected(Rejection::AlreadyPrepared)
        );
        assert_eq!(model.apply(&JournalOp::Commit), Outcome::Committed(rn(0)));
        assert_eq!(
            model.apply(&JournalOp::Commit),
            Outcome::Rejected(Rejection::NothingToCommit)
        );
    }

    #[test]
    fn model_set_committed_never_regresses() {
        let mut model = JournalModel::new();
        model.apply(&JournalOp::SetCommitted(rn(9), "nine".into()));
        model.apply(&JournalOp::SetCommitted(rn(3), "three".into()));
        assert_eq!(model.committed, Some(rn(9)));
        assert_eq!(model.records.len(), 2);
    }
}
