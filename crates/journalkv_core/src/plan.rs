//! Planning for out-of-band committed writes.
//!
//! `set_committed` installs a record payload directly and moves the committed
//! pointer forward when the record is newer than it. The decision is made
//! here, by a pure function over the current committed pointer, and the
//! resulting steps are turned into one batch by the journal.

use crate::keys::{KeyEncoding, COMMITTED_KEY};
use crate::types::RecordNumber;
use journalkv_storage::WriteBatch;

/// One step of a [`SetCommittedPlan`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanStep {
    /// Store `data` under the key of `record`.
    WritePayload {
        /// Target record.
        record: RecordNumber,
        /// Payload to store.
        data: String,
    },
    /// Point `committed` at `record`.
    AdvanceCommitted {
        /// New committed record.
        record: RecordNumber,
    },
}

/// Steps that together implement one `set_committed` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetCommittedPlan {
    steps: Vec<PlanStep>,
}

impl SetCommittedPlan {
    /// Returns the planned steps; the payload write always comes first.
    #[must_use]
    pub fn steps(&self) -> &[PlanStep] {
        &self.steps
    }

    /// Returns the record the committed pointer moves to, if it moves.
    #[must_use]
    pub fn advances_to(&self) -> Option<RecordNumber> {
        self.steps.iter().find_map(|step| match step {
            PlanStep::AdvanceCommitted { record } => Some(*record),
            PlanStep::WritePayload { .. } => None,
        })
    }

    /// Builds the single batch that applies every step.
    #[must_use]
    pub fn to_batch(&self, encoding: KeyEncoding) -> WriteBatch {
        let mut batch = WriteBatch::new();
        for step in &self.steps {
            match step {
                PlanStep::WritePayload { record, data } => {
                    batch.set(encoding.encode(*record), data.as_str());
                }
                PlanStep::AdvanceCommitted { record } => {
                    batch.set(COMMITTED_KEY, encoding.encode(*record));
                }
            }
        }
        batch
    }
}

/// Plans `set_committed(record, data)` against the current committed pointer.
///
/// The payload is always written. The committed pointer advances only when
/// nothing has been committed yet or `current < record`; it never moves
/// backwards.
#[must_use]
pub fn plan_set_committed(
    current: Option<RecordNumber>,
    record: RecordNumber,
    data: &str,
) -> SetCommittedPlan {
    let mut steps = vec![PlanStep::WritePayload {
        record,
        data: data.to_owned(),
    }];

    if current.is_none_or(|committed| committed < record) {
        steps.push(PlanStep::AdvanceCommitted { record });
    }

    SetCommittedPlan { steps }
}
