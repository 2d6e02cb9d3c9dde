//! Snapshot cursor shared by the built-in stores.

use crate::batch::{BatchOp, WriteBatch};
use crate::store::StoreCursor;
use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::Arc;

/// Materialized contents of a store.
pub(crate) type Entries = BTreeMap<String, String>;

/// Applies every operation of `batch` to `entries`, in order.
pub(crate) fn apply_ops(entries: &mut Entries, batch: &WriteBatch) {
    for op in batch.ops() {
        match op {
            BatchOp::Set { key, value } => {
                entries.insert(key.clone(), value.clone());
            }
            BatchOp::Delete { key } => {
                entries.remove(key);
            }
        }
    }
}

/// A cursor over an immutable snapshot of a store.
///
/// Stores keep their contents behind an `Arc` and copy on write, so a cursor
/// holds its snapshot alive without blocking writers. Batches applied after
/// the cursor was opened are not visible through it.
#[derive(Debug, Clone)]
pub struct SnapshotCursor {
    snapshot: Arc<Entries>,
    /// Lower bound for the next `advance`.
    bound: Bound<String>,
    current: Option<(String, String)>,
}

impl SnapshotCursor {
    pub(crate) fn new(snapshot: Arc<Entries>) -> Self {
        Self {
            snapshot,
            bound: Bound::Unbounded,
            current: None,
        }
    }
}

impl StoreCursor for SnapshotCursor {
    fn seek(&mut self, key: &str) {
        self.bound = Bound::Included(key.to_owned());
        self.current = None;
    }

    fn advance(&mut self) -> bool {
        let lower = match &self.bound {
            Bound::Included(key) => Bound::Included(key.as_str()),
            Bound::Excluded(key) => Bound::Excluded(key.as_str()),
            Bound::Unbounded => Bound::Unbounded,
        };

        let next = self
            .snapshot
            .range::<str, _>((lower, Bound::Unbounded))
            .next()
            .map(|(k, v)| (k.clone(), v.clone()));

        match next {
            Some((key, value)) => {
                self.bound = Bound::Excluded(key.clone());
                self.current = Some((key, value));
                true
            }
            None => {
                self.current = None;
                false
            }
        }
    }

    fn key(&self) -> Option<&str> {
        self.current.as_ref().map(|(k, _)| k.as_str())
    }

    fn value(&self) -> Option<&str> {
        self.current.as_ref().map(|(_, v)| v.as_str())
    }
}
