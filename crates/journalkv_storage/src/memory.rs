//! In-memory store for testing.

use crate::batch::WriteBatch;
use crate::cursor::{apply_ops, Entries, SnapshotCursor};
use crate::error::StorageResult;
use crate::store::OrderedStore;
use parking_lot::RwLock;
use std::sync::Arc;

/// An in-memory ordered store.
///
/// This store keeps all entries in memory and is suitable for:
/// - Unit tests
/// - Integration tests
/// - Ephemeral journals that don't need persistence
///
/// # Thread Safety
///
/// This store is thread-safe and can be shared across threads. Writers
/// replace the entry map copy-on-write, so open cursors keep reading the
/// snapshot they started with.
///
/// # Example
///
/// ```rust
/// use journalkv_storage::{InMemoryStore, OrderedStore, WriteBatch};
///
/// let store = InMemoryStore::new();
/// let mut batch = WriteBatch::new();
/// batch.set("committed", "");
/// store.apply(&batch).unwrap();
/// assert_eq!(store.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStore {
    entries: RwLock<Arc<Entries>>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store with pre-existing entries.
    ///
    /// Useful for testing recovery and corruption scenarios.
    #[must_use]
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let entries: Entries = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            entries: RwLock::new(Arc::new(entries)),
        }
    }

    /// Returns a copy of all entries in key order.
    #[must_use]
    pub fn entries(&self) -> Vec<(String, String)> {
        self.entries
            .read()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if the store holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Removes every entry.
    pub fn clear(&self) {
        *self.entries.write() = Arc::new(Entries::new());
    }
}

impl OrderedStore for InMemoryStore {
    type Cursor = SnapshotCursor;

    fn cursor(&self) -> StorageResult<SnapshotCursor> {
        Ok(SnapshotCursor::new(Arc::clone(&self.entries.read())))
    }

    fn apply(&self, batch: &WriteBatch) -> StorageResult<()> {
        if batch.is_empty() {
            return Ok(());
        }

        let mut entries = self.entries.write();
        apply_ops(Arc::make_mut(&mut entries), batch);
        Ok(())
    }
}
