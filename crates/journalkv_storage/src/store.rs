//! Ordered store and cursor trait definitions.

use crate::batch::WriteBatch;
use crate::error::StorageResult;
use std::sync::Arc;

/// An ordered, string-keyed key-value store.
///
/// Stores are **opaque**: they hold string keys and string values and know
/// nothing about journals, pending records or commit pointers. The journal
/// owns all interpretation of the key space.
///
/// # Invariants
///
/// - `apply` makes every operation of a batch visible at once, or none of them
/// - on success, `apply` is as durable as the store promises (memory stores
///   are not durable at all)
/// - cursors iterate in ascending byte-wise key order
/// - a cursor reads the state as of the moment it was opened
///
/// # Implementors
///
/// - [`super::InMemoryStore`] - For testing
/// - [`super::FileStore`] - For persistent storage
pub trait OrderedStore: Send + Sync {
    /// Cursor type handed out by [`OrderedStore::cursor`].
    type Cursor: StoreCursor;

    /// Opens a read-only cursor over the current contents of the store.
    ///
    /// The cursor is released when it is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn cursor(&self) -> StorageResult<Self::Cursor>;

    /// Applies all operations in `batch` atomically, in order.
    ///
    /// An empty batch succeeds without touching the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the batch cannot be persisted. On error the
    /// store is left exactly as it was before the call.
    fn apply(&self, batch: &WriteBatch) -> StorageResult<()>;
}

impl<S: OrderedStore + ?Sized> OrderedStore for Arc<S> {
    type Cursor = S::Cursor;

    fn cursor(&self) -> StorageResult<Self::Cursor> {
        (**self).cursor()
    }

    fn apply(&self, batch: &WriteBatch) -> StorageResult<()> {
        (**self).apply(batch)
    }
}

/// A forward cursor over an [`OrderedStore`].
///
/// A fresh cursor is positioned before the first entry. Nothing is readable
/// until [`StoreCursor::advance`] returns `true`.
pub trait StoreCursor {
    /// Positions the cursor just before the first entry whose key is `>= key`.
    fn seek(&mut self, key: &str);

    /// Moves to the next entry. Returns `false` once the cursor is exhausted.
    fn advance(&mut self) -> bool;

    /// Key of the current entry, if positioned on one.
    fn key(&self) -> Option<&str>;

    /// Value of the current entry, if positioned on one.
    fn value(&self) -> Option<&str>;
}
