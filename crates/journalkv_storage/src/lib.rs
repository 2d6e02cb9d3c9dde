//! # journalkv Storage
//!
//! Ordered key-value stores for journalkv.
//!
//! This crate provides the substrate the journal is built on: a string-keyed,
//! string-valued collection that applies batches of writes atomically and
//! exposes forward cursors in byte-wise key order. Stores do not interpret
//! the keys or values they hold.
//!
//! ## Design Principles
//!
//! - A [`WriteBatch`] is applied all-or-nothing
//! - Cursors read a consistent snapshot and never see half of a batch
//! - Iteration order is lexicographic, never numeric
//! - Stores must be `Send + Sync` so one store can back several handles
//!
//! ## Available Stores
//!
//! - [`InMemoryStore`] - For testing and ephemeral storage
//! - [`FileStore`] - Persistent store backed by an append-only batch log
//!
//! ## Example
//!
//! ```rust
//! use journalkv_storage::{InMemoryStore, OrderedStore, StoreCursor, WriteBatch};
//!
//! let store = InMemoryStore::new();
//! let mut batch = WriteBatch::new();
//! batch.set("b", "2").set("a", "1");
//! store.apply(&batch).unwrap();
//!
//! let mut cursor = store.cursor().unwrap();
//! cursor.seek("a");
//! assert!(cursor.advance());
//! assert_eq!(cursor.key(), Some("a"));
//! assert_eq!(cursor.value(), Some("1"));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod batch;
mod cursor;
mod error;
mod file;
mod frame;
mod memory;
mod store;

pub use batch::{BatchOp, WriteBatch};
pub use cursor::SnapshotCursor;
pub use error::{StorageError, StorageResult};
pub use file::{FileStore, FileStoreOptions};
pub use memory::InMemoryStore;
pub use store::{OrderedStore, StoreCursor};
