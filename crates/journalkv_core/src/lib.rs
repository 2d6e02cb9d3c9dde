//! # journalkv Core
//!
//! A write-ahead journal over an ordered key-value store.
//!
//! This crate provides:
//! - [`Journal`], a prepare/commit/rollback protocol for numbered records
//! - Record key encoding and the record numbering policy ([`keys`])
//! - Planning for out-of-band committed writes ([`plan`])
//!
//! All journal state lives in the store under two reserved keys,
//! `committed` and `pending`, next to one key per record. The journal keeps
//! no sequence state in memory, so a journal can be reopened at any time and
//! picks up exactly where the store left off.
//!
//! ## Example
//!
//! ```rust
//! use journalkv_core::Journal;
//! use journalkv_storage::InMemoryStore;
//!
//! let journal = Journal::create(InMemoryStore::new()).unwrap();
//! let record = journal.prepare("hello").unwrap();
//! journal.commit().unwrap();
//!
//! assert_eq!(journal.committed().unwrap(), Some(record));
//! assert_eq!(journal.get(record).unwrap(), "hello");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod journal;
pub mod keys;
pub mod plan;
mod types;

pub use config::JournalConfig;
pub use error::{JournalError, JournalResult};
pub use journal::{Journal, JournalStatus};
pub use keys::{next_candidate, KeyEncoding, COMMITTED_KEY, PENDING_KEY};
pub use plan::{plan_set_committed, PlanStep, SetCommittedPlan};
pub use types::RecordNumber;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
