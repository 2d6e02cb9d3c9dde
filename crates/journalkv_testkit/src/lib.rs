//! # journalkv Testkit
//!
//! Test utilities for journalkv.
//!
//! This crate provides:
//! - Journal fixtures over in-memory and file-backed stores
//! - Property-based test generators using proptest
//! - A reference model of the journal protocol for model-based tests
//!
//! ## Usage
//!
//! ```rust
//! use journalkv_testkit::TestJournal;
//!
//! let journal = TestJournal::memory();
//! let record = journal.prepare("payload").unwrap();
//! journal.commit().unwrap();
//! assert_eq!(journal.get(record).unwrap(), "payload");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod model;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::model::*;
}

pub use fixtures::*;
pub use generators::*;
pub use model::*;
