//! Property-based test generators using proptest.
//!
//! Provides strategies for generating journal payloads, record numbers and
//! operation sequences.

use crate::model::JournalOp;
use journalkv_core::RecordNumber;
use proptest::prelude::*;

/// Strategy for generating record payloads, including empty and non-ASCII text.
pub fn payload_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("\\PC{0,48}").expect("Invalid regex")
}

/// Strategy for generating record numbers.
///
/// Numbers stay small so generated `set_committed` calls collide with
/// prepared records, and cross the one/two-digit boundary where decimal key
/// order stops matching numeric order.
pub fn record_number_strategy() -> impl Strategy<Value = RecordNumber> {
    (0u64..40).prop_map(RecordNumber::new)
}

/// Strategy for generating a single journal operation.
pub fn journal_op_strategy() -> impl Strategy<Value = JournalOp> {
    prop_oneof![
        4 => payload_strategy().prop_map(JournalOp::Prepare),
        3 => Just(JournalOp::Commit),
        2 => Just(JournalOp::Rollback),
        1 => (record_number_strategy(), payload_strategy())
            .prop_map(|(record, data)| JournalOp::SetCommitted(record, data)),
    ]
}

/// Strategy for generating operation sequences of up to `max_len` steps.
pub fn op_sequence_strategy(max_len: usize) -> impl Strategy<Value = Vec<JournalOp>> {
    prop::collection::vec(journal_op_strategy(), 0..=max_len)
}

/// Configuration for property-based tests.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
        }
    }
}

impl PropTestConfig {
    /// Creates a quick test configuration (fewer cases).
    pub fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
        }
    }

    /// Converts to proptest config.
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}
