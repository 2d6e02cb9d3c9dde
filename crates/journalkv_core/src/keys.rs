//! Key layout of a journal inside its store.
//!
//! A journal occupies three kinds of keys:
//!
//! | Key | Value |
//! |---|---|
//! | [`COMMITTED_KEY`] | key of the latest committed record, or [`NO_RECORDS`] |
//! | [`PENDING_KEY`] | key of the prepared record; absent when nothing is prepared |
//! | record key | the record's payload |
//!
//! Record keys are produced by a [`KeyEncoding`]. Stores compare keys
//! byte-wise, so with [`KeyEncoding::Decimal`] the key `"10"` sorts before
//! `"2"`. [`KeyEncoding::ZeroPadded`] trades the compact layout for keys whose
//! order matches numeric order.

use crate::types::RecordNumber;

/// Reserved key holding the committed pointer.
pub const COMMITTED_KEY: &str = "committed";

/// Reserved key holding the prepared record, if any.
pub const PENDING_KEY: &str = "pending";

/// Value of [`COMMITTED_KEY`] before anything has been committed.
pub const NO_RECORDS: &str = "";

/// Width of [`KeyEncoding::ZeroPadded`] keys; enough digits for `u64::MAX`.
pub const PADDED_WIDTH: usize = 20;

/// How record numbers are turned into store keys.
///
/// The encoding is not recorded in the store. A journal must always be
/// opened with the encoding it was created with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEncoding {
    /// Plain decimal (`"0"`, `"2"`, `"10"`). Cursor order is lexicographic,
    /// not numeric.
    #[default]
    Decimal,
    /// Zero-padded to [`PADDED_WIDTH`] digits. Cursor order is numeric.
    ZeroPadded,
}

impl KeyEncoding {
    /// Encodes `record` as a store key.
    #[must_use]
    pub fn encode(self, record: RecordNumber) -> String {
        match self {
            Self::Decimal => record.as_u64().to_string(),
            Self::ZeroPadded => format!("{:0width$}", record.as_u64(), width = PADDED_WIDTH),
        }
    }

    /// Decodes a store key produced by [`KeyEncoding::encode`].
    ///
    /// Returns `None` for anything this encoding would not have produced,
    /// including reserved keys and non-canonical spellings such as `"007"`
    /// under [`KeyEncoding::Decimal`].
    #[must_use]
    pub fn decode(self, key: &str) -> Option<RecordNumber> {
        let record = parse_record_number(key)?;
        let canonical = match self {
            Self::Decimal => key.len() == 1 || !key.starts_with('0'),
            Self::ZeroPadded => key.len() == PADDED_WIDTH,
        };
        canonical.then_some(record)
    }
}

/// Parses a record number stored as the value of a reserved key.
///
/// Accepts a non-empty run of ASCII digits that fits in `u64`. Leading zeros
/// are allowed so values written under either encoding parse the same way;
/// signs and whitespace are not.
#[must_use]
pub fn parse_record_number(value: &str) -> Option<RecordNumber> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse::<u64>().ok().map(RecordNumber::new)
}

/// Returns true for keys the journal reserves for its own bookkeeping.
#[must_use]
pub fn is_reserved(key: &str) -> bool {
    key == COMMITTED_KEY || key == PENDING_KEY
}

/// Chooses the number of the next prepared record.
///
/// An empty journal starts at record `0`; otherwise the record after the
/// committed one is used. Returns `None` once the committed record is
/// `u64::MAX` and the record space is exhausted.
#[must_use]
pub fn next_candidate(committed: Option<RecordNumber>) -> Option<RecordNumber> {
    match committed {
        None => Some(RecordNumber::new(0)),
        Some(record) => record.checked_next(),
    }
}
