//! Benchmark utilities.

use journalkv_core::{Journal, JournalResult, RecordNumber};
use journalkv_storage::OrderedStore;
use rand::distributions::Alphanumeric;
use rand::Rng;

/// Generate a random ASCII payload of the specified length.
pub fn random_payload(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Generate payloads of the specified length.
pub fn generate_payloads(count: usize, len: usize) -> Vec<String> {
    (0..count).map(|_| random_payload(len)).collect()
}

/// Commit `count` records of `len` bytes each, returning the last record.
///
/// Returns `None` when `count` is zero.
pub fn fill_journal<S: OrderedStore>(
    journal: &Journal<S>,
    count: usize,
    len: usize,
) -> JournalResult<Option<RecordNumber>> {
    let mut last = None;
    for payload in generate_payloads(count, len) {
        journal.prepare(&payload)?;
        last = Some(journal.commit()?);
    }
    Ok(last)
}
