//! The prepare/commit/rollback journal.

use crate::config::JournalConfig;
use crate::error::{JournalError, JournalResult};
use crate::keys::{
    is_reserved, next_candidate, parse_record_number, COMMITTED_KEY, NO_RECORDS, PENDING_KEY,
};
use crate::plan::plan_set_committed;
use crate::types::RecordNumber;
use journalkv_storage::{OrderedStore, StoreCursor, WriteBatch};
use parking_lot::Mutex;
use tracing::{debug, warn};

/// Committed and pending pointers read from one store snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JournalStatus {
    /// Latest committed record; `None` if nothing has been committed.
    pub committed: Option<RecordNumber>,
    /// Outstanding prepared record, if any.
    pub pending: Option<RecordNumber>,
}

/// Raw reserved-key values as stored.
struct RawState {
    committed: Option<String>,
    pending: Option<String>,
}

/// A write-ahead journal of numbered records.
///
/// Records go through two phases: [`Journal::prepare`] writes the payload
/// and marks it pending, then [`Journal::commit`] moves the committed pointer
/// to it or [`Journal::rollback`] drops the pending mark. Each mutating call
/// issues exactly one batch, so the store's per-batch atomicity is the
/// journal's crash consistency.
///
/// ## Single Writer
///
/// Mutating calls on one `Journal` are serialized by an internal lock, so a
/// journal can be shared across threads behind an `Arc`. Two `Journal`
/// values over the same store are not coordinated with each other: each
/// store must have a single logical writer.
///
/// ## Visibility
///
/// [`Journal::get`] does not distinguish committed from pending records; a
/// prepared payload is readable before it is committed.
#[derive(Debug)]
pub struct Journal<S: OrderedStore> {
    store: S,
    config: JournalConfig,
    /// Write lock - check-then-act sequences run under it.
    write_lock: Mutex<()>,
}

impl<S: OrderedStore> Journal<S> {
    /// Initializes a journal in `store` with the default configuration.
    ///
    /// See [`Journal::create_with_config`].
    pub fn create(store: S) -> JournalResult<Self> {
        Self::create_with_config(store, JournalConfig::default())
    }

    /// Initializes a journal in `store`.
    ///
    /// Sets the committed pointer to "nothing committed" and clears any
    /// pending record, in one batch. Calling this on a store that already
    /// holds a journal resets its committed pointer; record payloads stay in
    /// the store but are no longer part of the committed history.
    ///
    /// # Errors
    ///
    /// Returns [`JournalError::Storage`] if the batch cannot be applied.
    pub fn create_with_config(store: S, config: JournalConfig) -> JournalResult<Self> {
        let journal = Self::with_parts(store, config);
        {
            let _guard = journal.write_lock.lock();
            let mut batch = WriteBatch::new();
            batch.set(COMMITTED_KEY, NO_RECORDS).delete(PENDING_KEY);
            journal.store.apply(&batch)?;
        }
        debug!(encoding = ?config.key_encoding, "created journal");
        Ok(journal)
    }

    /// Attaches to an existing journal with the default configuration.
    ///
    /// See [`Journal::open_with_config`].
    pub fn open(store: S) -> JournalResult<Self> {
        Self::open_with_config(store, JournalConfig::default())
    }

    /// Attaches to an existing journal.
    ///
    /// A prepare left outstanding by a previous session is kept and can be
    /// committed or rolled back.
    ///
    /// # Errors
    ///
    /// - [`JournalError::NotAJournal`] if the committed pointer is missing
    /// - [`JournalError::CorruptState`] if it cannot be decoded
    /// - [`JournalError::Storage`] if the store cannot be read
    pub fn open_with_config(store: S, config: JournalConfig) -> JournalResult<Self> {
        let journal = Self::with_parts(store, config);
        let committed = match journal.lookup(COMMITTED_KEY)? {
            Some(value) => decode_committed(Some(&value))?,
            None => return Err(JournalError::NotAJournal),
        };
        debug!(committed = ?committed, "opened journal");
        Ok(journal)
    }

    fn with_parts(store: S, config: JournalConfig) -> Self {
        Self {
            store,
            config,
            write_lock: Mutex::new(()),
        }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the journal configuration.
    pub fn config(&self) -> &JournalConfig {
        &self.config
    }

    /// Consumes the journal and returns its store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Writes `data` as a new pending record and returns its number.
    ///
    /// The record number is the one after the committed record (or `0` for
    /// an empty journal).
    ///
    /// # Errors
    ///
    /// - [`JournalError::AlreadyPrepared`] if a prepare is outstanding
    /// - [`JournalError::CorruptState`] if a reserved key cannot be decoded
    /// - [`JournalError::RecordSpaceExhausted`] after record `u64::MAX`
    /// - [`JournalError::Storage`] if the store fails
    pub fn prepare(&self, data: &str) -> JournalResult<RecordNumber> {
        let _guard = self.write_lock.lock();
        let state = self.read_state()?;

        if let Some(pending) = state.pending {
            return Err(JournalError::AlreadyPrepared {
                pending: decode_pending(&pending)?,
            });
        }

        let committed = decode_committed(state.committed.as_deref())?;
        let record = next_candidate(committed).ok_or(JournalError::RecordSpaceExhausted)?;
        let key = self.config.key_encoding.encode(record);

        let mut batch = WriteBatch::new();
        batch.set(key.as_str(), data).set(PENDING_KEY, key);
        self.store.apply(&batch)?;

        debug!(%record, bytes = data.len(), "prepared record");
        Ok(record)
    }

    /// Discards the outstanding prepare, if any.
    ///
    /// Rolling back with nothing pending is a no-op. The discarded payload is
    /// left in the store; the next prepare reuses its number and overwrites
    /// it. Returns the discarded record, or `None` if nothing was pending or
    /// the pending pointer could not be decoded (it is discarded anyway).
    ///
    /// # Errors
    ///
    /// Returns [`JournalError::Storage`] if the store fails.
    pub fn rollback(&self) -> JournalResult<Option<RecordNumber>> {
        let _guard = self.write_lock.lock();
        let Some(pending) = self.lookup(PENDING_KEY)? else {
            debug!("rollback with nothing pending");
            return Ok(None);
        };

        let mut batch = WriteBatch::new();
        batch.delete(PENDING_KEY);
        self.store.apply(&batch)?;

        let record = parse_record_number(&pending);
        match record {
            Some(record) => debug!(%record, "rolled back record"),
            None => warn!(value = %pending, "discarded undecodable pending pointer"),
        }
        Ok(record)
    }

    /// Promotes the pending record to committed and returns its number.
    ///
    /// # Errors
    ///
    /// - [`JournalError::NothingToCommit`] if nothing is prepared
    /// - [`JournalError::CommitRegression`] if strict commit order is enabled
    ///   and the pending record is not newer than the committed one; the
    ///   prepare stays outstanding
    /// - [`JournalError::CorruptState`] if a reserved key cannot be decoded
    /// - [`JournalError::Storage`] if the store fails
    pub fn commit(&self) -> JournalResult<RecordNumber> {
        let _guard = self.write_lock.lock();
        let state = self.read_state()?;

        let pending_key = state.pending.ok_or(JournalError::NothingToCommit)?;
        let pending = decode_pending(&pending_key)?;
        let committed = decode_committed(state.committed.as_deref())?;

        if self.config.strict_commit_order && committed.is_some_and(|c| pending <= c) {
            warn!(%pending, committed = ?committed, "refusing commit that regresses committed pointer");
            return Err(JournalError::CommitRegression { pending, committed });
        }

        let mut batch = WriteBatch::new();
        batch.set(COMMITTED_KEY, pending_key).delete(PENDING_KEY);
        self.store.apply(&batch)?;

        debug!(record = %pending, "committed record");
        Ok(pending)
    }

    /// Returns the outstanding prepared record.
    ///
    /// # Errors
    ///
    /// - [`JournalError::NothingPending`] if nothing is prepared
    /// - [`JournalError::CorruptState`] if the pointer cannot be decoded
    pub fn pending(&self) -> JournalResult<RecordNumber> {
        match self.lookup(PENDING_KEY)? {
            Some(value) => decode_pending(&value),
            None => Err(JournalError::NothingPending),
        }
    }

    /// Returns the latest committed record, or `None` if nothing has been
    /// committed yet.
    ///
    /// # Errors
    ///
    /// Returns [`JournalError::CorruptState`] if the committed pointer is
    /// missing or cannot be decoded.
    pub fn committed(&self) -> JournalResult<Option<RecordNumber>> {
        decode_committed(self.lookup(COMMITTED_KEY)?.as_deref())
    }

    /// Returns both pointers as of a single store snapshot.
    ///
    /// # Errors
    ///
    /// - [`JournalError::CorruptState`] if either pointer cannot be decoded or
    ///   the committed pointer is missing
    /// - [`JournalError::Storage`] if the store cannot be read
    pub fn status(&self) -> JournalResult<JournalStatus> {
        let state = self.read_state()?;
        Ok(JournalStatus {
            committed: decode_committed(state.committed.as_deref())?,
            pending: state.pending.as_deref().map(decode_pending).transpose()?,
        })
    }

    /// Returns the payload stored for `record`, committed or pending.
    ///
    /// # Errors
    ///
    /// Returns [`JournalError::RecordNotFound`] if no entry exists.
    pub fn get(&self, record: RecordNumber) -> JournalResult<String> {
        let key = self.config.key_encoding.encode(record);
        self.lookup(&key)?
            .ok_or(JournalError::RecordNotFound { record })
    }

    /// Stores `data` as `record` and advances the committed pointer to
    /// `record` if it is newer than the committed one.
    ///
    /// The payload is written whether or not the pointer moves. The pending
    /// pointer is left alone.
    ///
    /// # Errors
    ///
    /// - [`JournalError::CorruptState`] if the committed pointer cannot be decoded
    /// - [`JournalError::Storage`] if the store fails
    pub fn set_committed(&self, record: RecordNumber, data: &str) -> JournalResult<()> {
        let _guard = self.write_lock.lock();
        let committed = decode_committed(self.lookup(COMMITTED_KEY)?.as_deref())?;

        let plan = plan_set_committed(committed, record, data);
        self.store.apply(&plan.to_batch(self.config.key_encoding))?;

        debug!(%record, advanced = plan.advances_to().is_some(), "set committed record");
        Ok(())
    }

    /// Returns every record entry in store key order.
    ///
    /// Under [`crate::KeyEncoding::Decimal`] the order is lexicographic
    /// (`10` before `2`), not numeric. Keys that are not records under the
    /// configured encoding are skipped.
    pub fn records(&self) -> JournalResult<Vec<(RecordNumber, String)>> {
        let mut cursor = self.store.cursor()?;
        let mut records = Vec::new();
        while cursor.advance() {
            let (Some(key), Some(value)) = (cursor.key(), cursor.value()) else {
                break;
            };
            if is_reserved(key) {
                continue;
            }
            if let Some(record) = self.config.key_encoding.decode(key) {
                records.push((record, value.to_owned()));
            }
        }
        Ok(records)
    }

    fn lookup(&self, key: &str) -> JournalResult<Option<String>> {
        let mut cursor = self.store.cursor()?;
        Ok(cursor_get(&mut cursor, key))
    }

    fn read_state(&self) -> JournalResult<RawState> {
        let mut cursor = self.store.cursor()?;
        Ok(RawState {
            committed: cursor_get(&mut cursor, COMMITTED_KEY),
            pending: cursor_get(&mut cursor, PENDING_KEY),
        })
    }
}

/// Seeks to `key` and returns its value if present.
fn cursor_get<C: StoreCursor>(cursor: &mut C, key: &str) -> Option<String> {
    cursor.seek(key);
    while cursor.advance() {
        match cursor.key() {
            Some(k) if k == key => return cursor.value().map(str::to_owned),
            Some(k) if k > key => break,
            Some(_) => {}
            None => break,
        }
    }
    None
}

fn decode_committed(value: Option<&str>) -> JournalResult<Option<RecordNumber>> {
    match value {
        None => Err(JournalError::corrupt(COMMITTED_KEY, "committed pointer is missing")),
        Some(NO_RECORDS) => Ok(None),
        Some(value) => parse_record_number(value).map(Some).ok_or_else(|| {
            JournalError::corrupt(COMMITTED_KEY, format!("invalid record number {value:?}"))
        }),
    }
}

fn decode_pending(value: &str) -> JournalResult<RecordNumber> {
    parse_record_number(value).ok_or_else(|| {
        JournalError::corrupt(PENDING_KEY, format!("invalid record number {value:?}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::KeyEncoding;
    use journalkv_storage::{
        FileStore, InMemoryStore, SnapshotCursor, StorageError, StorageResult,
    };
    use std::sync::atomic::{AtomicBool, Ordering};
    use tempfile::tempdir;

    fn rn(n: u64) -> RecordNumber {
        RecordNumber::new(n)
    }

    fn new_journal() -> Journal<InMemoryStore> {
        Journal::create(InMemoryStore::new()).unwrap()
    }

    /// Store whose writes can be made to fail.
    #[derive(Default)]
    struct FlakyStore {
        inner: InMemoryStore,
        fail_writes: AtomicBool,
    }

    impl OrderedStore for FlakyStore {
        type Cursor = SnapshotCursor;

        fn cursor(&self) -> StorageResult<SnapshotCursor> {
            self.inner.cursor()
        }

        fn apply(&self, batch: &WriteBatch) -> StorageResult<()> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(StorageError::Io(std::io::Error::other("disk full")));
            }
            self.inner.apply(batch)
        }
    }

    #[test]
    fn create_writes_empty_committed_pointer() {
        let journal = new_journal();
        assert_eq!(
            journal.store().entries(),
            vec![(COMMITTED_KEY.to_string(), String::new())]
        );
        assert_eq!(journal.committed().unwrap(), None);
    }

    #[test]
    fn create_twice_resets_committed() {
        let journal = new_journal();
        let record = journal.prepare("x").unwrap();
        journal.commit().unwrap();
        journal.prepare("y").unwrap();

        let journal = Journal::create(journal.into_store()).unwrap();
        assert_eq!(journal.committed().unwrap(), None);
        assert!(matches!(journal.pending(), Err(JournalError::NothingPending)));
        // Payloads survive, but the next prepare reuses their numbers.
        assert_eq!(journal.get(record).unwrap(), "x");
        assert_eq!(journal.prepare("z").unwrap(), record);
    }

    #[test]
    fn open_requires_create() {
        let result = Journal::open(InMemoryStore::new());
        assert!(matches!(result, Err(JournalError::NotAJournal)));

        let result = Journal::open(InMemoryStore::with_entries([("pending", "0")]));
        assert!(matches!(result, Err(JournalError::NotAJournal)));
    }

    #[test]
    fn open_rejects_undecodable_committed() {
        let result = Journal::open(InMemoryStore::with_entries([("committed", "seven")]));
        assert!(matches!(result, Err(JournalError::CorruptState { .. })));
    }

    #[test]
    fn open_preserves_outstanding_prepare() {
        let journal = new_journal();
        let record = journal.prepare("draft").unwrap();

        let journal = Journal::open(journal.into_store()).unwrap();
        assert_eq!(journal.pending().unwrap(), record);
        assert_eq!(journal.commit().unwrap(), record);
    }

    #[test]
    fn prepare_numbers_records_after_committed() {
        let journal = new_journal();
        assert_eq!(journal.prepare("a").unwrap(), rn(0));
        journal.commit().unwrap();
        assert_eq!(journal.prepare("b").unwrap(), rn(1));
        journal.commit().unwrap();
        assert_eq!(journal.prepare("c").unwrap(), rn(2));
    }

    #[test]
    fn prepare_twice_fails() {
        let journal = new_journal();
        journal.prepare("first").unwrap();

        let result = journal.prepare("second");
        assert!(matches!(
            result,
            Err(JournalError::AlreadyPrepared { pending }) if pending == rn(0)
        ));
        assert_eq!(journal.get(rn(0)).unwrap(), "first");
    }

    #[test]
    fn prepared_payload_is_readable_before_commit() {
        let journal = new_journal();
        let record = journal.prepare("tentative").unwrap();
        assert_eq!(journal.get(record).unwrap(), "tentative");
        assert_eq!(journal.committed().unwrap(), None);
    }

    #[test]
    fn rollback_with_nothing_pending_is_noop() {
        let journal = new_journal();
        let before = journal.store().entries();

        assert_eq!(journal.rollback().unwrap(), None);
        assert_eq!(journal.store().entries(), before);
    }

    #[test]
    fn rollback_twice_after_prepare() {
        let journal = new_journal();
        let record = journal.prepare("x").unwrap();

        assert_eq!(journal.rollback().unwrap(), Some(record));
        assert_eq!(journal.rollback().unwrap(), None);
        assert!(matches!(journal.pending(), Err(JournalError::NothingPending)));
    }

    #[test]
    fn rollback_leaves_payload_and_number_is_reused() {
        let journal = new_journal();
        let record = journal.prepare("discarded").unwrap();
        journal.rollback().unwrap();

        assert_eq!(journal.get(record).unwrap(), "discarded");
        assert_eq!(journal.committed().unwrap(), None);

        assert_eq!(journal.prepare("kept").unwrap(), record);
        assert_eq!(journal.get(record).unwrap(), "kept");
    }

    #[test]
    fn rollback_clears_undecodable_pending() {
        let store = InMemoryStore::with_entries([("committed", ""), ("pending", "garbage")]);
        let journal = Journal::open(store).unwrap();

        assert!(matches!(
            journal.prepare("x"),
            Err(JournalError::CorruptState { .. })
        ));
        assert_eq!(journal.rollback().unwrap(), None);
        assert_eq!(journal.prepare("x").unwrap(), rn(0));
    }

    #[test]
    fn prepare_over_undecodable_pending_reports_corruption() {
        let store = InMemoryStore::with_entries([("committed", "4"), ("pending", "x1")]);
        let journal = Journal::open(store).unwrap();

        let result = journal.prepare("y");
        assert!(matches!(
            result,
            Err(JournalError::CorruptState { ref key, .. }) if key == PENDING_KEY
        ));
        assert!(journal.get(rn(5)).is_err());
    }

    #[test]
    fn commit_without_prepare_fails() {
        let journal = new_journal();
        assert!(matches!(journal.commit(), Err(JournalError::NothingToCommit)));
    }

    #[test]
    fn prepare_commit_get_round_trip() {
        let journal = new_journal();
        let record = journal.prepare("x").unwrap();
        assert_eq!(journal.commit().unwrap(), record);

        assert_eq!(journal.get(record).unwrap(), "x");
        assert_eq!(journal.committed().unwrap(), Some(record));
        assert!(matches!(journal.pending(), Err(JournalError::NothingPending)));
    }

    #[test]
    fn commit_stores_pending_key_verbatim() {
        let journal = Journal::create_with_config(
            InMemoryStore::new(),
            JournalConfig::new().key_encoding(KeyEncoding::ZeroPadded),
        )
        .unwrap();
        journal.prepare("x").unwrap();
        journal.commit().unwrap();

        let entries = journal.store().entries();
        let committed = entries.iter().find(|(k, _)| k == COMMITTED_KEY).unwrap();
        assert_eq!(committed.1, "00000000000000000000");
        assert_eq!(journal.committed().unwrap(), Some(rn(0)));
    }

    #[test]
    fn get_missing_record() {
        let journal = new_journal();
        assert!(matches!(
            journal.get(rn(3)),
            Err(JournalError::RecordNotFound { record }) if record == rn(3)
        ));
    }

    #[test]
    fn get_does_not_match_prefix_keys() {
        let journal = new_journal();
        journal.set_committed(rn(10), "ten").unwrap();
        assert!(matches!(
            journal.get(rn(1)),
            Err(JournalError::RecordNotFound { .. })
        ));
    }

    #[test]
    fn committed_missing_after_init_is_corruption() {
        let journal = new_journal();
        let mut batch = WriteBatch::new();
        batch.delete(COMMITTED_KEY);
        journal.store().apply(&batch).unwrap();

        assert!(matches!(
            journal.committed(),
            Err(JournalError::CorruptState { .. })
        ));
        assert!(matches!(
            journal.prepare("x"),
            Err(JournalError::CorruptState { .. })
        ));
    }

    #[test]
    fn status_reports_both_pointers() {
        let journal = new_journal();
        assert_eq!(
            journal.status().unwrap(),
            JournalStatus {
                committed: None,
                pending: None
            }
        );

        journal.prepare("a").unwrap();
        journal.commit().unwrap();
        journal.prepare("b").unwrap();
        assert_eq!(
            journal.status().unwrap(),
            JournalStatus {
                committed: Some(rn(0)),
                pending: Some(rn(1))
            }
        );
    }

    #[test]
    fn decimal_records_iterate_lexicographically() {
        let journal = new_journal();
        for n in [2, 9, 10] {
            journal.set_committed(rn(n), &format!("r{n}")).unwrap();
        }

        let mut cursor = journal.store().cursor().unwrap();
        let mut keys = Vec::new();
        while cursor.advance() {
            let key = cursor.key().unwrap();
            if !is_reserved(key) {
                keys.push(key.to_string());
            }
        }
        assert_eq!(keys, vec!["10", "2", "9"]);

        let numbers: Vec<u64> = journal
            .records()
            .unwrap()
            .into_iter()
            .map(|(r, _)| r.as_u64())
            .collect();
        assert_eq!(numbers, vec![10, 2, 9]);
    }

    #[test]
    fn padded_records_iterate_numerically() {
        let journal = Journal::create_with_config(
            InMemoryStore::new(),
            JournalConfig::new().key_encoding(KeyEncoding::ZeroPadded),
        )
        .unwrap();
        for n in [10, 2, 9] {
            journal.set_committed(rn(n), &format!("r{n}")).unwrap();
        }

        let records = journal.records().unwrap();
        assert_eq!(
            records,
            vec![
                (rn(2), "r2".to_string()),
                (rn(9), "r9".to_string()),
                (rn(10), "r10".to_string()),
            ]
        );
    }

    #[test]
    fn set_committed_advances_for_newer_record() {
        let journal = new_journal();
        journal.prepare("a").unwrap();
        journal.commit().unwrap();

        journal.set_committed(rn(5), "five").unwrap();
        assert_eq!(journal.committed().unwrap(), Some(rn(5)));
        assert_eq!(journal.get(rn(5)).unwrap(), "five");
        assert_eq!(journal.prepare("six").unwrap(), rn(6));
    }

    #[test]
    fn set_committed_older_record_only_overwrites_payload() {
        let journal = new_journal();
        journal.set_committed(rn(10), "ten").unwrap();
        journal.set_committed(rn(9), "nine").unwrap();

        assert_eq!(journal.committed().unwrap(), Some(rn(10)));
        assert_eq!(journal.get(rn(9)).unwrap(), "nine");

        journal.set_committed(rn(10), "ten again").unwrap();
        assert_eq!(journal.committed().unwrap(), Some(rn(10)));
        assert_eq!(journal.get(rn(10)).unwrap(), "ten again");
    }

    #[test]
    fn set_committed_leaves_pending_alone() {
        let journal = new_journal();
        let pending = journal.prepare("draft").unwrap();
        journal.set_committed(rn(3), "three").unwrap();

        assert_eq!(journal.pending().unwrap(), pending);
    }

    #[test]
    fn strict_commit_refuses_regression() {
        let journal = new_journal();
        let pending = journal.prepare("draft").unwrap();
        journal.set_committed(rn(4), "four").unwrap();

        let result = journal.commit();
        assert!(matches!(
            result,
            Err(JournalError::CommitRegression { pending: p, committed: Some(c) })
                if p == pending && c == rn(4)
        ));
        assert_eq!(journal.pending().unwrap(), pending);
        assert_eq!(journal.committed().unwrap(), Some(rn(4)));
    }

    #[test]
    fn lenient_commit_installs_pending_verbatim() {
        let journal = Journal::create_with_config(
            InMemoryStore::new(),
            JournalConfig::new().strict_commit_order(false),
        )
        .unwrap();
        let pending = journal.prepare("draft").unwrap();
        journal.set_committed(rn(4), "four").unwrap();

        assert_eq!(journal.commit().unwrap(), pending);
        assert_eq!(journal.committed().unwrap(), Some(pending));
    }

    #[test]
    fn record_space_exhausted() {
        let store = InMemoryStore::with_entries([("committed", u64::MAX.to_string())]);
        let journal = Journal::open(store).unwrap();
        assert!(matches!(
            journal.prepare("x"),
            Err(JournalError::RecordSpaceExhausted)
        ));
    }

    #[test]
    fn store_failure_propagates_without_partial_state() {
        let journal = Journal::create(FlakyStore::default()).unwrap();
        journal.prepare("a").unwrap();
        journal.store().fail_writes.store(true, Ordering::SeqCst);

        assert!(matches!(journal.commit(), Err(JournalError::Storage(_))));
        assert!(matches!(journal.rollback(), Err(JournalError::Storage(_))));

        journal.store().fail_writes.store(false, Ordering::SeqCst);
        assert_eq!(journal.pending().unwrap(), rn(0));
        assert_eq!(journal.committed().unwrap(), None);
    }

    #[test]
    fn file_backed_journal_survives_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("journal.log");

        {
            let journal = Journal::create(FileStore::open(&path).unwrap()).unwrap();
            journal.prepare("first").unwrap();
            journal.commit().unwrap();
            journal.set_committed(rn(10), "ten").unwrap();
            journal.prepare("eleven").unwrap();
        }

        let journal = Journal::open(FileStore::open(&path).unwrap()).unwrap();
        assert_eq!(
            journal.status().unwrap(),
            JournalStatus {
                committed: Some(rn(10)),
                pending: Some(rn(11))
            }
        );
        assert_eq!(journal.get(rn(0)).unwrap(), "first");
        assert_eq!(journal.commit().unwrap(), rn(11));
        assert_eq!(journal.get(rn(11)).unwrap(), "eleven");
    }

    #[test]
    fn cursor_get_exact_match_only() {
        let store = InMemoryStore::with_entries([("1", "one"), ("10", "ten"), ("100", "hundred")]);
        let mut cursor = store.cursor().unwrap();

        assert_eq!(cursor_get(&mut cursor, "10").as_deref(), Some("ten"));
        assert_eq!(cursor_get(&mut cursor, "1").as_deref(), Some("one"));
        assert_eq!(cursor_get(&mut cursor, "2"), None);
        assert_eq!(cursor_get(&mut cursor, "0"), None);
    }
}
