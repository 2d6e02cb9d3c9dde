//! Test fixtures and journal helpers.
//!
//! Provides convenience functions for setting up test journals over either
//! store implementation behind one type.

use journalkv_core::{Journal, JournalConfig};
use journalkv_storage::{FileStore, InMemoryStore, OrderedStore, SnapshotCursor};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

/// A store of either built-in kind.
pub type DynStore = Arc<dyn OrderedStore<Cursor = SnapshotCursor>>;

/// Name of the log file inside a fixture's temporary directory.
pub const LOG_FILE: &str = "journal.log";

/// A test journal with automatic cleanup.
pub struct TestJournal {
    /// The journal instance.
    pub journal: Journal<DynStore>,
    /// The temporary directory (kept alive to prevent cleanup).
    temp_dir: Option<TempDir>,
}

impl TestJournal {
    /// Creates a new journal over an in-memory store.
    pub fn memory() -> Self {
        Self::memory_with_config(JournalConfig::default())
    }

    /// Creates a new in-memory journal with the given configuration.
    pub fn memory_with_config(config: JournalConfig) -> Self {
        let store: DynStore = Arc::new(InMemoryStore::new());
        Self {
            journal: Journal::create_with_config(store, config)
                .expect("Failed to create in-memory journal"),
            temp_dir: None,
        }
    }

    /// Creates a new journal over a file store in a temporary directory.
    pub fn file() -> Self {
        Self::file_with_config(JournalConfig::default())
    }

    /// Creates a new file-backed journal with the given configuration.
    pub fn file_with_config(config: JournalConfig) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store: DynStore = Arc::new(
            FileStore::open(&temp_dir.path().join(LOG_FILE)).expect("Failed to open file store"),
        );
        Self {
            journal: Journal::create_with_config(store, config)
                .expect("Failed to create file journal"),
            temp_dir: Some(temp_dir),
        }
    }

    /// Returns the log file path if file-based, None if in-memory.
    pub fn path(&self) -> Option<PathBuf> {
        self.temp_dir.as_ref().map(|d| d.path().join(LOG_FILE))
    }

    /// Closes and reopens the journal, as a restarted process would.
    ///
    /// File-backed journals release the store lock and replay the log;
    /// in-memory journals reattach to the same store.
    pub fn reopen(self) -> Self {
        let config = *self.journal.config();
        let temp_dir = self.temp_dir;

        let store = match &temp_dir {
            Some(dir) => {
                drop(self.journal);
                open_file_store(&dir.path().join(LOG_FILE))
            }
            None => self.journal.into_store(),
        };

        Self {
            journal: Journal::open_with_config(store, config).expect("Failed to reopen journal"),
            temp_dir,
        }
    }
}

fn open_file_store(path: &Path) -> DynStore {
    Arc::new(FileStore::open(path).expect("Failed to reopen file store"))
}

impl std::ops::Deref for TestJournal {
    type Target = Journal<DynStore>;

    fn deref(&self) -> &Self::Target {
        &self.journal
    }
}

/// Runs a test with a temporary in-memory journal.
///
/// # Example
///
/// ```rust
/// use journalkv_testkit::with_temp_journal;
///
/// with_temp_journal(|journal| {
///     journal.prepare("x").unwrap();
///     journal.commit().unwrap();
/// });
/// ```
pub fn with_temp_journal<F, R>(f: F) -> R
where
    F: FnOnce(&Journal<DynStore>) -> R,
{
    let journal = TestJournal::memory();
    f(&journal)
}

/// Runs a test against both store kinds.
pub fn with_each_store<F>(mut f: F)
where
    F: FnMut(TestJournal),
{
    f(TestJournal::memory());
    f(TestJournal::file());
}

/// Prepares and commits each payload in order, returning the record numbers.
pub fn commit_all<S: OrderedStore>(
    journal: &Journal<S>,
    payloads: &[&str],
) -> Vec<journalkv_core::RecordNumber> {
    payloads
        .iter()
        .map(|payload| {
            journal.prepare(payload).expect("Failed to prepare");
            journal.commit().expect("Failed to commit")
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_fixture_has_no_path() {
        let journal = TestJournal::memory();
        assert!(journal.path().is_none());
        assert_eq!(journal.committed().unwrap(), None);
    }

    #[test]
    fn file_fixture_creates_log() {
        let journal = TestJournal::file();
        let path = journal.path().unwrap();
        assert!(path.exists());
    }

    #[test]
    fn reopen_keeps_committed_records() {
        with_each_store(|journal| {
            let records = commit_all(&journal.journal, &["a", "b"]);
            let journal = journal.reopen();
            assert_eq!(journal.committed().unwrap(), records.last().copied());
            assert_eq!(journal.get(records[0]).unwrap(), "a");
        });
    }
}
