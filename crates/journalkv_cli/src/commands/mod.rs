//! CLI command implementations.

pub mod dump;
pub mod protocol;
pub mod status;

use journalkv_core::{Journal, JournalConfig, COMMITTED_KEY};
use journalkv_storage::{FileStore, FileStoreOptions, OrderedStore, StoreCursor};
use std::path::Path;

/// Result type for command implementations.
pub type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

/// How to open the journal a command operates on.
#[derive(Debug, Clone, Copy)]
pub struct Target {
    /// Journal configuration.
    pub config: JournalConfig,
    /// Whether the store syncs after every batch.
    pub sync_on_write: bool,
}

impl Target {
    fn store(&self, path: &Path, create: bool) -> CliResult<FileStore> {
        let options = FileStoreOptions::new()
            .create_if_missing(create)
            .sync_on_write(self.sync_on_write);
        Ok(FileStore::open_with_options(path, options)?)
    }

    /// Opens an existing journal.
    pub fn open(&self, path: &Path) -> CliResult<Journal<FileStore>> {
        let store = self.store(path, false)?;
        Ok(Journal::open_with_config(store, self.config)?)
    }
}

/// Returns true if `store` already holds a committed pointer.
fn has_journal(store: &FileStore) -> CliResult<bool> {
    let mut cursor = store.cursor()?;
    cursor.seek(COMMITTED_KEY);
    Ok(cursor.advance() && cursor.key() == Some(COMMITTED_KEY))
}
