//! File-backed store for persistent storage.

use crate::batch::WriteBatch;
use crate::cursor::{apply_ops, Entries, SnapshotCursor};
use crate::error::{StorageError, StorageResult};
use crate::frame::{encode_frame, read_frame};
use crate::store::OrderedStore;
use fs2::FileExt;
use parking_lot::{Mutex, RwLock};
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

/// Options for opening a [`FileStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStoreOptions {
    /// Whether to create the log file if it doesn't exist.
    pub create_if_missing: bool,

    /// Whether to sync the log after every batch (safer but slower).
    pub sync_on_write: bool,
}

impl Default for FileStoreOptions {
    fn default() -> Self {
        Self {
            create_if_missing: true,
            sync_on_write: true,
        }
    }
}

impl FileStoreOptions {
    /// Creates options with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether to create the log file if missing.
    #[must_use]
    pub const fn create_if_missing(mut self, value: bool) -> Self {
        self.create_if_missing = value;
        self
    }

    /// Sets whether to sync the log after every batch.
    #[must_use]
    pub const fn sync_on_write(mut self, value: bool) -> Self {
        self.sync_on_write = value;
        self
    }
}

#[derive(Debug)]
struct LogFile {
    file: File,
    size: u64,
}

/// A persistent ordered store.
///
/// Every applied batch is appended to a single log file as one checksummed
/// frame; the full key space is kept in memory and rebuilt by replaying the
/// log on open. A batch is either entirely in the log or not at all, which
/// is what makes [`OrderedStore::apply`] atomic across crashes.
///
/// # Durability
///
/// - with `sync_on_write` (the default) every batch is `fsync`ed before
///   `apply` returns
/// - a torn frame at the end of the log is dropped on the next open
///
/// # Thread Safety
///
/// This store is thread-safe and can be shared across threads. The log file
/// holds an exclusive advisory lock, so only one `FileStore` per file can be
/// open at a time, in this process or any other.
///
/// # Example
///
/// ```no_run
/// use journalkv_storage::{FileStore, OrderedStore, WriteBatch};
/// use std::path::Path;
///
/// let store = FileStore::open(Path::new("journal.log")).unwrap();
/// let mut batch = WriteBatch::new();
/// batch.set("committed", "");
/// store.apply(&batch).unwrap();
/// ```
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    options: FileStoreOptions,
    /// Log writer, also serializes batches.
    log: Mutex<LogFile>,
    entries: RwLock<Arc<Entries>>,
}

impl FileStore {
    /// Opens or creates a store at the given path with default options.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened, is locked by another
    /// handle, or contains a corrupted frame.
    pub fn open(path: &Path) -> StorageResult<Self> {
        Self::open_with_options(path, FileStoreOptions::default())
    }

    /// Opens a store with explicit options.
    ///
    /// Parent directories are created when `create_if_missing` is set.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file doesn't exist and `create_if_missing` is false
    /// - Another handle holds the lock (returns `Locked`)
    /// - A complete frame fails validation (returns `Corrupted`)
    /// - I/O errors occur
    pub fn open_with_options(path: &Path, options: FileStoreOptions) -> StorageResult<Self> {
        if !path.exists() {
            if !options.create_if_missing {
                return Err(StorageError::NotFound {
                    path: path.to_path_buf(),
                });
            }
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(options.create_if_missing)
            .truncate(false)
            .open(path)?;

        if file.try_lock_exclusive().is_err() {
            return Err(StorageError::Locked {
                path: path.to_path_buf(),
            });
        }

        let mut data = Vec::new();
        file.read_to_end(&mut data)?;

        let mut entries = Entries::new();
        let mut offset = 0;
        let mut frames = 0usize;
        while let Some((batch, consumed)) = read_frame(&data[offset..])? {
            apply_ops(&mut entries, &batch);
            offset += consumed;
            frames += 1;
        }

        if offset < data.len() {
            warn!(
                path = %path.display(),
                valid_bytes = offset,
                discarded_bytes = data.len() - offset,
                "truncating torn batch frame at end of log"
            );
            file.set_len(offset as u64)?;
            file.sync_all()?;
        }

        debug!(
            path = %path.display(),
            frames,
            entries = entries.len(),
            "opened file store"
        );

        Ok(Self {
            path: path.to_path_buf(),
            options,
            log: Mutex::new(LogFile {
                file,
                size: offset as u64,
            }),
            entries: RwLock::new(Arc::new(entries)),
        })
    }

    /// Returns the path to the log file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the options this store was opened with.
    #[must_use]
    pub fn options(&self) -> FileStoreOptions {
        self.options
    }

    /// Returns the size of the batch log in bytes.
    #[must_use]
    pub fn log_size(&self) -> u64 {
        self.log.lock().size
    }

    /// Returns a copy of all entries in key order.
    #[must_use]
    pub fn entries(&self) -> Vec<(String, String)> {
        self.entries
            .read()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if the store holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

fn write_frame(log: &mut LogFile, frame: &[u8], sync: bool) -> std::io::Result<()> {
    log.file.seek(SeekFrom::Start(log.size))?;
    log.file.write_all(frame)?;
    log.file.flush()?;
    if sync {
        log.file.sync_data()?;
    }
    Ok(())
}

impl OrderedStore for FileStore {
    type Cursor = SnapshotCursor;

    fn cursor(&self) -> StorageResult<SnapshotCursor> {
        Ok(SnapshotCursor::new(Arc::clone(&self.entries.read())))
    }

    fn apply(&self, batch: &WriteBatch) -> StorageResult<()> {
        if batch.is_empty() {
            return Ok(());
        }

        let frame = encode_frame(batch)?;
        let mut log = self.log.lock();

        if let Err(err) = write_frame(&mut log, &frame, self.options.sync_on_write) {
            let size = log.size;
            if let Err(truncate_err) = log.file.set_len(size) {
                warn!(
                    path = %self.path.display(),
                    error = %truncate_err,
                    "failed to discard partially written batch frame"
                );
            }
            return Err(err.into());
        }
        log.size += frame.len() as u64;

        // Publish while still holding the log lock so readers see batches in log order.
        let mut entries = self.entries.write();
        apply_ops(Arc::make_mut(&mut entries), batch);
        Ok(())
    }
}
