//! Journal protocol commands.

use super::{has_journal, CliResult, Target};
use journalkv_core::{Journal, RecordNumber};
use std::path::Path;
use tracing::info;

/// Creates a journal at `path`.
///
/// Refuses to reset an existing journal unless `force` is set.
pub fn init(path: &Path, target: &Target, force: bool) -> CliResult<()> {
    let store = target.store(path, true)?;
    if has_journal(&store)? {
        if !force {
            return Err(format!(
                "journal already exists at {}; use --force to reset it",
                path.display()
            )
            .into());
        }
        info!("Resetting committed pointer of {:?}", path);
    }

    Journal::create_with_config(store, target.config)?;
    println!("Created journal at {}", path.display());
    Ok(())
}

/// Prepares `data` as the next record.
pub fn prepare(path: &Path, target: &Target, data: &str) -> CliResult<()> {
    let journal = target.open(path)?;
    let record = journal.prepare(data)?;
    println!("{record}");
    Ok(())
}

/// Commits the pending record.
///
/// Committing with nothing prepared reports it and succeeds, like rollback.
pub fn commit(path: &Path, target: &Target) -> CliResult<()> {
    let journal = target.open(path)?;
    match journal.commit() {
        Ok(record) => println!("{record}"),
        Err(err) if err.is_not_found() => println!("nothing to commit"),
        Err(err) => return Err(err.into()),
    }
    Ok(())
}

/// Rolls back the pending record, if any.
pub fn rollback(path: &Path, target: &Target) -> CliResult<()> {
    let journal = target.open(path)?;
    match journal.rollback()? {
        Some(record) => println!("rolled back {record}"),
        None => println!("nothing pending"),
    }
    Ok(())
}

/// Prints the payload of `record`.
pub fn get(path: &Path, target: &Target, record: u64) -> CliResult<()> {
    let journal = target.open(path)?;
    println!("{}", journal.get(RecordNumber::new(record))?);
    Ok(())
}

/// Installs `data` as `record`.
pub fn set_committed(path: &Path, target: &Target, record: u64, data: &str) -> CliResult<()> {
    let journal = target.open(path)?;
    journal.set_committed(RecordNumber::new(record), data)?;
    info!("Installed record {} in {:?}", record, path);
    Ok(())
}
