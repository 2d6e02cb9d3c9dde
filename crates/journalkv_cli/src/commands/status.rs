//! Status command implementation.

use super::{CliResult, Target};
use journalkv_core::{Journal, JournalStatus};
use journalkv_storage::FileStore;
use serde::Serialize;
use std::path::Path;

/// Journal status report.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct StatusReport {
    /// Log file path.
    pub path: String,
    /// Log size in bytes.
    pub log_size: u64,
    /// Latest committed record.
    pub committed: Option<u64>,
    /// Outstanding prepared record.
    pub pending: Option<u64>,
    /// Number of record entries, committed or not.
    pub records: usize,
}

/// Builds the status report for an open journal.
pub fn collect(journal: &Journal<FileStore>) -> CliResult<StatusReport> {
    let JournalStatus { committed, pending } = journal.status()?;
    Ok(StatusReport {
        path: journal.store().path().display().to_string(),
        log_size: journal.store().log_size(),
        committed: committed.map(|r| r.as_u64()),
        pending: pending.map(|r| r.as_u64()),
        records: journal.records()?.len(),
    })
}

/// Runs the status command.
pub fn run(path: &Path, target: &Target, format: &str) -> CliResult<()> {
    let journal = target.open(path)?;
    let report = collect(&journal)?;

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        _ => {
            let show = |r: Option<u64>| r.map_or_else(|| "-".to_string(), |r| r.to_string());
            println!("Journal:   {}", report.path);
            println!("Log size:  {} bytes", report.log_size);
            println!("Committed: {}", show(report.committed));
            println!("Pending:   {}", show(report.pending));
            println!("Records:   {}", report.records);
        }
    }

    Ok(())
}
