//! Dump command implementation.

use super::{CliResult, Target};
use journalkv_core::Journal;
use journalkv_storage::FileStore;
use serde::Serialize;
use std::path::Path;

/// A dumped record.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct DumpedRecord {
    /// Record number.
    pub record: u64,
    /// Whether the record is part of the committed history.
    pub committed: bool,
    /// Whether the record is the outstanding prepare.
    pub pending: bool,
    /// Record payload.
    pub data: String,
}

/// Lists records in store key order.
///
/// Records at or below the committed pointer count as committed, except the
/// pending one.
pub fn collect(journal: &Journal<FileStore>, limit: Option<usize>) -> CliResult<Vec<DumpedRecord>> {
    let status = journal.status()?;
    let records = journal
        .records()?
        .into_iter()
        .take(limit.unwrap_or(usize::MAX))
        .map(|(record, data)| {
            let pending = status.pending == Some(record);
            DumpedRecord {
                record: record.as_u64(),
                committed: !pending && status.committed.is_some_and(|c| record <= c),
                pending,
                data,
            }
        })
        .collect();
    Ok(records)
}

/// Runs the dump command.
pub fn run(path: &Path, target: &Target, limit: Option<usize>, format: &str) -> CliResult<()> {
    let journal = target.open(path)?;
    let records = collect(&journal, limit)?;

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
        _ => {
            for record in &records {
                let state = if record.pending {
                    "pending"
                } else if record.committed {
                    "committed"
                } else {
                    "orphaned"
                };
                println!("{:>20}  {:<9}  {}", record.record, state, record.data);
            }
            println!("{} record(s)", records.len());
        }
    }

    Ok(())
}
