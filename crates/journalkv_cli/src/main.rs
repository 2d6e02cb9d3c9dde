//! journalkv CLI
//!
//! Command-line tools for journals stored in a file-backed store.
//!
//! # Commands
//!
//! - `init` - Create a journal
//! - `prepare` / `commit` / `rollback` - Drive the two-phase protocol
//! - `get` - Print a record payload
//! - `set-committed` - Install a record and advance the committed pointer
//! - `status` - Show the committed and pending pointers
//! - `dump` - List every record in key order

mod commands;

use clap::{Parser, Subcommand};
use journalkv_core::{JournalConfig, KeyEncoding};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// journalkv command-line journal tools.
#[derive(Parser)]
#[command(name = "journalkv")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the journal log file
    #[arg(global = true, short, long)]
    path: Option<PathBuf>,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    /// Use zero-padded record keys (must match how the journal was created)
    #[arg(global = true, long)]
    padded: bool,

    /// Skip fsync after each write
    #[arg(global = true, long)]
    no_sync: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new journal
    Init {
        /// Reset the committed pointer of an existing journal
        #[arg(short, long)]
        force: bool,
    },

    /// Write a pending record
    Prepare {
        /// Record payload
        data: String,
    },

    /// Commit the pending record
    Commit,

    /// Discard the pending record
    Rollback,

    /// Print a record payload
    Get {
        /// Record number
        record: u64,
    },

    /// Install a record and advance the committed pointer if it is newer
    SetCommitted {
        /// Record number
        record: u64,
        /// Record payload
        data: String,
    },

    /// Show the committed and pending pointers
    Status {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// List every record in store key order
    Dump {
        /// Maximum number of records to dump
        #[arg(short, long)]
        limit: Option<usize>,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Show version information
    Version,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let encoding = if cli.padded {
        KeyEncoding::ZeroPadded
    } else {
        KeyEncoding::Decimal
    };
    let target = commands::Target {
        config: JournalConfig::new().key_encoding(encoding),
        sync_on_write: !cli.no_sync,
    };

    let path = || cli.path.as_deref().ok_or("Journal path required (--path)");

    match cli.command {
        Commands::Init { force } => commands::protocol::init(path()?, &target, force)?,
        Commands::Prepare { data } => commands::protocol::prepare(path()?, &target, &data)?,
        Commands::Commit => commands::protocol::commit(path()?, &target)?,
        Commands::Rollback => commands::protocol::rollback(path()?, &target)?,
        Commands::Get { record } => commands::protocol::get(path()?, &target, record)?,
        Commands::SetCommitted { record, data } => {
            commands::protocol::set_committed(path()?, &target, record, &data)?;
        }
        Commands::Status { format } => commands::status::run(path()?, &target, &format)?,
        Commands::Dump { limit, format } => {
            commands::dump::run(path()?, &target, limit, &format)?;
        }
        Commands::Version => {
            println!("journalkv CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("journalkv Core v{}", journalkv_core::VERSION);
        }
    }

    Ok(())
}
