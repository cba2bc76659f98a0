// List the immediate children of a directory with their total sizes,
// largest first, in whole kilobytes.

pub mod error;
pub mod report;
pub mod sizer;

use std::path::PathBuf;

use clap::Parser;
use log::debug;

pub use error::{Result, ScanError};
pub use report::{render, render_line, sort_entries, to_kilobytes};
pub use sizer::{scan, scan_with, DirEntry, EntryKind, ScanOptions};

#[derive(Parser, Debug)]
#[command(version = "0.1")]
#[command(about = "display sizes of the files and directories inside a directory", long_about = None)]
pub struct Cli {
    /// print results in ascending order, rather than the default descending
    #[arg(short, long)]
    ascending: bool,

    /// show time of last modification of file, or of the newest file in a sub-directory
    #[arg(long)]
    time: bool,

    /// warn about and skip unreadable entries instead of stopping
    #[arg(long)]
    skip_unreadable: bool,

    /// absolute path of the directory to scan
    path: Option<PathBuf>,
}

/// Scan the directory named on the command line and return the report lines.
pub fn list_files(cli: &Cli) -> Result<Vec<String>> {
    let path = cli.path.as_deref().ok_or(ScanError::MissingArgument)?;

    let options = ScanOptions {
        skip_unreadable: cli.skip_unreadable,
    };
    let mut entries = scan_with(path, &options)?;
    debug!("{} entries under {}", entries.len(), path.display());

    sort_entries(&mut entries, cli.ascending);
    Ok(entries
        .iter()
        .map(|entry| render_line(entry, cli.time))
        .collect())
}
