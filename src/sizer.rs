// Size every immediate child of a directory.
// Files report their own length, directories the sum of every regular file
// beneath them, however deep. Only depth-1 children become entries.

use std::env;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use log::{debug, warn};

use crate::error::{Result, ScanError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::File => write!(f, "FILE"),
            EntryKind::Dir => write!(f, "DIR"),
        }
    }
}

/// One immediate child of the scanned directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub path: PathBuf,
    pub kind: EntryKind,
    /// File length, or the recursive total of contained file lengths for a directory.
    pub size_bytes: u64,
    /// For directories, the newest modification time of any contained file.
    pub modified: SystemTime,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ScanOptions {
    /// Warn about and skip unreadable descendants instead of aborting the scan.
    pub skip_unreadable: bool,
}

// running totals for one top-level directory
struct Totals {
    bytes: u64,
    newest: Option<SystemTime>,
}

impl Totals {
    fn add_file(&mut self, md: &fs::Metadata) {
        self.bytes += md.len();
        if let Ok(modified) = md.modified() {
            if self.newest.map_or(true, |newest| modified > newest) {
                self.newest = Some(modified);
            }
        }
    }
}

/// Scan `path` with default options: follow symlinks, abort on the first unreadable entry.
pub fn scan(path: &Path) -> Result<Vec<DirEntry>> {
    scan_with(path, &ScanOptions::default())
}

pub fn scan_with(path: &Path, options: &ScanOptions) -> Result<Vec<DirEntry>> {
    let root = absolute(path)?;

    let attr = match fs::metadata(&root) {
        Ok(attr) => attr,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(ScanError::PathNotFound { path: root })
        }
        Err(err) => return Err(ScanError::from_io(&root, err)),
    };
    if !attr.is_dir() {
        return Err(ScanError::NotADirectory { path: root });
    }

    let mut entries = Vec::new();
    for item in fs::read_dir(&root).map_err(|err| ScanError::from_io(&root, err))? {
        let item = match item {
            Ok(item) => item,
            Err(err) => {
                tolerate(options, &root, err)?;
                continue;
            }
        };
        let child = item.path();

        // metadata() follows symlinks, so a link to a directory is sized as one
        let md = match fs::metadata(&child) {
            Ok(md) => md,
            Err(err) => {
                tolerate(options, &child, err)?;
                continue;
            }
        };

        let own_modified = md.modified().unwrap_or(SystemTime::UNIX_EPOCH);
        let entry = if md.is_dir() {
            let totals = dir_total(&child, options)?;
            DirEntry {
                path: child,
                kind: EntryKind::Dir,
                size_bytes: totals.bytes,
                modified: totals.newest.unwrap_or(own_modified),
            }
        } else {
            DirEntry {
                path: child,
                kind: EntryKind::File,
                size_bytes: md.len(),
                modified: own_modified,
            }
        };
        entries.push(entry);
    }

    Ok(entries)
}

// Depth-first walk with an explicit stack. There is no cycle guard: a symlink
// loop keeps the walk going until the filesystem refuses to resolve it.
fn dir_total(dir: &Path, options: &ScanOptions) -> Result<Totals> {
    let mut totals = Totals {
        bytes: 0,
        newest: None,
    };
    let mut pending = vec![dir.to_path_buf()];

    while let Some(current) = pending.pop() {
        debug!("walking {}", current.display());

        let listing = match fs::read_dir(&current) {
            Ok(listing) => listing,
            Err(err) => {
                tolerate(options, &current, err)?;
                continue;
            }
        };

        for item in listing {
            let item = match item {
                Ok(item) => item,
                Err(err) => {
                    tolerate(options, &current, err)?;
                    continue;
                }
            };
            let path = item.path();
            let md = match fs::metadata(&path) {
                Ok(md) => md,
                Err(err) => {
                    tolerate(options, &path, err)?;
                    continue;
                }
            };

            if md.is_dir() {
                pending.push(path);
            } else if md.is_file() {
                totals.add_file(&md);
            }
        }
    }

    Ok(totals)
}

fn tolerate(options: &ScanOptions, path: &Path, err: io::Error) -> Result<()> {
    if options.skip_unreadable {
        warn!("skipping {}: {}", path.display(), err);
        Ok(())
    } else {
        Err(ScanError::from_io(path, err))
    }
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.as_os_str().is_empty() {
        return Err(ScanError::PathNotFound {
            path: path.to_path_buf(),
        });
    }
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = env::current_dir().map_err(|err| ScanError::from_io(path, err))?;
    Ok(cwd.join(path))
}
