use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("absolute path parameter is not set")]
    MissingArgument,

    #[error("location {} does not exist", .path.display())]
    PathNotFound { path: PathBuf },

    #[error("location {} is not a directory", .path.display())]
    NotADirectory { path: PathBuf },

    #[error("permission denied reading {}: {source}", .path.display())]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ScanError {
    /// Attach `path` to an I/O failure, keeping permission problems distinct.
    pub fn from_io(path: &Path, source: io::Error) -> Self {
        let path = path.to_path_buf();
        match source.kind() {
            io::ErrorKind::PermissionDenied => ScanError::PermissionDenied { path, source },
            _ => ScanError::Io { path, source },
        }
    }
}

pub type Result<T> = std::result::Result<T, ScanError>;
