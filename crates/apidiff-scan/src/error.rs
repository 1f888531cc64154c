//! Error types for the scan crate.

use std::io;
use std::path::PathBuf;

/// Errors that can occur while loading or pairing declaration dumps.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// A file or directory could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A declaration dump could not be decoded.
    #[error("cannot parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    /// A scan root is not a directory.
    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
}

impl ScanError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Convenience alias for scan results.
pub type ScanResult<T> = Result<T, ScanError>;
