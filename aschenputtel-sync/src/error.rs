//! Error types for aschenputtel-sync.

use std::path::PathBuf;

use thiserror::Error;

/// Filesystem failures raised while indexing a tree or applying a plan.
///
/// None of these are retried; the current call is aborted.
#[derive(Debug, Error)]
pub enum SyncError {
    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Directory traversal failed below `root` (permission denied, vanished entry, ...).
    #[error("failed to walk {root}: {source}")]
    Walk {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// The root to index is no longer a directory.
    #[error("not a directory: {path}")]
    NotADirectory { path: PathBuf },
}

/// Convenience constructor for [`SyncError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> SyncError {
    SyncError::Io {
        path: path.into(),
        source,
    }
}
