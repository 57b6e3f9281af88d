//! Error types for aschenputtel-core.

use std::path::PathBuf;

use thiserror::Error;

/// Invalid or incomplete directory / suffix configuration.
///
/// Always raised before any directory is traversed.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The path could not be made absolute or resolved on disk.
    #[error("invalid path {path}: {source}")]
    InvalidPath {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("suffix does not start with '.': {suffix:?}")]
    SuffixWithoutDot { suffix: String },

    #[error("source suffix '{source_suffix}' is set but no target suffix was given")]
    MissingTargetSuffix { source_suffix: String },

    #[error("target suffix '{target_suffix}' is set but no source suffix was given")]
    MissingSourceSuffix { target_suffix: String },

    /// Same directory on both sides and nothing to normalize.
    #[error("nothing to do: {path} is both source and target and no suffixes are set")]
    NothingToDo { path: PathBuf },
}
