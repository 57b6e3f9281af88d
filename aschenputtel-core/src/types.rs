//! Domain types shared by the indexer, planner and CLI.
//!
//! All path fields use `PathBuf`; never `&str` or `String` for filesystem paths.

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A dot-prefixed file suffix such as `.jpg`, matched case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SuffixFilter {
    raw: String,
    folded: String,
}

impl SuffixFilter {
    /// Parse a suffix. It must start with `.`.
    pub fn new(suffix: impl Into<String>) -> Result<Self, ConfigError> {
        let raw = suffix.into();
        if !raw.starts_with('.') {
            return Err(ConfigError::SuffixWithoutDot { suffix: raw });
        }
        let folded = raw.to_lowercase();
        Ok(Self { raw, folded })
    }

    /// The suffix exactly as configured.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Whether `file_name` ends with this suffix, ignoring case.
    pub fn matches(&self, file_name: &str) -> bool {
        file_name.to_lowercase().ends_with(&self.folded)
    }
}

impl fmt::Display for SuffixFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.raw.fmt(f)
    }
}

/// The cross-root identity of a file: its path relative to the root, with the
/// final extension removed when the file was indexed under a suffix filter.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RelativeKey(PathBuf);

impl RelativeKey {
    /// Build a key from a path already relative to its root.
    ///
    /// With `strip_extension`, exactly one trailing `.ext` segment is dropped:
    /// `archive.tar.gz` becomes `archive.tar`. Dot files such as `.md` have no
    /// extension and are kept as-is.
    pub fn new(relative: &Path, strip_extension: bool) -> Self {
        if strip_extension {
            Self(relative.with_extension(""))
        } else {
            Self(relative.to_path_buf())
        }
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Resolve this key under `root`, appending `suffix` verbatim if given.
    pub fn resolve(&self, root: &Path, suffix: Option<&SuffixFilter>) -> PathBuf {
        let joined = root.join(&self.0);
        match suffix {
            Some(suffix) => {
                let mut name = OsString::from(joined);
                name.push(suffix.as_str());
                PathBuf::from(name)
            }
            None => joined,
        }
    }
}

impl fmt::Display for RelativeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.display().fmt(f)
    }
}

impl From<&str> for RelativeKey {
    fn from(s: &str) -> Self {
        Self(PathBuf::from(s))
    }
}

/// An absolute path to a directory that existed when the root was created.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DirectoryRoot(PathBuf);

impl DirectoryRoot {
    /// Make `path` absolute against the working directory and check that it
    /// is a directory.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let absolute = std::path::absolute(path).map_err(|source| ConfigError::InvalidPath {
            path: path.to_path_buf(),
            source,
        })?;
        if !absolute.is_dir() {
            return Err(ConfigError::NotADirectory { path: absolute });
        }
        Ok(Self(absolute))
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Whether both roots name the same directory on disk, following symlinks.
    pub fn same_directory(&self, other: &DirectoryRoot) -> Result<bool, ConfigError> {
        if self.0 == other.0 {
            return Ok(true);
        }
        let canonical = |root: &DirectoryRoot| {
            root.0
                .canonicalize()
                .map_err(|source| ConfigError::InvalidPath {
                    path: root.0.clone(),
                    source,
                })
        };
        Ok(canonical(self)? == canonical(other)?)
    }
}

impl fmt::Display for DirectoryRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.display().fmt(f)
    }
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Which half of a sync plan to compute and apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncMode {
    /// Delete target files with no source counterpart.
    #[default]
    Delete,
    /// Copy source files with no target counterpart into the target.
    Copy,
    /// Delete orphans, then copy missing files.
    Both,
}

impl SyncMode {
    pub fn deletes(self) -> bool {
        matches!(self, SyncMode::Delete | SyncMode::Both)
    }

    pub fn copies(self) -> bool {
        matches!(self, SyncMode::Copy | SyncMode::Both)
    }
}

impl fmt::Display for SyncMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncMode::Delete => write!(f, "delete"),
            SyncMode::Copy => write!(f, "copy"),
            SyncMode::Both => write!(f, "both"),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
