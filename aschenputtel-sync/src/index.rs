//! Relative-path identity index for one directory tree.
//!
//! [`gather`] walks `root` and maps every regular file to a [`RelativeKey`].
//! Under a suffix filter only matching files are indexed and their final
//! extension is dropped from the key, so `photo.RAW` and `photo.jpg` in two
//! trees both land on `photo`.

use std::collections::btree_map::{BTreeMap, Entry};
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use aschenputtel_core::{RelativeKey, SuffixFilter};

use crate::error::{io_err, SyncError};

/// Relative key → absolute file path for one (root, suffix) pair.
pub type PathIndex = BTreeMap<RelativeKey, PathBuf>;

/// Index every regular file below `root`.
///
/// A symlink is indexed under its own name when it points at a regular file;
/// symlinked directories are not descended into and dangling links are
/// skipped. When two files normalize to the same key (`a.txt` and `a.TXT`
/// under `.txt`) the lexicographically greatest path wins, independent of
/// walk order.
pub fn gather(root: &Path, suffix: Option<&SuffixFilter>) -> Result<PathIndex, SyncError> {
    let meta = std::fs::metadata(root).map_err(|e| io_err(root, e))?;
    if !meta.is_dir() {
        return Err(SyncError::NotADirectory {
            path: root.to_path_buf(),
        });
    }

    let mut index = PathIndex::new();
    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry.map_err(|source| SyncError::Walk {
            root: root.to_path_buf(),
            source,
        })?;
        if !is_regular_file(&entry) {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        if let Some(suffix) = suffix {
            if !suffix.matches(&name) {
                continue;
            }
        }

        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        let key = RelativeKey::new(relative, suffix.is_some());
        tracing::trace!(key = %key, path = %entry.path().display(), "indexed file");
        insert(&mut index, key, entry.into_path());
    }

    tracing::debug!(
        root = %root.display(),
        suffix = suffix.map(SuffixFilter::as_str).unwrap_or("*"),
        files = index.len(),
        "indexed directory"
    );
    Ok(index)
}

fn is_regular_file(entry: &DirEntry) -> bool {
    let ty = entry.file_type();
    ty.is_file() || (ty.is_symlink() && entry.path().is_file())
}

fn insert(index: &mut PathIndex, key: RelativeKey, path: PathBuf) {
    match index.entry(key) {
        Entry::Vacant(slot) => {
            slot.insert(path);
        }
        Entry::Occupied(mut slot) => {
            let dropped = if path > *slot.get() {
                slot.insert(path)
            } else {
                path
            };
            tracing::warn!(
                key = %slot.key(),
                kept = %slot.get().display(),
                dropped = %dropped.display(),
                "two files share one key; keeping the greatest path"
            );
        }
    }
}
