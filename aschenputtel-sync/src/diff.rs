//! Key-set differences between a source and a target [`PathIndex`].

use std::path::{Path, PathBuf};

use serde::Serialize;

use aschenputtel_core::SuffixFilter;

use crate::index::PathIndex;

/// A source file without a target counterpart, and where its copy would go.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct CopyCandidate {
    pub source: PathBuf,
    /// Derived path; does not exist yet.
    pub target: PathBuf,
}

/// Target files whose key has no counterpart in the source, sorted by path.
pub fn missing_from_source(source: &PathIndex, target: &PathIndex) -> Vec<PathBuf> {
    let mut orphans: Vec<PathBuf> = target
        .iter()
        .filter(|(key, _)| !source.contains_key(key))
        .map(|(_, path)| path.clone())
        .collect();
    orphans.sort();
    orphans
}

/// Source files whose key has no counterpart in the target, sorted by source
/// path.
///
/// The target path is `target_root/<key>`, with `target_suffix` appended when
/// one is configured.
pub fn missing_from_target(
    source: &PathIndex,
    target: &PathIndex,
    target_root: &Path,
    target_suffix: Option<&SuffixFilter>,
) -> Vec<CopyCandidate> {
    let mut candidates: Vec<CopyCandidate> = source
        .iter()
        .filter(|(key, _)| !target.contains_key(key))
        .map(|(key, path)| CopyCandidate {
            source: path.clone(),
            target: key.resolve(target_root, target_suffix),
        })
        .collect();
    candidates.sort();
    candidates
}
