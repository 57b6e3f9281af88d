//! Delete/copy planning over two directory trees.
//!
//! Every call indexes the trees afresh; no state is kept between calls. An
//! indexing failure aborts the whole plan.

use std::path::PathBuf;

use serde::Serialize;

use aschenputtel_core::{DirectoryRoot, SuffixFilter, SyncConfig};

use crate::diff::{missing_from_source, missing_from_target, CopyCandidate};
use crate::index::gather;
use crate::SyncError;

/// Files to delete from the target and files to copy into it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncPlan {
    pub to_delete: Vec<PathBuf>,
    pub to_copy: Vec<CopyCandidate>,
}

impl SyncPlan {
    pub fn is_empty(&self) -> bool {
        self.to_delete.is_empty() && self.to_copy.is_empty()
    }
}

/// Target files with no corresponding source identity.
pub fn plan_delete(
    source: &DirectoryRoot,
    source_suffix: Option<&SuffixFilter>,
    target: &DirectoryRoot,
    target_suffix: Option<&SuffixFilter>,
) -> Result<Vec<PathBuf>, SyncError> {
    let source_index = gather(source.as_path(), source_suffix)?;
    let target_index = gather(target.as_path(), target_suffix)?;
    Ok(missing_from_source(&source_index, &target_index))
}

/// Source files with no corresponding target identity, paired with the path
/// the copy would get.
pub fn plan_copy(
    source: &DirectoryRoot,
    source_suffix: Option<&SuffixFilter>,
    target: &DirectoryRoot,
    target_suffix: Option<&SuffixFilter>,
) -> Result<Vec<CopyCandidate>, SyncError> {
    let source_index = gather(source.as_path(), source_suffix)?;
    let target_index = gather(target.as_path(), target_suffix)?;
    Ok(missing_from_target(
        &source_index,
        &target_index,
        target.as_path(),
        target_suffix,
    ))
}

/// Compute the halves of the plan selected by the configured mode.
///
/// Each tree is indexed once even when both halves are requested.
pub fn plan(config: &SyncConfig) -> Result<SyncPlan, SyncError> {
    let mode = config.mode();
    let source_index = gather(config.source().as_path(), config.source_suffix())?;
    let target_index = gather(config.target().as_path(), config.target_suffix())?;

    let mut plan = SyncPlan::default();
    if mode.deletes() {
        plan.to_delete = missing_from_source(&source_index, &target_index);
    }
    if mode.copies() {
        plan.to_copy = missing_from_target(
            &source_index,
            &target_index,
            config.target().as_path(),
            config.target_suffix(),
        );
    }

    tracing::debug!(
        %mode,
        to_delete = plan.to_delete.len(),
        to_copy = plan.to_copy.len(),
        "computed sync plan"
    );
    Ok(plan)
}
