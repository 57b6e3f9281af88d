//! Plan execution.
//!
//! Deletions run first, then copies, each in plan order. The first failure
//! aborts the run: nothing after the failing action is attempted, and the
//! error names the failing path.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use crate::diff::CopyCandidate;
use crate::error::{io_err, SyncError};
use crate::planner::SyncPlan;

// ---------------------------------------------------------------------------
// Action result
// ---------------------------------------------------------------------------

/// Outcome of an individual plan entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionResult {
    Deleted { path: PathBuf },
    /// `--dry-run` mode: the file *would* have been deleted.
    WouldDelete { path: PathBuf },
    Copied { source: PathBuf, target: PathBuf },
    /// `--dry-run` mode: the file *would* have been copied.
    WouldCopy { source: PathBuf, target: PathBuf },
}

// ---------------------------------------------------------------------------
// execute
// ---------------------------------------------------------------------------

/// Apply `plan`. With `dry_run` the filesystem is left untouched.
pub fn execute(plan: &SyncPlan, dry_run: bool) -> Result<Vec<ActionResult>, SyncError> {
    execute_with(plan, dry_run, |_| {})
}

/// Like [`execute`], calling `on_action` after every completed action so
/// progress is visible even when a later action fails.
pub fn execute_with<F>(
    plan: &SyncPlan,
    dry_run: bool,
    mut on_action: F,
) -> Result<Vec<ActionResult>, SyncError>
where
    F: FnMut(&ActionResult),
{
    let mut results = Vec::with_capacity(plan.to_delete.len() + plan.to_copy.len());

    for path in &plan.to_delete {
        let result = delete(path, dry_run)?;
        on_action(&result);
        results.push(result);
    }
    for candidate in &plan.to_copy {
        let result = copy(candidate, dry_run)?;
        on_action(&result);
        results.push(result);
    }

    Ok(results)
}

fn delete(path: &Path, dry_run: bool) -> Result<ActionResult, SyncError> {
    if dry_run {
        tracing::info!("[dry-run] would delete: {}", path.display());
        return Ok(ActionResult::WouldDelete {
            path: path.to_path_buf(),
        });
    }

    fs::remove_file(path).map_err(|e| io_err(path, e))?;

    tracing::info!("deleted: {}", path.display());
    Ok(ActionResult::Deleted {
        path: path.to_path_buf(),
    })
}

/// Copy bytes unchanged. An existing file at the target is never overwritten.
fn copy(candidate: &CopyCandidate, dry_run: bool) -> Result<ActionResult, SyncError> {
    let CopyCandidate { source, target } = candidate;
    if dry_run {
        tracing::info!(
            "[dry-run] would copy: {} -> {}",
            source.display(),
            target.display()
        );
        return Ok(ActionResult::WouldCopy {
            source: source.clone(),
            target: target.clone(),
        });
    }

    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
    }

    let mut reader = File::open(source).map_err(|e| io_err(source, e))?;
    let permissions = reader
        .metadata()
        .map_err(|e| io_err(source, e))?
        .permissions();
    let mut writer = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(target)
        .map_err(|e| io_err(target, e))?;
    if let Err(e) = io::copy(&mut reader, &mut writer) {
        drop(writer);
        let _ = fs::remove_file(target);
        return Err(io_err(target, e));
    }
    fs::set_permissions(target, permissions).map_err(|e| io_err(target, e))?;

    tracing::info!("copied: {} -> {}", source.display(), target.display());
    Ok(ActionResult::Copied {
        source: source.clone(),
        target: target.clone(),
    })
}

#[cfg(test)]
mod tests {
    use std::io::ErrorKind;

    use tempfile::TempDir;

    use super::*;

    fn write(path: &Path, content: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("mkdir");
        }
        fs::write(path, content).expect("write");
    }

    #[test]
    fn dry_run_reports_and_mutates_nothing() {
        let dir = TempDir::new().expect("dir");
        let orphan = dir.path().join("orphan.jpg");
        let source = dir.path().join("new.raw");
        let target = dir.path().join("out/new.jpg");
        write(&orphan, "o");
        write(&source, "n");

        let plan = SyncPlan {
            to_delete: vec![orphan.clone()],
            to_copy: vec![CopyCandidate {
                source: source.clone(),
                target: target.clone(),
            }],
        };
        let results = execute(&plan, true).expect("execute");

        assert_eq!(
            results,
            vec![
                ActionResult::WouldDelete {
                    path: orphan.clone()
                },
                ActionResult::WouldCopy {
                    source,
                    target: target.clone()
                },
            ]
        );
        assert!(orphan.exists(), "dry-run must not delete");
        assert!(!target.exists(), "dry-run must not copy");
        assert!(!dir.path().join("out").exists(), "dry-run must not mkdir");
    }

    #[test]
    fn copy_creates_parents_and_keeps_bytes() {
        let dir = TempDir::new().expect("dir");
        let source = dir.path().join("src/deep/x.md");
        let target = dir.path().join("dst/deep/x.txt");
        write(&source, "# heading\n");

        let plan = SyncPlan {
            to_delete: vec![],
            to_copy: vec![CopyCandidate {
                source: source.clone(),
                target: target.clone(),
            }],
        };
        execute(&plan, false).expect("execute");

        assert_eq!(fs::read_to_string(&target).expect("read"), "# heading\n");
        assert!(source.exists(), "copy must keep the source");
    }

    #[test]
    fn copy_refuses_to_overwrite() {
        let dir = TempDir::new().expect("dir");
        let source = dir.path().join("x.md");
        let target = dir.path().join("x.txt");
        write(&source, "new");
        write(&target, "old");

        let plan = SyncPlan {
            to_delete: vec![],
            to_copy: vec![CopyCandidate {
                source,
                target: target.clone(),
            }],
        };
        let err = execute(&plan, false).unwrap_err();
        match err {
            SyncError::Io { path, source } => {
                assert_eq!(path, target);
                assert_eq!(source.kind(), ErrorKind::AlreadyExists);
            }
            other => panic!("expected Io, got {other:?}"),
        }
        assert_eq!(fs::read_to_string(&target).expect("read"), "old");
    }

    #[test]
    fn callback_sees_actions_before_failure() {
        let dir = TempDir::new().expect("dir");
        let present = dir.path().join("a.jpg");
        write(&present, "a");

        let plan = SyncPlan {
            to_delete: vec![present.clone(), dir.path().join("gone.jpg")],
            to_copy: vec![],
        };
        let mut seen = Vec::new();
        let result = execute_with(&plan, false, |action| seen.push(action.clone()));

        assert!(result.is_err());
        assert_eq!(seen, vec![ActionResult::Deleted { path: present }]);
    }

    #[test]
    fn first_failure_stops_execution() {
        let dir = TempDir::new().expect("dir");
        let first = dir.path().join("a.jpg");
        let vanished = dir.path().join("b.jpg");
        let last = dir.path().join("c.jpg");
        write(&first, "a");
        write(&last, "c");

        let plan = SyncPlan {
            to_delete: vec![first.clone(), vanished.clone(), last.clone()],
            to_copy: vec![],
        };
        let err = execute(&plan, false).unwrap_err();

        match err {
            SyncError::Io { path, .. } => assert_eq!(path, vanished),
            other => panic!("expected Io, got {other:?}"),
        }
        assert!(!first.exists(), "actions before the failure are applied");
        assert!(last.exists(), "actions after the failure are not attempted");
    }
}
