//! Planning + execution round trips over real trees.

use std::fs;
use std::path::Path;

use aschenputtel_core::{RawSyncConfig, SyncConfig, SyncMode};
use aschenputtel_sync::{execute, plan, ActionResult};
use rstest::rstest;
use tempfile::TempDir;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("mkdir");
    }
    fs::write(path, content).expect("write");
}

/// `.raw` originals in one tree, `.jpg` previews in the other.
fn photo_trees() -> (TempDir, TempDir) {
    let originals = TempDir::new().expect("originals");
    let previews = TempDir::new().expect("previews");
    write(originals.path(), "2024/beach.RAW", "raw-beach");
    write(originals.path(), "2024/city.raw", "raw-city");
    write(originals.path(), "sidecar.xmp", "meta");
    write(previews.path(), "2024/beach.jpg", "jpg-beach");
    write(previews.path(), "2024/deleted.JPG", "jpg-deleted");
    write(previews.path(), "notes.txt", "untouched");
    (originals, previews)
}

fn config(originals: &TempDir, previews: &TempDir, mode: SyncMode, dry_run: bool) -> SyncConfig {
    SyncConfig::new(RawSyncConfig {
        source: originals.path().to_path_buf(),
        target: Some(previews.path().to_path_buf()),
        source_suffix: Some(".raw".into()),
        target_suffix: Some(".jpg".into()),
        mode,
        dry_run,
        verbose: false,
    })
    .expect("config")
}

#[rstest]
#[case(SyncMode::Delete)]
#[case(SyncMode::Copy)]
#[case(SyncMode::Both)]
fn dry_run_plan_matches_real_plan(#[case] mode: SyncMode) {
    let (originals, previews) = photo_trees();

    let dry = config(&originals, &previews, mode, true);
    let dry_plan = plan(&dry).expect("dry plan");
    let results = execute(&dry_plan, dry.dry_run()).expect("dry execute");
    assert!(results.iter().all(|r| matches!(
        r,
        ActionResult::WouldDelete { .. } | ActionResult::WouldCopy { .. }
    )));

    let real = config(&originals, &previews, mode, false);
    assert_eq!(plan(&real).expect("real plan"), dry_plan);
    assert!(previews.path().join("2024/deleted.JPG").exists());
    assert!(!previews.path().join("2024/city.jpg").exists());
}

#[test]
fn both_mode_converges() {
    let (originals, previews) = photo_trees();
    let config = config(&originals, &previews, SyncMode::Both, false);

    let first = plan(&config).expect("plan");
    assert_eq!(first.to_delete, vec![previews.path().join("2024/deleted.JPG")]);
    assert_eq!(first.to_copy.len(), 1);
    assert_eq!(first.to_copy[0].target, previews.path().join("2024/city.jpg"));

    let results = execute(&first, false).expect("execute");
    assert_eq!(results.len(), 2);
    assert!(matches!(results[0], ActionResult::Deleted { .. }));
    assert!(matches!(results[1], ActionResult::Copied { .. }));

    assert!(!previews.path().join("2024/deleted.JPG").exists());
    assert_eq!(
        fs::read_to_string(previews.path().join("2024/city.jpg")).expect("read"),
        "raw-city"
    );
    assert!(previews.path().join("notes.txt").exists());

    let second = plan(&config).expect("second plan");
    assert!(second.is_empty(), "second run has nothing left: {second:?}");
}

#[test]
fn plan_serializes_as_json() {
    let (originals, previews) = photo_trees();
    let plan = plan(&config(&originals, &previews, SyncMode::Both, true)).expect("plan");

    let json = serde_json::to_value(&plan).expect("json");
    assert_eq!(json["to_delete"].as_array().map(Vec::len), Some(1));
    let copy = &json["to_copy"][0];
    assert!(copy["source"].as_str().expect("source").ends_with("city.raw"));
    assert!(copy["target"].as_str().expect("target").ends_with("city.jpg"));
}

#[cfg(unix)]
#[test]
fn symlinked_originals_are_synced_like_files() {
    let (originals, previews) = photo_trees();
    let library = TempDir::new().expect("library");
    write(library.path(), "harbor.raw", "raw-harbor");
    write(library.path(), "beach.raw", "raw-beach-linked");
    std::os::unix::fs::symlink(
        library.path().join("harbor.raw"),
        originals.path().join("2024/harbor.raw"),
    )
    .expect("symlink");
    fs::remove_file(originals.path().join("2024/beach.RAW")).expect("rm");
    std::os::unix::fs::symlink(
        library.path().join("beach.raw"),
        originals.path().join("2024/beach.raw"),
    )
    .expect("symlink");

    let config = config(&originals, &previews, SyncMode::Both, false);
    let first = plan(&config).expect("plan");
    assert_eq!(first.to_delete, vec![previews.path().join("2024/deleted.JPG")]);
    let copied: Vec<_> = first.to_copy.iter().map(|c| c.target.clone()).collect();
    assert_eq!(
        copied,
        vec![
            previews.path().join("2024/city.jpg"),
            previews.path().join("2024/harbor.jpg"),
        ]
    );

    execute(&first, false).expect("execute");
    assert!(previews.path().join("2024/beach.jpg").exists());
    assert_eq!(
        fs::read_to_string(previews.path().join("2024/harbor.jpg")).expect("read"),
        "raw-harbor"
    );
    assert!(plan(&config).expect("second plan").is_empty());
}
