//! Integration tests for sync planning and execution

mod common;

use std::fs;
use std::io;
use std::path::Path;

use b4x_core::sync::{CREATE_MESSAGE, DEFAULT_IGNORE_FILE};
use b4x_core::{
    IgnoreRules, RemoteListing, RemoteStore, SyncAction, SyncExecutor, SyncPlan, SyncPlanner,
    SyncReport,
};
use b4x_fs::{NormalizedPath, compute_blob_hash};
use common::{Call, RecordingRemote, target};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

// ============================================================================
// Helpers
// ============================================================================

fn listing(entries: &[(&str, &str)]) -> RemoteListing {
    entries
        .iter()
        .map(|(p, h)| (p.to_string(), h.to_string()))
        .collect()
}

/// Plan with symbolic hashes instead of file content.
fn plan_with(
    local: &[(&str, &str)],
    remote: &RemoteListing,
    rules: IgnoreRules,
) -> SyncPlan {
    let paths: Vec<&str> = local.iter().map(|(p, _)| *p).collect();
    SyncPlanner::new(rules).plan(&paths, remote, |path| {
        local
            .iter()
            .find(|(p, _)| *p == path)
            .map(|(_, h)| h.to_string())
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, path.to_string()))
    })
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Plan against the store's current listing and execute.
fn sync_dir(root: &Path, remote: &RecordingRemote, rules: IgnoreRules) -> SyncReport {
    let target = target();
    let listing = remote.list(&target).unwrap();
    let plan = SyncPlanner::new(rules)
        .plan_directory(&NormalizedPath::new(root), &listing)
        .unwrap();
    SyncExecutor::new(remote, &target).execute(&plan, |path| fs::read(root.join(path)), |_| {})
}

// ============================================================================
// Planning scenarios
// ============================================================================

#[test]
fn test_remote_only_file_is_deleted_with_its_hash() {
    let plan = plan_with(
        &[("a.txt", "H1")],
        &listing(&[("a.txt", "H1"), ("b.txt", "H2")]),
        IgnoreRules::empty(),
    );

    assert_eq!(
        plan.actions,
        vec![SyncAction::Delete {
            path: "b.txt".into(),
            expected_hash: "H2".into()
        }]
    );
    assert_eq!(plan.unchanged, vec!["a.txt".to_string()]);
}

#[test]
fn test_new_local_file_is_created() {
    let plan = plan_with(&[("a.txt", "H1")], &RemoteListing::new(), IgnoreRules::empty());

    assert_eq!(
        plan.actions,
        vec![SyncAction::Create {
            path: "a.txt".into()
        }]
    );
}

#[test]
fn test_changed_file_is_updated_with_remote_hash() {
    let plan = plan_with(
        &[("a.txt", "H3")],
        &listing(&[("a.txt", "H1")]),
        IgnoreRules::empty(),
    );

    assert_eq!(
        plan.actions,
        vec![SyncAction::Update {
            path: "a.txt".into(),
            expected_hash: "H1".into()
        }]
    );
}

#[test]
fn test_ignored_file_is_not_uploaded() {
    let plan = plan_with(
        &[("temp.zip", "H1")],
        &RemoteListing::new(),
        IgnoreRules::from_lines(["*.zip"]).unwrap(),
    );

    assert!(plan.is_empty());
    assert_eq!(plan.ignored, vec!["temp.zip".to_string()]);
}

#[test]
fn test_readme_is_never_deleted() {
    let plan = plan_with(
        &[],
        &listing(&[("README.md", "R"), ("old.txt", "O")]),
        IgnoreRules::empty(),
    );

    assert_eq!(
        plan.actions,
        vec![SyncAction::Delete {
            path: "old.txt".into(),
            expected_hash: "O".into()
        }]
    );
}

#[test]
fn test_remote_copy_of_ignored_file_is_deleted() {
    let plan = plan_with(
        &[("build.zip", "H1")],
        &listing(&[("build.zip", "H1")]),
        IgnoreRules::from_lines(["*.zip"]).unwrap(),
    );

    assert_eq!(
        plan.actions,
        vec![SyncAction::Delete {
            path: "build.zip".into(),
            expected_hash: "H1".into()
        }]
    );
}

#[test]
fn test_path_match_is_case_sensitive() {
    let plan = plan_with(
        &[("Readme.txt", "H1")],
        &listing(&[("readme.txt", "H1")]),
        IgnoreRules::empty(),
    );

    assert_eq!(plan.creates(), 1);
    assert_eq!(plan.deletes(), 1);
}

#[test]
fn test_creates_follow_local_order_and_deletes_come_last() {
    let plan = plan_with(
        &[("z.txt", "1"), ("a.txt", "2"), ("m/n.txt", "3")],
        &listing(&[("gone.txt", "G"), ("a.txt", "X")]),
        IgnoreRules::empty(),
    );

    let order: Vec<(&str, &str)> = plan.actions.iter().map(|a| (a.verb(), a.path())).collect();
    assert_eq!(
        order,
        vec![
            ("create", "z.txt"),
            ("update", "a.txt"),
            ("create", "m/n.txt"),
            ("delete", "gone.txt"),
        ]
    );
}

// ============================================================================
// Execution against a recording store
// ============================================================================

#[test]
fn test_executes_plan_against_store() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "a.txt", "new content");
    write(dir.path(), "Files/logo.png", "png");
    let remote = RecordingRemote::new()
        .with_file("a.txt", b"old content")
        .with_file("stale.txt", b"stale")
        .with_file("README.md", b"# app");

    let report = sync_dir(dir.path(), &remote, IgnoreRules::empty());

    assert_eq!(
        remote.calls(),
        vec![
            Call::Update {
                path: "a.txt".into(),
                expected: compute_blob_hash(b"old content")
            },
            Call::Create {
                path: "Files/logo.png".into(),
                message: CREATE_MESSAGE.into()
            },
            Call::Delete {
                path: "stale.txt".into(),
                expected: compute_blob_hash(b"stale")
            },
        ]
    );
    assert!(report.success);
    assert_eq!((report.created(), report.updated(), report.deleted()), (1, 1, 1));
    assert!(remote.listing().contains_key("README.md"));
}

#[test]
fn test_second_run_issues_no_calls() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "app.b4j", "project");
    write(dir.path(), "Files/data/notes.txt", "notes");
    write(dir.path(), "Files/empty.txt", "");
    let remote = RecordingRemote::new().with_file("obsolete.bas", b"x");

    sync_dir(dir.path(), &remote, IgnoreRules::empty());
    assert_eq!(remote.calls().len(), 4);

    remote.clear_calls();
    let report = sync_dir(dir.path(), &remote, IgnoreRules::empty());

    assert!(remote.calls().is_empty());
    assert_eq!(report.unchanged, 3);
}

#[test]
fn test_failed_call_does_not_stop_the_run() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "a.txt", "a");
    write(dir.path(), "b.txt", "b");
    let remote = RecordingRemote::new()
        .with_file("c.txt", b"c")
        .failing_on("a.txt");

    let report = sync_dir(dir.path(), &remote, IgnoreRules::empty());

    assert_eq!(remote.calls().len(), 3);
    assert!(!report.success);
    assert_eq!(report.failed(), 1);
    assert_eq!(report.created(), 1);
    assert_eq!(report.deleted(), 1);
    let failed = report.outcomes.iter().find(|o| !o.is_success()).unwrap();
    assert_eq!(failed.action.path(), "a.txt");
    assert!(failed.error.as_deref().unwrap().contains("409"));
}

#[test]
fn test_default_ignore_file_keeps_build_output_local() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "app.b4j", "project");
    write(dir.path(), "app.b4j.meta", "meta");
    write(dir.path(), "Objects/app.jar", "jar");
    write(dir.path(), "AutoBackups/app-1.zip", "zip");
    let remote = RecordingRemote::new();

    let rules = IgnoreRules::parse(DEFAULT_IGNORE_FILE).unwrap();
    let report = sync_dir(dir.path(), &remote, rules);

    assert_eq!(
        remote.calls(),
        vec![Call::Create {
            path: "app.b4j".into(),
            message: CREATE_MESSAGE.into()
        }]
    );
    assert_eq!(report.skipped, 3);
}

#[cfg(unix)]
#[test]
fn test_symlinked_file_is_kept_on_the_remote() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "real.txt", "shared");
    std::os::unix::fs::symlink(dir.path().join("real.txt"), dir.path().join("link.txt")).unwrap();
    let remote = RecordingRemote::new()
        .with_file("real.txt", b"shared")
        .with_file("link.txt", b"shared");

    let plan = SyncPlanner::new(IgnoreRules::empty())
        .plan_directory(&NormalizedPath::new(dir.path()), &remote.listing())
        .unwrap();

    assert!(plan.actions.is_empty(), "unexpected actions: {:?}", plan.actions);
    assert_eq!(plan.unchanged, vec!["link.txt", "real.txt"]);
}

#[test]
fn test_observer_sees_every_outcome() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "a.txt", "a");
    let remote = RecordingRemote::new().with_file("b.txt", b"b");
    let target = target();
    let plan = SyncPlanner::new(IgnoreRules::empty())
        .plan_directory(&NormalizedPath::new(dir.path()), &remote.listing())
        .unwrap();

    let mut seen = Vec::new();
    SyncExecutor::new(&remote, &target).execute(
        &plan,
        |path| fs::read(dir.path().join(path)),
        |outcome| seen.push(outcome.action.path().to_string()),
    );

    assert_eq!(seen, vec!["a.txt".to_string(), "b.txt".to_string()]);
}

#[test]
fn test_unreadable_content_fails_only_that_action() {
    let remote = RecordingRemote::new();
    let target = target();
    let plan = plan_with(&[("a.txt", "H1"), ("b.txt", "H2")], &RemoteListing::new(), IgnoreRules::empty());

    let report = SyncExecutor::new(&remote, &target).execute(
        &plan,
        |path| {
            if path == "a.txt" {
                Err(io::Error::new(io::ErrorKind::PermissionDenied, "locked"))
            } else {
                Ok(b"b".to_vec())
            }
        },
        |_| {},
    );

    assert_eq!(report.failed(), 1);
    assert_eq!(remote.calls().len(), 1);
}

#[test]
fn test_abort_errors_are_classified() {
    let target = target();
    let remote = RecordingRemote::new().list_fails();
    assert!(remote.list(&target).unwrap_err().is_sync_abort());

    let remote = RecordingRemote::new().missing();
    assert!(!remote.exists(&target).unwrap());
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn test_ignore_matching_is_case_insensitive(path in "[a-zA-Z]{1,8}(/[a-zA-Z]{1,8}){0,2}\\.(zip|ZIP|Zip|txt)") {
        let rules = IgnoreRules::from_lines(["*.zip"]).unwrap();
        prop_assert_eq!(
            rules.is_ignored(&path),
            rules.is_ignored(&path.to_uppercase())
        );
        prop_assert_eq!(rules.is_ignored(&path), path.to_lowercase().ends_with(".zip"));
    }

    #[test]
    fn test_ignore_matching_is_order_independent(
        patterns in proptest::collection::vec("(\\*\\.[a-z]{2,3}|[a-z]{2,5}/|[a-z]{1,4}\\?\\.txt)", 1..6),
        path in "[a-z]{1,5}(/[a-z]{1,5})?\\.[a-z]{2,3}",
    ) {
        let forward = IgnoreRules::from_lines(&patterns).unwrap();
        let reversed = IgnoreRules::from_lines(patterns.iter().rev()).unwrap();
        prop_assert_eq!(forward.is_ignored(&path), reversed.is_ignored(&path));
    }

    #[test]
    fn test_every_planned_delete_is_unprotected_and_absent_locally(
        local in proptest::collection::btree_set("[a-c]{1,2}\\.txt", 0..5),
        remote in proptest::collection::btree_map("([a-c]{1,2}\\.txt|README\\.md)", "[0-9a-f]{4}", 0..6),
    ) {
        let local: Vec<(&str, &str)> = local.iter().map(|p| (p.as_str(), "local")).collect();
        let plan = plan_with(&local, &remote, IgnoreRules::empty());

        for action in &plan.actions {
            if let SyncAction::Delete { path, expected_hash } = action {
                prop_assert_ne!(path.as_str(), "README.md");
                prop_assert!(!local.iter().any(|(p, _)| *p == path.as_str()));
                prop_assert_eq!(Some(expected_hash), remote.get(path));
            }
        }
        let expected_deletes = remote
            .keys()
            .filter(|k| k.as_str() != "README.md" && !local.iter().any(|(p, _)| *p == k.as_str()))
            .count();
        prop_assert_eq!(plan.deletes(), expected_deletes);
    }
}
