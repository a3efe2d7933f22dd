use super::fixtures::{snapshot, CacheTree, MB};
use vscache::actions::Executor;
use vscache::error::ExitCode;
use vscache::prompt::Console;
use vscache::run_session;

#[test]
fn test_remove_all_stale_permanently() {
    let tree = CacheTree::new();
    let first = tree.stale("a1", 10 * MB);
    let second = tree.live("b2", 20 * MB);
    let third = tree.stale("c3", 5 * MB);

    let mut console = Console::from_script(&["a", "d"]);
    let code = run_session(&tree.config(), &mut console, None, &Executor::default()).unwrap();

    assert_eq!(code, ExitCode::Success);
    assert!(!first.exists());
    assert!(second.exists());
    assert!(!third.exists());

    let output = console.output_text();
    assert!(output.contains("Found the following non-existent workspaces:"));
    assert!(output.contains("deleted-a1"));
    assert!(output.contains("deleted-c3"));
    assert!(!output.contains("project-b2"));
    assert!(output.contains("15.00 MB, 0.01 GB"));
    assert!(output.contains("Deleted 2 folder(s)"));
}

#[test]
fn test_numbering_follows_folder_names() {
    let tree = CacheTree::new();
    tree.stale("b", MB);
    tree.stale("a", MB);

    let mut console = Console::from_script(&["n"]);
    run_session(&tree.config(), &mut console, None, &Executor::default()).unwrap();

    let output = console.output_text();
    let a = output.find("deleted-a").unwrap();
    let b = output.find("deleted-b").unwrap();
    assert!(a < b);
}

#[test]
fn test_declined_leaves_everything() {
    let tree = CacheTree::new();
    tree.stale("a1", MB);
    tree.stale("b2", MB);
    let before = snapshot(tree.base.path());

    let mut console = Console::from_script(&["n"]);
    let code = run_session(&tree.config(), &mut console, None, &Executor::default()).unwrap();

    assert_eq!(code, ExitCode::Success);
    assert_eq!(snapshot(tree.base.path()), before);
    assert!(console.output_text().contains("Exiting"));
}

#[test]
fn test_invalid_top_level_answer_aborts() {
    let tree = CacheTree::new();
    tree.stale("a1", MB);
    let before = snapshot(tree.base.path());

    let mut console = Console::from_script(&["x"]);
    let code = run_session(&tree.config(), &mut console, None, &Executor::default()).unwrap();

    assert_eq!(code, ExitCode::Aborted);
    assert_eq!(snapshot(tree.base.path()), before);
    assert!(console.output_text().contains("Invalid input"));
}

#[test]
fn test_closed_input_aborts() {
    let tree = CacheTree::new();
    tree.stale("a1", MB);

    let mut console = Console::from_script(&[]);
    let code = run_session(&tree.config(), &mut console, None, &Executor::default()).unwrap();

    assert_eq!(code, ExitCode::Aborted);
    assert!(tree.storage().join("a1").exists());
}

#[test]
fn test_dry_run_changes_nothing() {
    let tree = CacheTree::new();
    tree.stale("a1", 3 * MB);
    tree.orphan("b2", MB);
    tree.live("c3", MB);
    let before = snapshot(tree.base.path());

    let mut config = tree.config();
    config.dry_run = true;
    let mut console = Console::from_script(&["a"]);
    let code = run_session(&config, &mut console, None, &Executor::default()).unwrap();

    assert_eq!(code, ExitCode::Success);
    assert_eq!(snapshot(tree.base.path()), before);

    let output = console.output_text();
    assert!(output.contains("Dry run. Not deleting anything"));
    assert!(!output.contains("move the folders to trash"));
}

#[test]
fn test_no_cache_found() {
    let tree = CacheTree::new();
    let mut config = tree.config();
    config.variants = vec!["Code - Insiders".to_string()];

    let mut console = Console::from_script(&[]);
    let code = run_session(&config, &mut console, None, &Executor::default()).unwrap();

    assert_eq!(code, ExitCode::Success);
    let output = console.output_text();
    assert!(output.contains("No cache folder found"));
    assert!(output.contains("Code - Insiders"));
}

#[test]
fn test_empty_storage_is_no_cache_found() {
    let tree = CacheTree::new();

    let mut console = Console::from_script(&[]);
    let code = run_session(&tree.config(), &mut console, None, &Executor::default()).unwrap();

    assert_eq!(code, ExitCode::Success);
    assert!(console.output_text().contains("No cache folder found"));
}

#[test]
fn test_nothing_stale() {
    let tree = CacheTree::new();
    tree.live("a1", MB);
    tree.live("b2", MB);

    let mut console = Console::from_script(&[]);
    let code = run_session(&tree.config(), &mut console, None, &Executor::default()).unwrap();

    assert_eq!(code, ExitCode::Success);
    let output = console.output_text();
    assert!(output.contains("No non-existent workspaces found"));
    assert!(!output.contains(">>> "));
}

#[test]
fn test_unreadable_sidecar_counts_as_stale() {
    let tree = CacheTree::new();
    let orphan = tree.orphan("a1", MB);
    let garbled = tree.orphan("b2", MB);
    std::fs::write(garbled.join("workspace.json"), "{not json").unwrap();

    let mut console = Console::from_script(&["a", "d"]);
    let code = run_session(&tree.config(), &mut console, None, &Executor::default()).unwrap();

    assert_eq!(code, ExitCode::Success);
    assert!(!orphan.exists());
    assert!(!garbled.exists());
    assert!(console.output_text().contains("<unknown>"));
}

#[test]
fn test_multiple_variants_are_combined() {
    let tree = CacheTree::new();
    tree.stale("a1", MB);
    let oss = tree.base.path().join("Code - OSS/User/workspaceStorage/z9");
    std::fs::create_dir_all(&oss).unwrap();

    let mut config = tree.config();
    config.variants = vec!["Code".to_string(), "Code - OSS".to_string()];
    let mut console = Console::from_script(&["a", "d"]);
    let code = run_session(&config, &mut console, None, &Executor::default()).unwrap();

    assert_eq!(code, ExitCode::Success);
    assert!(!tree.storage().join("a1").exists());
    assert!(!oss.exists());
}
