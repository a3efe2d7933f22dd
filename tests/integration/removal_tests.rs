use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use super::fixtures::{CacheTree, MB};
use vscache::actions::{Disposer, Executor, PermanentDisposer, RemoveError};
use vscache::error::ExitCode;
use vscache::prompt::Console;
use vscache::run_session;

/// Deletes permanently, except for one folder that always fails.
struct FailOn(PathBuf);

impl Disposer for FailOn {
    fn dispose(&self, path: &Path) -> Result<(), RemoveError> {
        if path == self.0 {
            return Err(RemoveError::PermanentDeleteFailed {
                path: path.to_path_buf(),
                message: "device busy".to_string(),
            });
        }
        PermanentDisposer.dispose(path)
    }
}

/// Records what it was asked to remove without touching the disk.
struct Recording(Rc<RefCell<Vec<PathBuf>>>);

impl Disposer for Recording {
    fn dispose(&self, path: &Path) -> Result<(), RemoveError> {
        self.0.borrow_mut().push(path.to_path_buf());
        Ok(())
    }
}

#[test]
fn test_failure_does_not_stop_batch() {
    let tree = CacheTree::new();
    let first = tree.stale("a1", MB);
    let second = tree.stale("b2", MB);
    let third = tree.stale("c3", MB);

    let executor = Executor::new(
        Box::new(FailOn(second.clone())),
        Box::new(FailOn(second.clone())),
    );
    let mut console = Console::from_script(&["a", "d"]);
    let code = run_session(&tree.config(), &mut console, None, &executor).unwrap();

    assert_eq!(code, ExitCode::PartialSuccess);
    assert!(!first.exists());
    assert!(second.exists());
    assert!(!third.exists());

    let output = console.output_text();
    assert!(output.contains("Error deleting"));
    assert!(output.contains("device busy"));
    assert!(output.contains("Deleted 2 folder(s), 1 failed"));
}

/// Another process removes the folder just before we get to it.
struct Vanishing;

impl Disposer for Vanishing {
    fn dispose(&self, path: &Path) -> Result<(), RemoveError> {
        std::fs::remove_dir_all(path).unwrap();
        PermanentDisposer.dispose(path)
    }
}

#[test]
fn test_folder_vanished_before_removal() {
    let tree = CacheTree::new();
    tree.stale("a1", MB);

    let executor = Executor::new(Box::new(Vanishing), Box::new(Vanishing));
    let mut console = Console::from_script(&["a", "d"]);
    let code = run_session(&tree.config(), &mut console, None, &executor).unwrap();

    assert_eq!(code, ExitCode::PartialSuccess);
    assert!(console.output_text().contains("folder not found"));
}

#[test]
fn test_trash_answer_uses_trash_disposer() {
    let tree = CacheTree::new();
    let first = tree.stale("a1", MB);
    let second = tree.stale("b2", MB);

    let trashed = Rc::new(RefCell::new(Vec::new()));
    let deleted = Rc::new(RefCell::new(Vec::new()));
    let executor = Executor::new(
        Box::new(Recording(Rc::clone(&trashed))),
        Box::new(Recording(Rc::clone(&deleted))),
    );
    let mut console = Console::from_script(&["a", "t"]);
    let code = run_session(&tree.config(), &mut console, None, &executor).unwrap();

    assert_eq!(code, ExitCode::Success);
    assert_eq!(*trashed.borrow(), vec![first, second]);
    assert!(deleted.borrow().is_empty());

    let output = console.output_text();
    assert!(output.contains("to trash"));
    assert!(output.contains("Moved 2 folder(s) to trash"));
}

#[test]
fn test_invalid_disposition_aborts() {
    let tree = CacheTree::new();
    let first = tree.stale("a1", MB);

    let mut console = Console::from_script(&["a", "x"]);
    let code = run_session(&tree.config(), &mut console, None, &Executor::default()).unwrap();

    assert_eq!(code, ExitCode::Aborted);
    assert!(first.exists());
    assert!(console.output_text().contains("Invalid input"));
}

#[test]
fn test_live_workspace_is_never_offered() {
    let tree = CacheTree::new();
    let live = tree.live("a1", MB);
    tree.stale("b2", MB);

    let deleted = Rc::new(RefCell::new(Vec::new()));
    let executor = Executor::new(
        Box::new(Recording(Rc::clone(&deleted))),
        Box::new(Recording(Rc::clone(&deleted))),
    );
    let mut console = Console::from_script(&["a", "d"]);
    run_session(&tree.config(), &mut console, None, &executor).unwrap();

    assert!(!deleted.borrow().contains(&live));
    assert_eq!(deleted.borrow().len(), 1);
}
