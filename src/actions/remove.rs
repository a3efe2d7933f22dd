//! Removal of confirmed cache folders.
//!
//! # Overview
//!
//! - Move to system trash (recoverable)
//! - Permanent recursive deletion
//! - Dry-run, which touches nothing
//!
//! Every folder is processed independently. A failure is reported and the
//! batch moves on; folders removed before a failure stay removed.
//!
//! # Example
//!
//! ```no_run
//! use vscache::actions::remove::{Disposition, Executor};
//! use vscache::classify::StaleSet;
//! use vscache::prompt::Console;
//!
//! let removal = StaleSet::default();
//! let mut console = Console::stdio();
//! let executor = Executor::default();
//! let result = executor.remove_batch(&removal, Disposition::Trash, &mut console);
//! println!("{}", result.summary());
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use bytesize::ByteSize;
use thiserror::Error;
use yansi::Paint;

use crate::classify::RemovalSet;
use crate::error::{Stage, Stop};
use crate::inventory::CacheEntry;
use crate::prompt::Prompt;
use crate::report::workspace_label;

const DISPOSITION_QUESTION: &str =
    "Do you want to move the folders to trash (t) or delete them permanently (d)?";

/// Error type for removal operations.
#[derive(Debug, Error)]
pub enum RemoveError {
    /// Folder was not found (may have been removed already).
    #[error("folder not found: {0}")]
    NotFound(PathBuf),

    /// Permission denied when attempting to remove.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// Trash operation failed.
    #[error("trash operation failed for {path}: {message}")]
    TrashFailed { path: PathBuf, message: String },

    /// Permanent delete operation failed.
    #[error("permanent delete failed for {path}: {message}")]
    PermanentDeleteFailed { path: PathBuf, message: String },

    /// General I/O error.
    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl RemoveError {
    fn from_io(path: &Path, e: io::Error) -> Self {
        match e.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: e,
            },
        }
    }
}

/// What happens to a removed cache folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Move to the system trash.
    Trash,
    /// Delete recursively, unrecoverably.
    Permanent,
}

impl Disposition {
    /// Interpret the disposition answer (`t` or `d`).
    #[must_use]
    pub fn from_answer(answer: &str) -> Option<Self> {
        match answer {
            "t" => Some(Self::Trash),
            "d" => Some(Self::Permanent),
            _ => None,
        }
    }
}

/// Capability that removes one directory tree.
pub trait Disposer {
    /// Remove `path` and everything below it.
    ///
    /// # Errors
    ///
    /// Returns [`RemoveError`] if the folder could not be removed.
    fn dispose(&self, path: &Path) -> Result<(), RemoveError>;
}

/// Moves folders to the system trash via the `trash` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrashDisposer;

impl Disposer for TrashDisposer {
    fn dispose(&self, path: &Path) -> Result<(), RemoveError> {
        fs::symlink_metadata(path).map_err(|e| RemoveError::from_io(path, e))?;

        trash::delete(path).map_err(|e| {
            log::error!("Trash operation failed for {}: {}", path.display(), e);
            RemoveError::TrashFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
        })
    }
}

/// Deletes folders permanently with `remove_dir_all`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PermanentDisposer;

impl Disposer for PermanentDisposer {
    fn dispose(&self, path: &Path) -> Result<(), RemoveError> {
        fs::symlink_metadata(path).map_err(|e| RemoveError::from_io(path, e))?;

        fs::remove_dir_all(path).map_err(|e| {
            log::error!("Permanent delete failed for {}: {}", path.display(), e);
            match e.kind() {
                io::ErrorKind::PermissionDenied => RemoveError::PermissionDenied(path.to_path_buf()),
                _ => RemoveError::PermanentDeleteFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                },
            }
        })
    }
}

/// Outcome of removing one cache folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovalOutcome {
    /// Cache folder that was targeted.
    pub location: PathBuf,
    /// Workspace the folder belonged to.
    pub workspace: String,
    /// Bytes the folder held at inventory time.
    pub size_bytes: u64,
    /// `Err` carries the failure message.
    pub result: Result<(), String>,
}

impl RemovalOutcome {
    /// Whether the folder was removed.
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.result.is_ok()
    }
}

/// Results of a batch removal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchRemoveResult {
    /// `None` for a dry run, which removes nothing.
    pub disposition: Option<Disposition>,
    /// One outcome per folder, in removal order.
    pub outcomes: Vec<RemovalOutcome>,
    /// Total bytes freed by successful removals.
    pub bytes_freed: u64,
}

impl BatchRemoveResult {
    /// Result of a dry run.
    #[must_use]
    pub fn dry_run() -> Self {
        Self::default()
    }

    /// Whether this is a dry-run result.
    #[must_use]
    pub fn is_dry_run(&self) -> bool {
        self.disposition.is_none()
    }

    /// Number of successful removals.
    #[must_use]
    pub fn success_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.succeeded()).count()
    }

    /// Number of failed removals.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.outcomes.len() - self.success_count()
    }

    /// Check if all removals succeeded.
    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        self.outcomes.iter().all(RemovalOutcome::succeeded)
    }

    /// Failed outcomes.
    pub fn failures(&self) -> impl Iterator<Item = &RemovalOutcome> {
        self.outcomes.iter().filter(|o| !o.succeeded())
    }

    /// Human-readable summary of the operation.
    #[must_use]
    pub fn summary(&self) -> String {
        if self.is_dry_run() {
            return "Dry run. Not deleting anything".to_string();
        }
        let done = match self.disposition {
            Some(Disposition::Trash) => format!("Moved {} folder(s) to trash", self.success_count()),
            _ => format!("Deleted {} folder(s)", self.success_count()),
        };
        if self.all_succeeded() {
            format!("{}, freed {}", done, ByteSize::b(self.bytes_freed))
        } else {
            format!(
                "{}, {} failed, freed {}",
                done,
                self.failure_count(),
                ByteSize::b(self.bytes_freed)
            )
        }
    }
}

/// Performs the removal of a confirmed removal set.
pub struct Executor {
    trash: Box<dyn Disposer>,
    permanent: Box<dyn Disposer>,
}

impl Default for Executor {
    fn default() -> Self {
        Self::new(Box::new(TrashDisposer), Box::new(PermanentDisposer))
    }
}

impl Executor {
    /// Create an executor with explicit trash and permanent disposers.
    #[must_use]
    pub fn new(trash: Box<dyn Disposer>, permanent: Box<dyn Disposer>) -> Self {
        Self { trash, permanent }
    }

    /// Remove the confirmed set, asking once how.
    ///
    /// In dry-run mode nothing is asked and nothing is touched.
    ///
    /// # Errors
    ///
    /// Returns an I/O error only if the prompt itself fails.
    pub fn execute(
        &self,
        removal: &RemovalSet,
        dry_run: bool,
        prompt: &mut dyn Prompt,
    ) -> io::Result<Stage<BatchRemoveResult>> {
        if dry_run {
            log::info!("Dry run: {} folder(s) left in place", removal.len());
            prompt.say(&"Dry run. Not deleting anything".bright_green().to_string())?;
            return Ok(Stage::Continue(BatchRemoveResult::dry_run()));
        }

        let answer = prompt.ask(DISPOSITION_QUESTION)?;
        let Some(disposition) = Disposition::from_answer(&answer) else {
            log::debug!("Unrecognized disposition: {:?}", answer);
            return Ok(Stage::Stop(Stop::InvalidInput(format!(
                "'{answer}' is not one of t, d"
            ))));
        };

        let result = self.remove_batch(removal, disposition, prompt);
        prompt.say(&result.summary())?;
        Ok(Stage::Continue(result))
    }

    /// Remove every entry with the given disposition, continuing past
    /// failures.
    pub fn remove_batch(
        &self,
        removal: &RemovalSet,
        disposition: Disposition,
        prompt: &mut dyn Prompt,
    ) -> BatchRemoveResult {
        let disposer = match disposition {
            Disposition::Trash => self.trash.as_ref(),
            Disposition::Permanent => self.permanent.as_ref(),
        };

        let mut result = BatchRemoveResult {
            disposition: Some(disposition),
            ..BatchRemoveResult::default()
        };

        for entry in removal {
            let outcome = remove_one(entry, disposition, disposer, prompt);
            if outcome.succeeded() {
                result.bytes_freed += outcome.size_bytes;
            }
            result.outcomes.push(outcome);
        }

        log::info!("{}", result.summary());
        result
    }
}

fn remove_one(
    entry: &CacheEntry,
    disposition: Disposition,
    disposer: &dyn Disposer,
    prompt: &mut dyn Prompt,
) -> RemovalOutcome {
    let workspace = workspace_label(entry);
    let (doing, failed) = match disposition {
        Disposition::Trash => (
            format!("Moving {workspace} to trash"),
            format!("Error moving {workspace} to trash"),
        ),
        Disposition::Permanent => (
            format!("Deleting {workspace}"),
            format!("Error deleting {workspace}"),
        ),
    };
    // Transcript write failures never stop the batch.
    let _ = prompt.say(&doing.bright_green().to_string());

    let result = match disposer.dispose(&entry.location) {
        Ok(()) => {
            log::info!(
                "Removed {} ({} bytes)",
                entry.location.display(),
                entry.size_bytes
            );
            Ok(())
        }
        Err(e) => {
            log::warn!("{}: {}", failed, e);
            let _ = prompt.say(&format!("{failed}: {e}").bright_red().to_string());
            Err(e.to_string())
        }
    };

    RemovalOutcome {
        location: entry.location.clone(),
        workspace: entry.resolved_workspace.clone(),
        size_bytes: entry.size_bytes,
        result,
    }
}
