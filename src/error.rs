//! Structured error handling, stage outcomes and exit codes.
//!
//! Every pipeline stage returns a [`Stage`]: either the value the next stage
//! consumes, or a [`Stop`] describing why the run ends here. Only the driver
//! in `lib.rs` turns a `Stop` into output and an [`ExitCode`].

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

/// Exit codes for the vscache application.
///
/// - 0: Success (completed normally, including "nothing to do" and declined runs)
/// - 1: General error (unexpected failure)
/// - 2: Aborted on invalid operator input
/// - 3: Partial success (some selected cache folders could not be removed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExitCode {
    /// Success: the run completed, or ended early with nothing to do.
    Success = 0,
    /// General error: An unexpected error occurred.
    GeneralError = 1,
    /// Aborted: the operator typed something that was not understood.
    Aborted = 2,
    /// Partial success: removal finished but at least one entry failed.
    PartialSuccess = 3,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get the machine-readable code prefix.
    #[must_use]
    pub fn code_prefix(self) -> &'static str {
        match self {
            Self::Success => "VC000",
            Self::GeneralError => "VC001",
            Self::Aborted => "VC002",
            Self::PartialSuccess => "VC003",
        }
    }
}

/// Structured error information for JSON output.
#[derive(Debug, Serialize)]
pub struct StructuredError {
    /// The error code (e.g., "VC001")
    pub code: String,
    /// The exit code number
    pub exit_code: i32,
    /// Human-readable error message
    pub message: String,
}

impl StructuredError {
    /// Create a new structured error from an anyhow error and an exit code.
    #[must_use]
    pub fn new(err: &anyhow::Error, exit_code: ExitCode) -> Self {
        Self {
            code: exit_code.code_prefix().to_string(),
            exit_code: exit_code.as_i32(),
            message: format!("{err:#}"),
        }
    }
}

/// Why a run ended before (or instead of) removing anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stop {
    /// None of the configured workspace-storage roots held any cache folder.
    NoCacheFound {
        /// Base directories that were searched.
        bases: Vec<PathBuf>,
        /// Editor variant folder names looked for under each base.
        variants: Vec<String>,
    },
    /// Every cache folder still points at an existing workspace.
    NothingStale,
    /// The operator answered `n`.
    Declined,
    /// The operator typed something that was not understood.
    InvalidInput(String),
}

impl Stop {
    /// Exit code the process should report for this stop.
    #[must_use]
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::InvalidInput(_) => ExitCode::Aborted,
            Self::NoCacheFound { .. } | Self::NothingStale | Self::Declined => ExitCode::Success,
        }
    }

    /// Whether the stop is a problem worth highlighting to the operator.
    #[must_use]
    pub fn is_problem(&self) -> bool {
        matches!(self, Self::NoCacheFound { .. } | Self::InvalidInput(_))
    }
}

impl fmt::Display for Stop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoCacheFound { bases, variants } => {
                let bases: Vec<String> = bases.iter().map(|b| b.display().to_string()).collect();
                write!(
                    f,
                    "No cache folder found. Looked in {} for {:?}",
                    bases.join(", "),
                    variants
                )
            }
            Self::NothingStale => write!(f, "No non-existent workspaces found"),
            Self::Declined => write!(f, "Exiting"),
            Self::InvalidInput(reason) if reason.is_empty() => write!(f, "Invalid input. Exiting"),
            Self::InvalidInput(reason) => write!(f, "Invalid input ({reason}). Exiting"),
        }
    }
}

/// Outcome of one pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stage<T> {
    /// Hand `T` to the next stage.
    Continue(T),
    /// End the run.
    Stop(Stop),
}

impl<T> Stage<T> {
    /// The stop reason, if this stage ended the run.
    #[must_use]
    pub fn stop_reason(&self) -> Option<&Stop> {
        match self {
            Self::Continue(_) => None,
            Self::Stop(stop) => Some(stop),
        }
    }
}
