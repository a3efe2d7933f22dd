//! Actions on confirmed cache folders.
//!
//! The remove module provides folder removal with:
//! - Move to system trash (recoverable)
//! - Permanent recursive deletion
//! - Dry-run that never touches the filesystem
//! - Batch operations that report each failure and keep going
//!
//! ```no_run
//! use vscache::actions::remove::{Disposer, TrashDisposer};
//! use std::path::Path;
//!
//! let result = TrashDisposer.dispose(Path::new("/path/to/cache/folder"));
//! ```

pub mod remove;

// Re-export commonly used types
pub use remove::{
    BatchRemoveResult, Disposer, Disposition, Executor, PermanentDisposer, RemovalOutcome,
    RemoveError, TrashDisposer,
};
