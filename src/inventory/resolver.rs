//! Resolve a cache folder to the workspace it was created for.
//!
//! VS Code writes a small `workspace.json` next to each cache folder's
//! state database:
//!
//! ```json
//! { "folder": "file:///home/user/projects/demo" }
//! ```
//!
//! The resolver strips exactly the seven characters of the `file://` scheme
//! prefix and performs no further URI decoding, so a path containing
//! percent-encoded characters resolves to its encoded spelling. Any failure
//! resolves to an empty path, which classification treats as stale.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

/// Default sidecar file name inside each cache folder.
pub const SIDECAR_FILE: &str = "workspace.json";

/// Length of the `file://` scheme prefix removed from `folder` URIs.
pub const SCHEME_PREFIX_LEN: usize = 7;

/// Error type for reading a sidecar descriptor.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The sidecar exists but could not be read.
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The sidecar is not valid JSON.
    #[error("error decoding JSON in {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Maps a cache folder to the workspace path it refers to.
pub trait WorkspaceResolver {
    /// Workspace path for `entry_dir`, or an empty string if it cannot be
    /// determined.
    fn resolve(&self, entry_dir: &Path) -> String;
}

/// Resolver that reads the sidecar JSON descriptor.
#[derive(Debug, Clone)]
pub struct SidecarResolver {
    file_name: String,
}

impl Default for SidecarResolver {
    fn default() -> Self {
        Self::new(SIDECAR_FILE)
    }
}

impl SidecarResolver {
    /// Create a resolver that looks for `file_name` inside each cache folder.
    #[must_use]
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
        }
    }

    /// Read the raw `folder` URI from the sidecar.
    ///
    /// Returns `Ok(None)` when there is no sidecar, it is empty, or it has
    /// no string `folder` field.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] if the sidecar cannot be read or decoded.
    pub fn folder_uri(&self, entry_dir: &Path) -> Result<Option<String>, ResolveError> {
        let path = entry_dir.join(&self.file_name);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(ResolveError::Io { path, source }),
        };

        if raw.is_empty() {
            return Ok(None);
        }

        let value: Value = serde_json::from_str(&raw).map_err(|source| ResolveError::Decode {
            path: path.clone(),
            source,
        })?;

        match value.get("folder").and_then(Value::as_str) {
            Some(folder) => Ok(Some(folder.to_string())),
            None => {
                log::debug!("No string 'folder' field in {}", path.display());
                Ok(None)
            }
        }
    }
}

impl WorkspaceResolver for SidecarResolver {
    fn resolve(&self, entry_dir: &Path) -> String {
        match self.folder_uri(entry_dir) {
            Ok(Some(uri)) => strip_scheme(&uri),
            Ok(None) => String::new(),
            Err(e) => {
                log::warn!("{}", e);
                String::new()
            }
        }
    }
}

/// Drop the fixed-length scheme prefix from a `folder` URI.
///
/// Counts characters, not bytes, so URIs shorter than the prefix give an
/// empty path instead of panicking.
#[must_use]
pub fn strip_scheme(uri: &str) -> String {
    if !uri.starts_with("file://") {
        log::debug!("Workspace URI without file:// scheme: {}", uri);
    }
    uri.chars().skip(SCHEME_PREFIX_LEN).collect()
}
