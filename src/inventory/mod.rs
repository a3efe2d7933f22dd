//! Inventory of workspace cache folders.
//!
//! VS Code keeps one opaque, hash-named folder per opened workspace under
//! `<base>/<variant>/User/workspaceStorage/`. This module lists those
//! folders for every configured editor variant, sizes them, and resolves
//! the workspace each one belongs to.
//!
//! # Architecture
//!
//! - [`resolver`]: reads the `workspace.json` sidecar of a cache folder
//! - [`size`]: sums the bytes of a cache folder
//!
//! # Example
//!
//! ```no_run
//! use vscache::inventory::{Inventory, RootConfig};
//!
//! let roots = RootConfig::for_variants("/home/user/.config", &["Code", "Code - OSS"]);
//! let inventory = Inventory::build(&roots, "workspace.json", None);
//! for entry in inventory.entries() {
//!     println!("{} -> {}", entry.location.display(), entry.resolved_workspace);
//! }
//! ```

pub mod resolver;
pub mod size;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Stage, Stop};
use crate::progress::ProgressCallback;

pub use resolver::{strip_scheme, ResolveError, SidecarResolver, WorkspaceResolver, SIDECAR_FILE};
pub use size::{DirectorySizer, WalkdirSizer};

/// Path below `<base>/<variant>/` that holds the per-workspace cache folders.
pub const WORKSPACE_STORAGE_SUFFIX: &str = "User/workspaceStorage";

/// Editor variants checked by default.
pub const DEFAULT_VARIANTS: [&str; 2] = ["Code", "Code - OSS"];

/// One discovered cache folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    /// Absolute path to the cache folder.
    pub location: PathBuf,
    /// Workspace path the folder claims to cache, empty if unresolvable.
    pub resolved_workspace: String,
    /// Total bytes of all regular files under `location`.
    pub size_bytes: u64,
}

impl CacheEntry {
    /// Create a new CacheEntry.
    #[must_use]
    pub fn new(location: PathBuf, resolved_workspace: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            location,
            resolved_workspace: resolved_workspace.into(),
            size_bytes,
        }
    }

    /// Whether the sidecar named a workspace at all.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        !self.resolved_workspace.is_empty()
    }
}

/// One storage root to inventory: `<base_dir>/<variant>/<storage_suffix>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootConfig {
    /// Base configuration directory (e.g. `~/.config`).
    pub base_dir: PathBuf,
    /// Editor variant folder name (e.g. `Code`).
    pub variant: String,
    /// Relative path to the workspace storage below the variant folder.
    pub storage_suffix: PathBuf,
}

impl RootConfig {
    /// Create a root with the default storage suffix.
    #[must_use]
    pub fn new(base_dir: impl Into<PathBuf>, variant: impl Into<String>) -> Self {
        Self {
            base_dir: base_dir.into(),
            variant: variant.into(),
            storage_suffix: PathBuf::from(WORKSPACE_STORAGE_SUFFIX),
        }
    }

    /// One root per variant under the same base directory.
    #[must_use]
    pub fn for_variants<S: AsRef<str>>(base_dir: impl AsRef<Path>, variants: &[S]) -> Vec<Self> {
        variants
            .iter()
            .map(|v| Self::new(base_dir.as_ref(), v.as_ref()))
            .collect()
    }

    /// Override the storage suffix.
    #[must_use]
    pub fn with_storage_suffix(mut self, suffix: impl Into<PathBuf>) -> Self {
        self.storage_suffix = suffix.into();
        self
    }

    /// The directory whose immediate subfolders are cache entries.
    #[must_use]
    pub fn storage_dir(&self) -> PathBuf {
        self.base_dir.join(&self.variant).join(&self.storage_suffix)
    }
}

/// All cache entries found in one run, in discovery order.
///
/// Entries are unique by `location`. Discovery order is sorted by folder
/// name within each root, and roots are visited in configuration order,
/// so numbering shown to the operator is stable on an unchanged disk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    entries: Vec<CacheEntry>,
}

impl Inventory {
    /// Build an inventory with the default sidecar resolver and sizer.
    #[must_use]
    pub fn build(
        roots: &[RootConfig],
        sidecar_file: &str,
        progress: Option<&dyn ProgressCallback>,
    ) -> Self {
        Self::build_with(
            roots,
            &SidecarResolver::new(sidecar_file),
            &WalkdirSizer,
            progress,
        )
    }

    /// Build an inventory with explicit resolution and sizing capabilities.
    ///
    /// A storage root that does not exist is skipped with a warning.
    pub fn build_with(
        roots: &[RootConfig],
        resolver: &dyn WorkspaceResolver,
        sizer: &dyn DirectorySizer,
        progress: Option<&dyn ProgressCallback>,
    ) -> Self {
        let mut inventory = Self::default();
        let mut seen: HashSet<PathBuf> = HashSet::new();

        for root in roots {
            let storage = root.storage_dir();
            if !storage.is_dir() {
                log::warn!("Folder {} not found. Skipping...", storage.display());
                continue;
            }

            let folders = list_subdirectories(&storage);
            log::debug!(
                "Found {} cache folder(s) in {}",
                folders.len(),
                storage.display()
            );

            let phase = storage.display().to_string();
            if let Some(cb) = progress {
                cb.on_phase_start(&phase, folders.len());
            }

            for (index, location) in folders.into_iter().enumerate() {
                if let Some(cb) = progress {
                    cb.on_progress(index + 1, &location.to_string_lossy());
                }
                if !seen.insert(location.clone()) {
                    log::debug!("Already inventoried {}", location.display());
                    continue;
                }

                let resolved_workspace = resolver.resolve(&location);
                let size_bytes = sizer.size_of(&location);
                log::trace!(
                    "{} -> '{}' ({} bytes)",
                    location.display(),
                    resolved_workspace,
                    size_bytes
                );
                inventory
                    .entries
                    .push(CacheEntry::new(location, resolved_workspace, size_bytes));
            }

            if let Some(cb) = progress {
                cb.on_phase_end(&phase);
            }
        }

        inventory
    }

    /// Build an inventory, stopping the run if nothing was found.
    pub fn build_or_stop(
        roots: &[RootConfig],
        resolver: &dyn WorkspaceResolver,
        sizer: &dyn DirectorySizer,
        progress: Option<&dyn ProgressCallback>,
    ) -> Stage<Self> {
        let inventory = Self::build_with(roots, resolver, sizer, progress);
        if inventory.is_empty() {
            let mut bases: Vec<PathBuf> = Vec::new();
            let mut variants: Vec<String> = Vec::new();
            for root in roots {
                if !bases.contains(&root.base_dir) {
                    bases.push(root.base_dir.clone());
                }
                if !variants.contains(&root.variant) {
                    variants.push(root.variant.clone());
                }
            }
            return Stage::Stop(Stop::NoCacheFound { bases, variants });
        }
        Stage::Continue(inventory)
    }

    /// Entries in discovery order.
    #[must_use]
    pub fn entries(&self) -> &[CacheEntry] {
        &self.entries
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no cache folder was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total bytes across all entries.
    #[must_use]
    pub fn total_size(&self) -> u64 {
        self.entries.iter().map(|e| e.size_bytes).sum()
    }
}

impl FromIterator<CacheEntry> for Inventory {
    fn from_iter<I: IntoIterator<Item = CacheEntry>>(iter: I) -> Self {
        let mut seen = HashSet::new();
        let entries = iter
            .into_iter()
            .filter(|e| seen.insert(e.location.clone()))
            .collect();
        Self { entries }
    }
}

/// Immediate subdirectories of `dir`, sorted by name.
fn list_subdirectories(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::warn!("Cannot read entry in {}: {}", dir.display(), e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_dir())
        .map(walkdir::DirEntry::into_path)
        .collect()
}
