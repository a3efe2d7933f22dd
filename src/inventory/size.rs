//! On-disk size of a cache folder.

use std::path::Path;

use walkdir::WalkDir;

/// Computes the total size of a directory tree in bytes.
pub trait DirectorySizer {
    /// Sum of the sizes of all regular files under `dir`.
    fn size_of(&self, dir: &Path) -> u64;
}

/// [`DirectorySizer`] backed by a single-threaded `walkdir` traversal.
///
/// Symbolic links are not followed and do not count towards the total.
/// Entries that cannot be read are skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct WalkdirSizer;

impl DirectorySizer for WalkdirSizer {
    fn size_of(&self, dir: &Path) -> u64 {
        WalkDir::new(dir)
            .follow_links(false)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    log::debug!("Skipping unreadable entry under {}: {}", dir.display(), e);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| entry.metadata().ok())
            .map(|metadata| metadata.len())
            .sum()
    }
}
