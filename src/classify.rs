//! Stale-set classification.
//!
//! A cache entry is stale when the workspace it names is gone, or when it
//! names no workspace at all: with an empty path there is no live reference
//! to confirm, so the entry is offered for removal like any dead one.

use std::ops::Index;
use std::path::Path;

use crate::error::{Stage, Stop};
use crate::inventory::{CacheEntry, Inventory};

/// Entries whose workspace could not be confirmed to exist, in inventory
/// order.
///
/// Position `i` in the set is shown to the operator as number `i + 1`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaleSet {
    entries: Vec<CacheEntry>,
}

/// Entries the operator confirmed for removal.
pub type RemovalSet = StaleSet;

impl StaleSet {
    /// Create a set from entries already known to be stale.
    #[must_use]
    pub fn new(entries: Vec<CacheEntry>) -> Self {
        Self { entries }
    }

    /// Entries in presentation order.
    #[must_use]
    pub fn entries(&self) -> &[CacheEntry] {
        &self.entries
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total bytes across all entries.
    #[must_use]
    pub fn total_size(&self) -> u64 {
        self.entries.iter().map(|e| e.size_bytes).sum()
    }

    /// Entries paired with their 1-based selection number.
    pub fn numbered(&self) -> impl Iterator<Item = (usize, &CacheEntry)> {
        self.entries.iter().enumerate().map(|(i, e)| (i + 1, e))
    }

    /// Keep only the entries whose 1-based number satisfies `keep`.
    #[must_use]
    pub fn retain_numbers(&self, keep: impl Fn(usize) -> bool) -> Self {
        self.numbered()
            .filter(|(number, _)| keep(*number))
            .map(|(_, entry)| entry.clone())
            .collect()
    }
}

impl Index<usize> for StaleSet {
    type Output = CacheEntry;

    fn index(&self, index: usize) -> &Self::Output {
        &self.entries[index]
    }
}

impl FromIterator<CacheEntry> for StaleSet {
    fn from_iter<I: IntoIterator<Item = CacheEntry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a StaleSet {
    type Item = &'a CacheEntry;
    type IntoIter = std::slice::Iter<'a, CacheEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Whether `entry` refers to a workspace that cannot be found on disk.
#[must_use]
pub fn is_stale(entry: &CacheEntry) -> bool {
    !entry.is_resolved() || !Path::new(&entry.resolved_workspace).exists()
}

/// Restrict the inventory to stale entries, preserving order.
#[must_use]
pub fn classify(inventory: &Inventory) -> StaleSet {
    let stale: StaleSet = inventory
        .entries()
        .iter()
        .filter(|entry| is_stale(entry))
        .cloned()
        .collect();
    log::debug!(
        "{} of {} cache folder(s) are stale",
        stale.len(),
        inventory.len()
    );
    stale
}

/// Classify, stopping the run if every entry is still live.
#[must_use]
pub fn classify_or_stop(inventory: &Inventory) -> Stage<StaleSet> {
    let stale = classify(inventory);
    if stale.is_empty() {
        Stage::Stop(Stop::NothingStale)
    } else {
        Stage::Continue(stale)
    }
}
