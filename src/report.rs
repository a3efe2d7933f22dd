//! Operator-facing presentation of cache entries.
//!
//! Sizes are shown in binary megabytes and gigabytes with two decimals,
//! matching what the operator sees in file managers for cache folders.

use std::io;

use yansi::Paint;

use crate::classify::StaleSet;
use crate::error::Stop;
use crate::inventory::CacheEntry;
use crate::prompt::Prompt;

const MIB: f64 = 1024.0 * 1024.0;
const GIB: f64 = MIB * 1024.0;

/// Bytes as binary megabytes.
#[must_use]
pub fn megabytes(bytes: u64) -> f64 {
    bytes as f64 / MIB
}

/// Bytes as binary gigabytes.
#[must_use]
pub fn gigabytes(bytes: u64) -> f64 {
    bytes as f64 / GIB
}

/// `"12.34 MB, 0.01 GB"`
#[must_use]
pub fn format_total(bytes: u64) -> String {
    format!("{:.2} MB, {:.2} GB", megabytes(bytes), gigabytes(bytes))
}

/// Workspace path for display; unresolvable entries show a placeholder.
#[must_use]
pub fn workspace_label(entry: &CacheEntry) -> &str {
    if entry.is_resolved() {
        &entry.resolved_workspace
    } else {
        "<unknown>"
    }
}

/// One entry line, optionally prefixed with its selection number.
#[must_use]
pub fn entry_line(number: Option<usize>, entry: &CacheEntry) -> String {
    let number = number
        .map(|n| format!("{}", format!("{n}: ").bright_green()))
        .unwrap_or_default();
    format!(
        "{}{}{}{}",
        number,
        workspace_label(entry).bright_magenta(),
        format!(" [{:.2} MB]", megabytes(entry.size_bytes)).bright_red(),
        format!(" ({})", entry.location.display()).blue(),
    )
}

/// Show the full stale set with numbers and its total size.
pub fn present_stale(prompt: &mut dyn Prompt, stale: &StaleSet) -> io::Result<()> {
    prompt.say(&"Found the following non-existent workspaces:".bright_green().to_string())?;
    prompt.say(&format!(
        "|{}|{}|{}|{}|",
        " <<< Number >>> ".bright_green(),
        " <<< Non existing workspace path >>> ".bright_magenta(),
        " <<< Cached dir size >>> ".bright_red(),
        " <<< Cached dir path >>> ".blue(),
    ))?;
    for (number, entry) in stale.numbered() {
        prompt.say(&entry_line(Some(number), entry))?;
    }
    prompt.say(
        &format!(
            "\nTotal size of non-existent workspaces: {}\n",
            format_total(stale.total_size())
        )
        .bright_yellow()
        .to_string(),
    )
}

/// Show an operator-chosen subset without numbers and its total size.
pub fn present_selected(prompt: &mut dyn Prompt, selected: &StaleSet) -> io::Result<()> {
    prompt.say(&"Selected Folders:".bright_green().to_string())?;
    for entry in selected {
        prompt.say(&entry_line(None, entry))?;
    }
    prompt.say(
        &format!(
            "\nTotal size of selected non-existent workspaces: {}\n",
            format_total(selected.total_size())
        )
        .bright_yellow()
        .to_string(),
    )
}

/// Colored one-liner for a stop, as printed by the driver.
#[must_use]
pub fn stop_line(stop: &Stop) -> String {
    if stop.is_problem() {
        stop.to_string().bright_red().to_string()
    } else {
        stop.to_string().bright_green().to_string()
    }
}
