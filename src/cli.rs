//! Command-line interface definitions for vscache.
//!
//! # Example
//!
//! ```bash
//! # Look in ~/.config/Code and ~/.config/Code - OSS (the defaults)
//! vscache
//!
//! # Another base directory, without removing anything
//! vscache --path /mnt/backup/home/.config --dry-run
//!
//! # Debug logging
//! vscache -v
//! ```

use clap::Parser;
use std::path::PathBuf;

/// Find VS Code workspace caches whose workspace folder no longer exists
/// and remove them.
#[derive(Debug, Parser)]
#[command(name = "vscache")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Base configuration directory holding the editor folders (default: ~/.config)
    #[arg(short, long, value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Do a dry run. Nothing will be deleted
    #[arg(short, long)]
    pub dry_run: bool,

    /// Configuration file (TOML)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR")]
    pub no_color: bool,

    /// Print unexpected errors as JSON on stderr
    #[arg(long)]
    pub json_errors: bool,
}
