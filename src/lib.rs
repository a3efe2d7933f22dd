//! vscache - VS Code workspace cache cleaner
//!
//! VS Code keeps a cache folder per opened workspace and never removes it
//! when the workspace itself is deleted. vscache finds those orphaned
//! folders, shows how much space they take, and removes the ones the
//! operator picks, to the trash or permanently.
//!
//! The run is a four-stage pipeline, each stage consuming only the previous
//! stage's output:
//!
//! 1. [`inventory`]: list and size cache folders, resolve their workspaces
//! 2. [`classify`]: keep the folders whose workspace is gone
//! 3. [`selection`]: let the operator choose what to remove
//! 4. [`actions`]: remove the chosen folders

pub mod actions;
pub mod classify;
pub mod cli;
pub mod config;
pub mod error;
pub mod inventory;
pub mod logging;
pub mod progress;
pub mod prompt;
pub mod report;
pub mod selection;

use anyhow::{Context, Result};

use crate::actions::Executor;
use crate::cli::Cli;
use crate::config::Config;
use crate::error::{ExitCode, Stage, Stop};
use crate::inventory::{Inventory, SidecarResolver, WalkdirSizer};
use crate::progress::{Progress, ProgressCallback};
use crate::prompt::{Console, Prompt};

/// Unwrap a stage's value or end the session with its stop reason.
macro_rules! proceed {
    ($prompt:expr, $stage:expr) => {
        match $stage {
            Stage::Continue(value) => value,
            Stage::Stop(stop) => return stopped($prompt, &stop),
        }
    };
}

/// Run the application for parsed command-line arguments.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    if cli.no_color {
        yansi::disable();
    }

    let mut config = Config::load(cli.config.as_deref())?;
    config.apply_cli(&cli);
    log::debug!("Effective configuration: {:?}", config);

    let progress = Progress::new(cli.quiet);
    let mut console = Console::stdio();
    run_session(&config, &mut console, Some(&progress), &Executor::default())
}

/// Run one inventory → classify → select → remove pass.
///
/// Every early ending (nothing found, nothing stale, declined, invalid
/// input) is reported through `prompt` and mapped to an [`ExitCode`].
pub fn run_session(
    config: &Config,
    prompt: &mut dyn Prompt,
    progress: Option<&dyn ProgressCallback>,
    executor: &Executor,
) -> Result<ExitCode> {
    let roots = config.roots()?;
    let resolver = SidecarResolver::new(config.sidecar_file.as_str());

    let inventory = proceed!(
        prompt,
        Inventory::build_or_stop(&roots, &resolver, &WalkdirSizer, progress)
    );
    let stale = proceed!(prompt, classify::classify_or_stop(&inventory));
    log::info!(
        "{} of {} cache folder(s) refer to missing workspaces",
        stale.len(),
        inventory.len()
    );

    let removal = proceed!(
        prompt,
        selection::select(stale, prompt).context("failed to read operator input")?
    );
    let result = proceed!(
        prompt,
        executor
            .execute(&removal, config.dry_run, prompt)
            .context("failed to read operator input")?
    );

    if result.all_succeeded() {
        Ok(ExitCode::Success)
    } else {
        Ok(ExitCode::PartialSuccess)
    }
}

fn stopped(prompt: &mut dyn Prompt, stop: &Stop) -> Result<ExitCode> {
    log::debug!("Run stopped: {:?}", stop);
    prompt
        .say(&report::stop_line(stop))
        .context("failed to write to terminal")?;
    Ok(stop.exit_code())
}
