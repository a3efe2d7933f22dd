//! Diagnostics for vscache runs.
//!
//! Everything the operator must read or answer (listings, questions,
//! removal progress) goes to stdout through [`crate::prompt::Prompt`].
//! Diagnostics go through `log` to stderr: skipped storage roots and
//! unreadable `workspace.json` sidecars at warn, per-folder removals at
//! info, traversal details at debug and trace.
//!
//! `RUST_LOG` takes precedence over `-q` and `-v`.

use env_logger::Builder;
use log::LevelFilter;
use std::env;
use std::io::Write;

/// Install the stderr logger for `-v` count and `-q`.
///
/// # Panics
///
/// Panics on a second call; `env_logger` installs a global logger.
pub fn init_logging(verbose: u8, quiet: bool) {
    let use_env = env::var("RUST_LOG").is_ok();

    let mut builder = Builder::new();
    if use_env {
        builder.parse_default_env();
    } else {
        builder.filter_level(determine_level(verbose, quiet));
    }

    configure_format(&mut builder, verbose);
    builder.init();

    log::debug!(
        "Log level {:?}{}",
        log::max_level(),
        if use_env { " (from RUST_LOG)" } else { "" }
    );
}

/// `-q` wins over any `-v` count.
fn determine_level(verbose: u8, quiet: bool) -> LevelFilter {
    match (quiet, verbose) {
        (true, _) => LevelFilter::Error,
        (false, 0) => LevelFilter::Info,
        (false, 1) => LevelFilter::Debug,
        (false, _) => LevelFilter::Trace,
    }
}

/// Release builds print `LEVEL message`. Debug builds prefix a timestamp
/// and, with `-v`, the emitting module.
fn configure_format(builder: &mut Builder, verbose: u8) {
    #[cfg(debug_assertions)]
    {
        builder.format(move |buf, record| {
            let timestamp = buf.timestamp_seconds();
            let level = record.level();
            let level_style = buf.default_level_style(level);

            if verbose >= 1 {
                writeln!(
                    buf,
                    "{} {level_style}{:<5}{level_style:#} [{}] {}",
                    timestamp,
                    level,
                    record.module_path().unwrap_or("unknown"),
                    record.args()
                )
            } else {
                writeln!(
                    buf,
                    "{} {level_style}{:<5}{level_style:#} {}",
                    timestamp,
                    level,
                    record.args()
                )
            }
        });
    }

    #[cfg(not(debug_assertions))]
    {
        let _ = verbose;
        builder.format(|buf, record| {
            let level = record.level();
            let level_style = buf.default_level_style(level);
            writeln!(
                buf,
                "{level_style}{:<5}{level_style:#} {}",
                level,
                record.args()
            )
        });
    }
}
