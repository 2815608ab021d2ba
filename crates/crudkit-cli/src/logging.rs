//! Tracing subscriber initialisation.
//!
//! The engine crates only *emit* events; installing a subscriber is
//! this binary's job, done exactly once at startup.
//!
//! Verbosity ladder: nothing → WARN, `-v` → INFO, `-vv` → DEBUG,
//! `-vvv` → TRACE; `--quiet` forces ERROR. A `RUST_LOG` value in the
//! environment overrides the ladder entirely.

use std::io::IsTerminal as _;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::GlobalArgs;

/// Workspace crates covered by the derived filter.
const FILTER_TARGETS: [&str; 3] = ["crudkit", "crudkit_core", "crudkit_canvas"];

/// Install the global tracing subscriber.
///
/// Call before any tracing macro fires. Returns an error when another
/// subscriber is already registered in this process.
pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(derived_filter(args)));

    let stderr_is_tty = std::io::stderr().is_terminal();
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_ansi(!args.no_color && stderr_is_tty)
        .with_writer(std::io::stderr);

    // `try_init` instead of `init`: test harnesses may register twice
    // in one process, and that should surface as an error, not a panic.
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialise tracing: {e}"))
}

/// Build the `crate=level,...` directive string for the whole workspace.
fn derived_filter(args: &GlobalArgs) -> String {
    let level = derive_level(args);
    FILTER_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Translate the verbosity counter + quiet flag to a level string.
fn derive_level(args: &GlobalArgs) -> &'static str {
    match (args.quiet, args.verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    }
}
