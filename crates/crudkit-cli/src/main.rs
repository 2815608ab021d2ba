//! # CrudKit CLI
//!
//! Headless driver for the class-designer engine: validate diagram
//! documents, build generator payloads, render the canvas to SVG.
//!
//! Startup is strictly ordered — arguments, then tracing, then config,
//! then output — because each stage reports its own failures through
//! the previous one.
//!
//! ## Exit codes
//!
//! | Code | Meaning                 |
//! |------|-------------------------|
//! |  0   | Success                 |
//! |  1   | Internal / system error |
//! |  2   | User / input error      |
//! |  3   | Resource not found      |
//! |  4   | Configuration error     |

use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info, instrument};

use crate::{
    cli::{Cli, Commands},
    config::AppConfig,
    error::{CliError, CliResult},
    logging::init_logging,
    output::OutputManager,
};

mod cli;
mod commands;
mod config;
mod document;
mod error;
mod logging;
mod output;

fn main() -> ExitCode {
    // .env first, so it can influence tracing and config. Missing
    // files are ignored; real deployments use real environment vars.
    let _ = dotenvy::dotenv();

    // clap handles --help / --version itself; anything else that fails
    // to parse is a user error (exit 2).
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("{}", e.render().ansi());
            return ExitCode::from(2);
        }
    };

    if let Err(e) = init_logging(&cli.global) {
        eprintln!("Failed to initialise logging: {e}");
        return ExitCode::from(1);
    }
    debug!(
        verbose = cli.global.verbose,
        quiet = cli.global.quiet,
        no_color = cli.global.no_color,
        "CLI started"
    );

    let config = match AppConfig::load(cli.global.config.as_ref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Failed to load configuration: {e:#}");
            return ExitCode::from(4);
        }
    };

    let output = OutputManager::new(&cli.global, &config);
    let verbose = cli.global.verbose > 0;

    match run(cli, config, output) {
        Ok(()) => {
            info!("crudkit completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => report_failure(e, verbose),
    }
}

/// Dispatch to the matching command handler.
#[instrument(skip_all)]
fn run(cli: Cli, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match cli.command {
        Commands::Check(cmd) => commands::check::execute(cmd, output),
        Commands::Payload(cmd) => commands::payload::execute(cmd, config, output),
        Commands::Render(cmd) => commands::render::execute(cmd, output),
        Commands::Sample(cmd) => commands::sample::execute(cmd, output),
        Commands::Completions(cmd) => commands::completions::execute(cmd),
    }
}

/// The single point where a structured [`CliError`] becomes stderr text
/// and an OS exit code.
fn report_failure(err: CliError, verbose: bool) -> ExitCode {
    err.log();

    // Straight to stderr so the message survives stdout redirection;
    // colour only when stderr is a TTY (mirrors logging.rs).
    let message = if std::io::IsTerminal::is_terminal(&std::io::stderr()) {
        err.format_colored(verbose)
    } else {
        err.format_plain(verbose)
    };
    eprint!("{message}");

    ExitCode::from(err.exit_code())
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_structure_is_valid() {
        // Clap's internal consistency check — catches missing values,
        // conflicts, etc.
        Cli::command().debug_assert();
    }

    #[test]
    fn cli_version_matches_cargo() {
        assert_eq!(
            Cli::command().get_version(),
            Some(env!("CARGO_PKG_VERSION"))
        );
    }

    #[test]
    fn cli_has_author() {
        assert!(Cli::command().get_author().is_some());
    }
}
