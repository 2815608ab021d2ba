//! Global arguments that apply to every subcommand.
//!
//! Flattened into [`super::Cli`], so `-v`, `-q`, `--no-color`, and
//! friends work on any invocation without per-command repetition.

use clap::Args;
use std::path::PathBuf;

/// Global arguments for all commands.
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Logging verbosity; each repetition raises the level one notch
    /// (INFO, DEBUG, TRACE). Mutually exclusive with `--quiet`.
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Increase verbosity (-v, -vv, -vvv)",
        long_help = "Raise the logging level:
    (none)  warnings and errors only
    -v      progress messages (info)
    -vv     detailed diagnostics (debug)
    -vvv    everything (trace)"
    )]
    pub verbose: u8,

    /// Suppress everything except errors.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Suppress non-error output"
    )]
    pub quiet: bool,

    /// Disable ANSI colour codes. Also honoured via the `NO_COLOR`
    /// environment convention (<https://no-color.org>).
    #[arg(
        long = "no-color",
        global = true,
        env = "NO_COLOR",
        help = "Disable colored output"
    )]
    pub no_color: bool,

    /// Explicit configuration file; when absent the default location
    /// is probed and silently skipped if missing.
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        value_name = "FILE",
        help = "Configuration file path"
    )]
    pub config: Option<PathBuf>,

    /// Output rendering mode for human-facing messages.
    #[arg(
        long = "output-format",
        global = true,
        value_enum,
        default_value = "auto",
        help = "Output format"
    )]
    pub output_format: OutputFormat,
}

/// How the CLI should render its human-facing output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pick `Human` on a TTY, `Plain` otherwise.
    #[default]
    Auto,
    /// Human-readable with colors.
    Human,
    /// Plain text, no ANSI codes.
    Plain,
    /// JSON output.
    Json,
}
