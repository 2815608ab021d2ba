//! Output management and formatting.
//!
//! Every human-facing line goes through [`OutputManager`], which owns
//! the quiet/no-color/format decisions so command handlers never test
//! flags themselves. Machine output (payload JSON, SVG) bypasses this
//! entirely and goes straight to stdout.

use std::io::{self, IsTerminal};

use console::Term;
use owo_colors::OwoColorize;

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

/// Severity of a status line; decides glyph, color, and quiet behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Success,
    Error,
    Warning,
    Info,
}

impl Status {
    fn glyph(self) -> char {
        match self {
            Self::Success => '\u{2713}', // ✓
            Self::Error => '\u{2717}',   // ✗
            Self::Warning => '\u{26a0}', // ⚠
            Self::Info => '\u{2139}',    // ℹ
        }
    }

    /// Errors must stay visible even under `--quiet`.
    fn survives_quiet(self) -> bool {
        matches!(self, Self::Error)
    }
}

/// Manages CLI output based on configuration.
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    /// The config file can force `no_color`; flags win for everything
    /// else, and `Auto` resolves against whether stdout is a TTY.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        let resolved_format = match args.output_format {
            OutputFormat::Auto if io::stdout().is_terminal() => OutputFormat::Human,
            OutputFormat::Auto => OutputFormat::Plain,
            other => other,
        };

        Self {
            resolved_format,
            quiet: args.quiet,
            no_color: args.no_color || config.output.no_color,
            term: Term::stdout(),
        }
    }

    fn status(&self, status: Status, msg: &str) -> io::Result<()> {
        if self.quiet && !status.survives_quiet() {
            return Ok(());
        }
        let glyph = status.glyph();
        let line = if self.no_color {
            format!("{glyph} {msg}")
        } else {
            match status {
                Status::Success => format!("{} {}", glyph.green().bold(), msg.green()),
                Status::Error => format!("{} {}", glyph.red().bold(), msg.red()),
                Status::Warning => format!("{} {}", glyph.yellow().bold(), msg.yellow()),
                Status::Info => format!("{} {}", glyph.blue().bold(), msg.blue()),
            }
        };
        self.term.write_line(&line)
    }

    // ── Public write methods ───────────────────────────────────────────────

    /// Generic message; suppressed in quiet mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// `✓ <msg>`
    pub fn success(&self, msg: &str) -> io::Result<()> {
        self.status(Status::Success, msg)
    }

    /// `✗ <msg>` — never suppressed.
    pub fn error(&self, msg: &str) -> io::Result<()> {
        self.status(Status::Error, msg)
    }

    /// `⚠ <msg>`
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        self.status(Status::Warning, msg)
    }

    /// `ℹ <msg>`
    pub fn info(&self, msg: &str) -> io::Result<()> {
        self.status(Status::Info, msg)
    }

    /// Bold cyan section header.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.term.write_line(&line)
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn supports_color(&self) -> bool {
        !self.no_color
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// The resolved (non-Auto) output format.
    pub fn format(&self) -> OutputFormat {
        self.resolved_format
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
