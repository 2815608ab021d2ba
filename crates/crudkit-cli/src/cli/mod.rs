//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names,
//! aliases, help text, and value enums. No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "crudkit",
    bin_name = "crudkit",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Visual CRUD class-designer engine, headless",
    long_about = "CrudKit validates class-diagram documents, builds the \
                  payload consumed by the code generator, and renders the \
                  canvas to SVG.",
    after_help = "EXAMPLES:\n\
        \x20 crudkit sample -o diagram.json\n\
        \x20 crudkit check diagram.json\n\
        \x20 crudkit payload diagram.json --artifact-id shop\n\
        \x20 crudkit render diagram.json -o diagram.svg",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the wizard validations over every class in a document.
    #[command(
        about = "Validate a diagram document",
        after_help = "EXAMPLES:\n\
            \x20 crudkit check diagram.json\n\
            \x20 crudkit check - < diagram.json"
    )]
    Check(CheckArgs),

    /// Build the generator payload from a document.
    #[command(
        visible_alias = "p",
        about = "Build the generator payload",
        after_help = "EXAMPLES:\n\
            \x20 crudkit payload diagram.json\n\
            \x20 crudkit payload diagram.json --artifact-id shop --base-package com.acme.shop\n\
            \x20 crudkit payload diagram.json -o payload.json"
    )]
    Payload(PayloadArgs),

    /// Render the canvas scene to SVG.
    #[command(
        about = "Render a document to SVG",
        after_help = "EXAMPLES:\n\
            \x20 crudkit render diagram.json -o diagram.svg"
    )]
    Render(RenderArgs),

    /// Emit a sample diagram document built through the real designer.
    #[command(
        about = "Emit a sample diagram document",
        after_help = "EXAMPLES:\n\
            \x20 crudkit sample -o diagram.json"
    )]
    Sample(SampleArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 crudkit completions bash > ~/.local/share/bash-completion/completions/crudkit\n\
            \x20 crudkit completions zsh  > ~/.zfunc/_crudkit"
    )]
    Completions(CompletionsArgs),
}

// ── check ─────────────────────────────────────────────────────────────────────

/// Arguments for `crudkit check`.
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Diagram document to validate (`-` reads stdin).
    #[arg(value_name = "FILE", help = "Diagram document (JSON), '-' for stdin")]
    pub file: PathBuf,
}

// ── payload ───────────────────────────────────────────────────────────────────

/// Arguments for `crudkit payload`.
#[derive(Debug, Args)]
pub struct PayloadArgs {
    /// Diagram document to serialize (`-` reads stdin).
    #[arg(value_name = "FILE", help = "Diagram document (JSON), '-' for stdin")]
    pub file: PathBuf,

    /// Artifact id the module name is derived from.
    #[arg(
        short = 'a',
        long = "artifact-id",
        value_name = "ID",
        help = "Artifact id (module becomes '<id>-crud')"
    )]
    pub artifact_id: Option<String>,

    /// Base package for the generated code.
    #[arg(
        short = 'p',
        long = "base-package",
        value_name = "PACKAGE",
        help = "Base package (e.g. com.acme.shop)"
    )]
    pub base_package: Option<String>,

    /// Write the payload here instead of stdout.
    #[arg(short = 'o', long = "output", value_name = "FILE", help = "Output file")]
    pub output: Option<PathBuf>,

    /// Pretty-print the JSON.
    #[arg(long = "pretty", help = "Pretty-print the payload JSON")]
    pub pretty: bool,
}

// ── render ────────────────────────────────────────────────────────────────────

/// Arguments for `crudkit render`.
#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Diagram document to render (`-` reads stdin).
    #[arg(value_name = "FILE", help = "Diagram document (JSON), '-' for stdin")]
    pub file: PathBuf,

    /// Write the SVG here instead of stdout.
    #[arg(short = 'o', long = "output", value_name = "FILE", help = "Output file")]
    pub output: Option<PathBuf>,
}

// ── sample ────────────────────────────────────────────────────────────────────

/// Arguments for `crudkit sample`.
#[derive(Debug, Args)]
pub struct SampleArgs {
    /// Write the document here instead of stdout.
    #[arg(short = 'o', long = "output", value_name = "FILE", help = "Output file")]
    pub output: Option<PathBuf>,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `crudkit completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, Parser};

    #[test]
    fn verify_cli_structure() {
        // clap's internal consistency check — catches conflicts,
        // missing values, etc.
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_payload_command() {
        let cli = Cli::parse_from([
            "crudkit",
            "payload",
            "diagram.json",
            "--artifact-id",
            "shop",
            "--base-package",
            "com.acme.shop",
        ]);
        let Commands::Payload(args) = cli.command else {
            panic!("expected Payload command");
        };
        assert_eq!(args.artifact_id.as_deref(), Some("shop"));
        assert_eq!(args.base_package.as_deref(), Some("com.acme.shop"));
        assert!(!args.pretty);
    }

    #[test]
    fn payload_alias() {
        let cli = Cli::parse_from(["crudkit", "p", "diagram.json"]);
        assert!(matches!(cli.command, Commands::Payload(_)));
    }

    #[test]
    fn stdin_sentinel_parses_as_path() {
        let cli = Cli::parse_from(["crudkit", "check", "-"]);
        let Commands::Check(args) = cli.command else {
            panic!("expected Check command");
        };
        assert_eq!(args.file, PathBuf::from("-"));
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["crudkit", "--quiet", "--verbose", "sample"]);
        assert!(result.is_err());
    }
}
