//! Implementation of the `crudkit check` command.
//!
//! Runs the wizard validations (the same rules that gate the Next
//! button) over every class in the document and reports pass/fail per
//! category.

use tracing::instrument;

use crudkit_core::domain::WizardValidator;

use crate::cli::CheckArgs;
use crate::document;
use crate::error::{CliError, CliResult};
use crate::output::OutputManager;

#[instrument(skip_all, fields(file = %args.file.display()))]
pub fn execute(args: CheckArgs, output: OutputManager) -> CliResult<()> {
    let diagram = document::load(&args.file)?;

    if diagram.is_empty() {
        output.info("The diagram is empty; nothing to check")?;
        return Ok(());
    }

    output.header(&format!("Checking {} structure(s)...", diagram.len()))?;

    let mut failed = 0;
    for node in diagram.nodes() {
        let display = if node.name.trim().is_empty() {
            "(unnamed)"
        } else {
            node.name.as_str()
        };
        let report = WizardValidator::review(&diagram, node);

        if report.is_pass() {
            output.success(&format!("{display} ({})", node.structure_type.badge()))?;
            continue;
        }

        failed += 1;
        output.error(&format!("{display} ({})", node.structure_type.badge()))?;
        for (category, issues) in [
            ("basic", &report.basic),
            ("fields", &report.fields),
            ("methods", &report.methods),
        ] {
            for issue in issues {
                output.print(&format!("    [{category}] {issue}"))?;
            }
        }
    }

    if failed > 0 {
        return Err(CliError::ValidationFailed {
            failed,
            total: diagram.len(),
        });
    }

    output.success("All structures are generator-ready")?;
    Ok(())
}
