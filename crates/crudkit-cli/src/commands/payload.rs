//! Implementation of the `crudkit payload` command.
//!
//! Mirrors the form-submission path: derive the module/package identity,
//! build the payload, and emit the JSON the hidden form field would
//! carry. An empty model emits nothing (the field would be cleared).

use tracing::{info, instrument};

use crudkit_core::application::PayloadBuilder;
use crudkit_core::error::CrudKitError;

use crate::cli::PayloadArgs;
use crate::config::AppConfig;
use crate::document;
use crate::error::{CliError, CliResult};
use crate::output::OutputManager;

#[instrument(skip_all, fields(file = %args.file.display()))]
pub fn execute(args: PayloadArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let diagram = document::load(&args.file)?;

    // CLI flags win over config file defaults.
    let artifact_id = args.artifact_id.or(config.defaults.artifact_id);
    let base_package = args.base_package.or(config.defaults.base_package);
    let builder = PayloadBuilder::from_form(artifact_id.as_deref(), base_package.as_deref());

    if diagram.is_empty() {
        output.info("The diagram is empty; no payload emitted")?;
        return Ok(());
    }

    let payload = builder
        .build(&diagram)
        .map_err(|e| CliError::Core(e.into()))?;
    info!(
        module = %payload.module_name,
        classes = payload.classes.len(),
        "payload built"
    );

    let json = if args.pretty {
        serde_json::to_string_pretty(&payload)
    } else {
        serde_json::to_string(&payload)
    }
    .map_err(|e| {
        CliError::Core(CrudKitError::Internal {
            message: format!("payload serialization failed: {e}"),
        })
    })?;

    document::write_output(args.output.as_deref(), &json)?;
    if let Some(path) = &args.output {
        output.success(&format!("Payload written to {}", path.display()))?;
    }
    Ok(())
}
