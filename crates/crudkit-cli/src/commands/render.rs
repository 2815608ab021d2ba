//! Implementation of the `crudkit render` command.

use tracing::instrument;

use crudkit_canvas::{CanvasRenderer, SvgBackend};

use crate::cli::RenderArgs;
use crate::document;
use crate::error::CliResult;
use crate::output::OutputManager;

#[instrument(skip_all, fields(file = %args.file.display()))]
pub fn execute(args: RenderArgs, output: OutputManager) -> CliResult<()> {
    let diagram = document::load(&args.file)?;

    let scene = CanvasRenderer::default().render(&diagram);
    let svg = SvgBackend::new().render(&scene);

    document::write_output(args.output.as_deref(), &svg)?;
    if let Some(path) = &args.output {
        output.success(&format!(
            "Rendered {} structure(s) to {}",
            diagram.len(),
            path.display()
        ))?;
    }
    Ok(())
}
