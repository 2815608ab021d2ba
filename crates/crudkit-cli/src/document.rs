//! Diagram-document I/O.
//!
//! The interchange document is the serde form of `Diagram` — the same
//! JSON a hosting page keeps for the live session. `-` reads stdin so
//! documents can be piped between commands.

use std::io::Read;
use std::path::Path;

use crudkit_core::domain::Diagram;
use tracing::debug;

use crate::error::{CliError, CliResult};

/// Load a diagram document from a file, or stdin for `-`.
pub fn load(path: &Path) -> CliResult<Diagram> {
    let text = if path == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|source| CliError::DocumentRead {
                path: path.to_path_buf(),
                source,
            })?;
        buffer
    } else {
        std::fs::read_to_string(path).map_err(|source| CliError::DocumentRead {
            path: path.to_path_buf(),
            source,
        })?
    };

    let diagram: Diagram =
        serde_json::from_str(&text).map_err(|source| CliError::DocumentParse {
            path: path.to_path_buf(),
            source,
        })?;
    debug!(classes = diagram.len(), "document loaded");
    Ok(diagram)
}

/// Write `content` to `target`, or stdout when no target is given.
pub fn write_output(target: Option<&Path>, content: &str) -> CliResult<()> {
    match target {
        Some(path) => {
            std::fs::write(path, content)?;
            Ok(())
        }
        None => {
            println!("{content}");
            Ok(())
        }
    }
}
