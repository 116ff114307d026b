//! Preview command implementation

use std::path::Path;
use std::process::ExitCode;

use crate::export::{ExportError, Exporter, PngExporter};

use super::{build_session, resolve_config, SessionArgs, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Execute the preview command
pub fn run_preview(args: &SessionArgs, output: &Path, scale: u8, frame: Option<usize>) -> ExitCode {
    let config = match resolve_config(args, false) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let session = match build_session(args, &config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    match PngExporter::new(scale, frame).export(session.frames(), output) {
        Ok(path) => {
            println!("Saved {}", path.display());
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e @ ExportError::MissingFrame { .. }) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_INVALID_ARGS)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
