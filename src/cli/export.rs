//! CLI dispatch for the `jt export` command.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use super::{build_session, resolve_config, SessionArgs, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Execute the export command.
pub fn run_export(
    args: &SessionArgs,
    output: Option<&Path>,
    pretty: bool,
    planes: bool,
) -> ExitCode {
    let config = match resolve_config(args, pretty) {
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

    let output = output.map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from(&config.export.default_name));

    match session.export_to(&output) {
        Ok(path) => {
            println!("Saved {}", path.display());
            if planes {
                println!("{}", session.diagnostics());
            }
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
