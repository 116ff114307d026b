//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod export;
mod inspect;
mod palette;
mod preview;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::config::{load_config, merge_cli_overrides, CliOverrides, JtConfig};
use crate::export::jt::{decode, ExportMode};
use crate::export::ExportOptions;
use crate::palette::PaletteColor;
use crate::preview::MAX_SCALE;
use crate::script::{parse_script, run_script};
use crate::session::{EditorSession, Outcome};

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// jt - Edit LED matrix pixel art and export JT files
#[derive(Parser)]
#[command(name = "jt")]
#[command(about = "jt - Build LED matrix images and animations and export them as .jt files")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// How to set up the editing session before a command runs.
#[derive(Args, Debug, Clone)]
pub struct SessionArgs {
    /// Intent script to run (one JSON5 object per line)
    pub script: Option<PathBuf>,

    /// Start from the frames of an existing .jt file instead of a blank canvas
    #[arg(long)]
    pub from: Option<PathBuf>,

    /// Path to jt.toml (default: search upward from the working directory)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Canvas width in pixels (a file given with --from keeps its own size)
    #[arg(long, conflicts_with = "from")]
    pub width: Option<usize>,

    /// Canvas height in pixels (a file given with --from keeps its own size)
    #[arg(long, conflicts_with = "from")]
    pub height: Option<usize>,

    /// Export mode: static (current frame) or animation (all frames)
    #[arg(long, value_enum)]
    pub mode: Option<ExportMode>,

    /// Delay between animation frames in milliseconds
    #[arg(long)]
    pub delay: Option<u32>,

    /// Primary color (name, code 0-7, or hex)
    #[arg(long)]
    pub primary: Option<PaletteColor>,

    /// Secondary color, also used for blank frames
    #[arg(long)]
    pub secondary: Option<PaletteColor>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a script and write the result as a .jt file
    Export {
        #[command(flatten)]
        session: SessionArgs,

        /// Output file (".jt" is appended if missing; default from config or "image")
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,

        /// Print the packed channel planes of the current frame
        #[arg(long)]
        planes: bool,
    },
    /// Decode a .jt file and show its frames
    Inspect {
        /// The .jt file to read
        input: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run a script and save one frame as a PNG preview
    Preview {
        #[command(flatten)]
        session: SessionArgs,

        /// Output PNG file
        #[arg(short, long)]
        output: PathBuf,

        /// Scale factor (1-64)
        #[arg(long, default_value = "8", value_parser = clap::value_parser!(u8).range(1..=MAX_SCALE as i64))]
        scale: u8,

        /// Frame index to render (default: current frame)
        #[arg(long)]
        frame: Option<usize>,
    },
    /// List the palette colors
    Palette,
}

/// Build a session from config, an optional .jt file and an optional script.
///
/// Errors are returned as display strings for the command to print.
pub(crate) fn build_session(args: &SessionArgs, config: &JtConfig) -> Result<EditorSession, String> {
    let mut session = match &args.from {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .map_err(|e| format!("cannot read '{}': {}", path.display(), e))?;
            let (frames, descriptor) =
                decode(&json).map_err(|e| format!("'{}': {}", path.display(), e))?;
            let mut session = EditorSession::from_frames(frames, descriptor);
            session.set_colors(config.colors.primary, config.colors.secondary);
            if let Some(mode) = args.mode {
                session.set_mode(mode);
            }
            if let Some(delay) = args.delay {
                session.set_delay(delay, std::time::Instant::now()).map_err(|e| e.to_string())?;
            }
            session.set_export_options(ExportOptions { pretty: config.export.pretty });
            session
        }
        None => EditorSession::from_config(config).map_err(|e| e.to_string())?,
    };

    if let Some(script) = &args.script {
        let file = std::fs::File::open(script)
            .map_err(|e| format!("cannot open '{}': {}", script.display(), e))?;
        let steps = parse_script(file).map_err(|e| format!("{}: {}", script.display(), e))?;
        let outcomes =
            run_script(&mut session, steps).map_err(|e| format!("{}: {}", script.display(), e))?;
        for outcome in outcomes {
            if let Outcome::Exported(path) = outcome {
                println!("Saved {}", path.display());
            }
        }
    }

    Ok(session)
}

/// Load jt.toml and apply command-line overrides.
pub(crate) fn resolve_config(args: &SessionArgs, pretty: bool) -> Result<JtConfig, String> {
    let config = load_config(args.config.as_deref()).map_err(|e| e.to_string())?;
    let overrides = CliOverrides {
        width: args.width,
        height: args.height,
        mode: args.mode,
        delay_ms: args.delay,
        primary: args.primary,
        secondary: args.secondary,
        pretty: pretty.then_some(true),
    };
    merge_cli_overrides(config, &overrides).map_err(|e| e.to_string())
}

/// Parse arguments and run the selected command.
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Export { session, output, pretty, planes } => {
            export::run_export(&session, output.as_deref(), pretty, planes)
        }
        Commands::Inspect { input, json } => inspect::run_inspect(&input, json),
        Commands::Preview { session, output, scale, frame } => {
            preview::run_preview(&session, &output, scale, frame)
        }
        Commands::Palette => palette::run_palette(),
    }
}
