//! jt - Command-line tool for building LED matrix images and exporting `.jt` files

use std::process::ExitCode;

use ledjt::cli;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    cli::run()
}
