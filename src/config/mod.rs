//! Configuration module
//!
//! Provides types, discovery and loading for `jt.toml` editor configuration.

pub mod loader;
pub mod schema;

pub use loader::{load_config, merge_cli_overrides, CliOverrides, ConfigError};
pub use schema::*;
