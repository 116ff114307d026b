//! Configuration loading and discovery for `jt.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::JtConfig;
use crate::export::jt::ExportMode;
use crate::palette::PaletteColor;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the configuration file
pub const CONFIG_FILE_NAME: &str = "jt.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// TOML parsing error
    #[error("Failed to parse jt.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub width: Option<usize>,
    pub height: Option<usize>,
    pub mode: Option<ExportMode>,
    pub delay_ms: Option<u32>,
    pub primary: Option<PaletteColor>,
    pub secondary: Option<PaletteColor>,
    pub pretty: Option<bool>,
}

/// Find jt.toml by walking up from the current working directory.
pub fn find_config() -> Option<PathBuf> {
    env::current_dir().ok().and_then(find_config_from)
}

/// Find jt.toml by walking up from a specific directory.
///
/// This is the internal implementation that allows specifying the start directory,
/// useful for testing.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }

        // Move to parent directory
        if !current.pop() {
            // Reached root, no config found
            return None;
        }
    }
}

/// Load configuration from a jt.toml file.
///
/// If a path is provided, loads from that file. Otherwise, uses `find_config()`
/// to locate the config file. If no config file is found, returns the default
/// configuration.
///
/// # Example
/// ```ignore
/// // Load from discovered config
/// let config = load_config(None)?;
///
/// // Load from specific path
/// let config = load_config(Some(Path::new("panel/jt.toml")))?;
/// ```
pub fn load_config(path: Option<&Path>) -> Result<JtConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => load_config_file(&p),
        None => Ok(JtConfig::default()),
    }
}

/// Load configuration from a specific file path.
fn load_config_file(path: &Path) -> Result<JtConfig, ConfigError> {
    let contents = fs::read_to_string(path)
        .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
    let config: JtConfig = toml::from_str(&contents)?;
    log::debug!("loaded config from {}", path.display());

    validate(config)
}

fn validate(config: JtConfig) -> Result<JtConfig, ConfigError> {
    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }
    Ok(config)
}

/// Merge CLI overrides into a configuration and re-validate.
///
/// CLI arguments take precedence over config file values.
pub fn merge_cli_overrides(
    mut config: JtConfig,
    overrides: &CliOverrides,
) -> Result<JtConfig, ConfigError> {
    if let Some(width) = overrides.width {
        config.canvas.width = width;
    }
    if let Some(height) = overrides.height {
        config.canvas.height = height;
    }
    if let Some(mode) = overrides.mode {
        config.animation.mode = mode;
    }
    if let Some(delay_ms) = overrides.delay_ms {
        config.animation.delay_ms = delay_ms;
    }
    if let Some(primary) = overrides.primary {
        config.colors.primary = primary;
    }
    if let Some(secondary) = overrides.secondary {
        config.colors.secondary = secondary;
    }
    if let Some(pretty) = overrides.pretty {
        config.export.pretty = pretty;
    }

    validate(config)
}
