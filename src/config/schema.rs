//! Configuration schema types for `jt.toml`
//!
//! Defines the structure and validation rules for editor configuration.

use crate::export::jt::{ExportMode, DEFAULT_DELAY_MS};
use crate::export::DEFAULT_FILE_STEM;
use crate::palette::PaletteColor;
use serde::{Deserialize, Serialize};

/// Canvas geometry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasConfig {
    /// Columns
    #[serde(default = "default_width")]
    pub width: usize,
    /// Rows
    #[serde(default = "default_height")]
    pub height: usize,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self { width: default_width(), height: default_height() }
    }
}

fn default_width() -> usize {
    64
}

fn default_height() -> usize {
    16
}

/// Starting brush colors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorsConfig {
    /// Left button color
    #[serde(default = "default_primary")]
    pub primary: PaletteColor,
    /// Right button color, also used for new frames
    #[serde(default)]
    pub secondary: PaletteColor,
}

impl Default for ColorsConfig {
    fn default() -> Self {
        Self { primary: default_primary(), secondary: PaletteColor::Black }
    }
}

fn default_primary() -> PaletteColor {
    PaletteColor::White
}

/// Animation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationConfig {
    /// Delay between frames in milliseconds
    #[serde(default = "default_delay")]
    pub delay_ms: u32,
    /// Initial export mode
    #[serde(default)]
    pub mode: ExportMode,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self { delay_ms: default_delay(), mode: ExportMode::default() }
    }
}

fn default_delay() -> u32 {
    DEFAULT_DELAY_MS
}

/// Export settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Pretty-print JSON output
    #[serde(default)]
    pub pretty: bool,
    /// File name used when none is given
    #[serde(default = "default_name")]
    pub default_name: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self { pretty: false, default_name: default_name() }
    }
}

fn default_name() -> String {
    DEFAULT_FILE_STEM.to_string()
}

/// Complete `jt.toml` configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JtConfig {
    #[serde(default)]
    pub canvas: CanvasConfig,
    #[serde(default)]
    pub colors: ColorsConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

/// A single configuration problem
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "canvas.width")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "jt.toml: '{}' {}", self.field, self.message)
    }
}

impl JtConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        if self.canvas.width == 0 {
            errors.push(ConfigValidationError {
                field: "canvas.width".to_string(),
                message: "must be a positive integer".to_string(),
            });
        }
        if self.canvas.height == 0 {
            errors.push(ConfigValidationError {
                field: "canvas.height".to_string(),
                message: "must be a positive integer".to_string(),
            });
        }
        if self.animation.delay_ms == 0 {
            errors.push(ConfigValidationError {
                field: "animation.delay_ms".to_string(),
                message: "must be a positive integer".to_string(),
            });
        }

        errors
    }
}
