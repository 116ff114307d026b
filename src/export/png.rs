//! PNG preview export.
//!
//! Writes one frame as a scaled PNG, for checking artwork without a display.

use crate::export::{normalize_output_path, write_atomic, ExportError, Exporter};
use crate::frames::FrameSequence;
use crate::preview::{encode_png, render_preview};
use std::path::{Path, PathBuf};

/// PNG preview exporter.
#[derive(Debug, Clone)]
pub struct PngExporter {
    /// Integer scale factor (1 = one image pixel per cell)
    pub scale: u8,
    /// Frame to render; `None` renders the current frame
    pub frame: Option<usize>,
}

impl Default for PngExporter {
    fn default() -> Self {
        Self { scale: 1, frame: None }
    }
}

impl PngExporter {
    pub fn new(scale: u8, frame: Option<usize>) -> Self {
        Self { scale, frame }
    }
}

impl Exporter for PngExporter {
    fn export(&self, frames: &FrameSequence, output_path: &Path) -> Result<PathBuf, ExportError> {
        let index = self.frame.unwrap_or(frames.current_index());
        let canvas = frames
            .get(index)
            .ok_or(ExportError::MissingFrame { index, len: frames.len() })?;

        let path = normalize_output_path(&output_path.to_string_lossy(), self.extension());
        let image = render_preview(canvas, self.scale)?;
        write_atomic(&path, &encode_png(&image)?)?;

        log::info!("saved preview of frame {} to {}", index + 1, path.display());
        Ok(path)
    }

    fn format_name(&self) -> &'static str {
        "png"
    }

    fn extension(&self) -> &'static str {
        "png"
    }
}
