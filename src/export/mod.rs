//! Export formats for frame sequences.
//!
//! # Supported Formats
//!
//! - **JT**: JSON envelope with packed RGB bit planes, read by the display firmware
//! - **PNG**: scaled preview of a single frame
//!
//! # Example
//!
//! ```ignore
//! use ledjt::export::{Exporter, JtExporter, ExportOptions};
//! use ledjt::export::jt::ExportDescriptor;
//!
//! let exporter = JtExporter::new(ExportDescriptor::default(), ExportOptions::default());
//! let written = exporter.export(&frames, Path::new("banner"))?;
//! assert_eq!(written, Path::new("banner.jt"));
//! ```

pub mod jt;
pub mod png;

pub use jt::{ExportDescriptor, ExportMode, JtExporter};
pub use png::PngExporter;

use crate::frames::FrameSequence;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File stem used when no name is given.
pub const DEFAULT_FILE_STEM: &str = "image";

/// Common error type for export operations.
#[derive(Debug, Error)]
pub enum ExportError {
    /// IO error while writing the output file
    #[error("failed to write '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    /// Image encoding error
    #[error("image encoding error: {0}")]
    Image(#[from] image::ImageError),
    /// Preview image would be too large
    #[error(transparent)]
    Preview(#[from] crate::preview::PreviewError),
    /// Requested frame does not exist
    #[error("frame {index} does not exist (sequence has {len} frames)")]
    MissingFrame { index: usize, len: usize },
}

/// Options for export operations.
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    /// Pretty print output (with indentation)
    pub pretty: bool,
}

/// Trait for export format implementations.
pub trait Exporter {
    /// Export the frames to `output_path` and return the path actually written.
    ///
    /// The path is normalized with [`normalize_output_path`] first.
    fn export(&self, frames: &FrameSequence, output_path: &Path) -> Result<PathBuf, ExportError>;

    /// Get the format name for this exporter.
    fn format_name(&self) -> &'static str;

    /// Get the file extension for this format, without the dot.
    fn extension(&self) -> &'static str;
}

/// Apply the naming rules for output files.
///
/// An empty name becomes [`DEFAULT_FILE_STEM`], and `.{extension}` is
/// appended unless the name already ends with it.
///
/// ```
/// use ledjt::export::normalize_output_path;
/// use std::path::PathBuf;
///
/// assert_eq!(normalize_output_path("", "jt"), PathBuf::from("image.jt"));
/// assert_eq!(normalize_output_path("logo", "jt"), PathBuf::from("logo.jt"));
/// assert_eq!(normalize_output_path("logo.jt", "jt"), PathBuf::from("logo.jt"));
/// ```
pub fn normalize_output_path(name: &str, extension: &str) -> PathBuf {
    let name = name.trim();
    let name = if name.is_empty() { DEFAULT_FILE_STEM } else { name };
    let suffix = format!(".{}", extension);
    if name.ends_with(&suffix) {
        PathBuf::from(name)
    } else {
        PathBuf::from(format!("{}{}", name, suffix))
    }
}

/// Write `contents` to `path` atomically.
///
/// Data goes to a temporary file in the destination directory, which is
/// renamed over `path` only after a complete write. On failure the
/// temporary file is removed and any existing file at `path` is untouched.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), ExportError> {
    let io_err = |source| ExportError::Io { path: path.to_path_buf(), source };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    if !dir.exists() {
        std::fs::create_dir_all(dir).map_err(io_err)?;
    }

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(io_err)?;
    tmp.write_all(contents).map_err(io_err)?;
    tmp.as_file().sync_all().map_err(io_err)?;
    tmp.persist(path).map_err(|e| io_err(e.error))?;

    log::debug!("wrote {} bytes to {}", contents.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_export_options_default() {
        let options = ExportOptions::default();
        assert!(!options.pretty);
    }

    #[test]
    fn test_normalize_output_path() {
        assert_eq!(normalize_output_path("   ", "jt"), PathBuf::from("image.jt"));
        assert_eq!(normalize_output_path("out/anim", "jt"), PathBuf::from("out/anim.jt"));
        assert_eq!(normalize_output_path("frame.png", "jt"), PathBuf::from("frame.png.jt"));
        assert_eq!(normalize_output_path("frame", "png"), PathBuf::from("frame.png"));
    }

    #[test]
    fn test_write_atomic_creates_directories() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested/dir/out.jt");
        write_atomic(&path, b"[]").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
    }

    #[test]
    fn test_write_atomic_replaces_existing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out.jt");
        std::fs::write(&path, "old contents").unwrap();
        write_atomic(&path, b"new").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
        // No temp files left behind
        assert_eq!(std::fs::read_dir(temp.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_write_atomic_reports_path_on_failure() {
        let temp = TempDir::new().unwrap();
        // A regular file cannot act as a parent directory
        let blocker = temp.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();
        let path = blocker.join("out.jt");

        let err = write_atomic(&path, b"[]").unwrap_err();
        assert!(matches!(err, ExportError::Io { .. }));
        assert!(err.to_string().contains("out.jt"));
    }

    #[test]
    fn test_export_error_display() {
        let err = ExportError::MissingFrame { index: 3, len: 2 };
        assert!(err.to_string().contains("frame 3"));
    }
}
