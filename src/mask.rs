//! Boolean overlay masks.
//!
//! A mask marks which cells an overlay should touch. Masks come from a
//! text rasterizer (see [`TextRasterizer`]) or from hand-written rows of
//! `#` and `.` characters.

use thiserror::Error;

/// Error type for mask construction
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MaskError {
    #[error("mask has no rows")]
    Empty,
    #[error("mask row {row} has width {found}, expected {expected}")]
    RaggedRow { row: usize, expected: usize, found: usize },
}

/// A `width × height` grid of on/off cells, indexed as `(row, col)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl Mask {
    /// Create an all-off mask.
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, cells: vec![false; width * height] }
    }

    /// Build a mask from text rows. `.` and space are off, anything else is on.
    ///
    /// ```
    /// use ledjt::mask::Mask;
    ///
    /// let mask = Mask::from_rows(&["#.", ".#"]).unwrap();
    /// assert!(mask.is_on(0, 0));
    /// assert!(!mask.is_on(0, 1));
    /// ```
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, MaskError> {
        let first = rows.first().ok_or(MaskError::Empty)?;
        let width = first.as_ref().chars().count();
        let mut cells = Vec::with_capacity(width * rows.len());

        for (row, line) in rows.iter().enumerate() {
            let line = line.as_ref();
            let found = line.chars().count();
            if found != width {
                return Err(MaskError::RaggedRow { row, expected: width, found });
            }
            cells.extend(line.chars().map(|c| c != '.' && c != ' '));
        }

        Ok(Self { width, height: rows.len(), cells })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether the cell is on. Cells outside the mask are off.
    pub fn is_on(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width && self.cells[row * self.width + col]
    }

    /// Set a cell. Out-of-range coordinates are ignored.
    pub fn set(&mut self, row: usize, col: usize, on: bool) {
        if row < self.height && col < self.width {
            self.cells[row * self.width + col] = on;
        }
    }

    /// Number of cells that are on.
    pub fn count_on(&self) -> usize {
        self.cells.iter().filter(|&&on| on).count()
    }
}

/// Renders a string into a mask the size of the canvas.
///
/// Font loading and glyph rendering live outside this crate; implementors
/// return a mask of exactly `width × height` cells.
pub trait TextRasterizer {
    fn rasterize(
        &self,
        text: &str,
        font_size: u32,
        letter_spacing: u32,
        width: usize,
        height: usize,
    ) -> Mask;
}
