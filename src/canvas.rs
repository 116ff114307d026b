//! Single-frame pixel grid.

use crate::mask::Mask;
use crate::palette::PaletteColor;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for canvas construction and painting
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CanvasError {
    #[error("canvas dimensions must be positive, got {width}x{height}")]
    EmptyDimensions { width: usize, height: usize },
    #[error("canvas of {width}x{height} exceeds {} pixels", MAX_CELLS)]
    TooLarge { width: usize, height: usize },
    #[error("pixel ({row}, {col}) is outside the {width}x{height} canvas")]
    OutOfBounds { row: usize, col: usize, width: usize, height: usize },
}

/// Largest number of cells a canvas may hold.
pub const MAX_CELLS: usize = 1 << 24;

/// Direction for a one-cell circular shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftDirection {
    Up,
    Down,
    Left,
    Right,
}

/// A `height × width` grid of palette colors, stored row-major.
///
/// Dimensions are fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: usize,
    height: usize,
    cells: Vec<PaletteColor>,
}

impl Canvas {
    /// Create a canvas filled with one color.
    pub fn new(width: usize, height: usize, color: PaletteColor) -> Result<Self, CanvasError> {
        if width == 0 || height == 0 {
            return Err(CanvasError::EmptyDimensions { width, height });
        }
        let cells = width
            .checked_mul(height)
            .filter(|&n| n <= MAX_CELLS)
            .ok_or(CanvasError::TooLarge { width, height })?;
        Ok(Self { width, height, cells: vec![color; cells] })
    }

    /// Create a canvas from rows of colors. All rows must share a width.
    pub fn from_rows(rows: Vec<Vec<PaletteColor>>) -> Result<Self, CanvasError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if width == 0 || rows.iter().any(|r| r.len() != width) {
            return Err(CanvasError::EmptyDimensions { width, height });
        }
        Ok(Self { width, height, cells: rows.into_iter().flatten().collect() })
    }

    /// A new canvas with the same dimensions, filled with `color`.
    pub fn blank_like(&self, color: PaletteColor) -> Self {
        Self { width: self.width, height: self.height, cells: vec![color; self.cells.len()] }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Color at `(row, col)`, or `None` outside the grid.
    pub fn get(&self, row: usize, col: usize) -> Option<PaletteColor> {
        self.index(row, col).map(|i| self.cells[i])
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[PaletteColor]> + '_ {
        self.cells.chunks(self.width)
    }

    /// Rows as owned vectors, for snapshots.
    pub fn to_rows(&self) -> Vec<Vec<PaletteColor>> {
        self.rows().map(<[PaletteColor]>::to_vec).collect()
    }

    /// Set one cell.
    pub fn paint(&mut self, row: usize, col: usize, color: PaletteColor) -> Result<(), CanvasError> {
        let i = self.index(row, col).ok_or(CanvasError::OutOfBounds {
            row,
            col,
            width: self.width,
            height: self.height,
        })?;
        self.cells[i] = color;
        Ok(())
    }

    /// Replace every cell with `color`.
    pub fn fill(&mut self, color: PaletteColor) {
        self.cells.fill(color);
    }

    /// Black cells become `color`, every other cell becomes black.
    ///
    /// Each cell is decided from its own value before the swap, so with
    /// `color == Black` the whole grid ends up black.
    pub fn swap_black_and(&mut self, color: PaletteColor) {
        for cell in &mut self.cells {
            *cell = if *cell == PaletteColor::Black { color } else { PaletteColor::Black };
        }
    }

    /// Rotate the grid by one cell. No pixel is created or lost.
    pub fn shift(&mut self, direction: ShiftDirection) {
        match direction {
            ShiftDirection::Up => self.cells.rotate_left(self.width),
            ShiftDirection::Down => self.cells.rotate_right(self.width),
            ShiftDirection::Left => self.cells.chunks_mut(self.width).for_each(|r| r.rotate_left(1)),
            ShiftDirection::Right => {
                self.cells.chunks_mut(self.width).for_each(|r| r.rotate_right(1))
            }
        }
    }

    pub fn shift_up(&mut self) {
        self.shift(ShiftDirection::Up);
    }

    pub fn shift_down(&mut self) {
        self.shift(ShiftDirection::Down);
    }

    pub fn shift_left(&mut self) {
        self.shift(ShiftDirection::Left);
    }

    pub fn shift_right(&mut self) {
        self.shift(ShiftDirection::Right);
    }

    /// Paint `color` on every cell where the mask is on; other cells are kept.
    ///
    /// Only the overlapping area of mask and canvas is considered. Returns
    /// the number of cells written.
    pub fn apply_mask(&mut self, mask: &Mask, color: PaletteColor) -> usize {
        let mut written = 0;
        for row in 0..self.height.min(mask.height()) {
            for col in 0..self.width.min(mask.width()) {
                if mask.is_on(row, col) {
                    self.cells[row * self.width + col] = color;
                    written += 1;
                }
            }
        }
        written
    }

    fn index(&self, row: usize, col: usize) -> Option<usize> {
        if row < self.height && col < self.width {
            Some(row * self.width + col)
        } else {
            None
        }
    }
}
