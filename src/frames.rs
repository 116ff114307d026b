//! Animation frame sequence with a current-frame cursor.

use crate::canvas::{Canvas, CanvasError};
use crate::palette::PaletteColor;
use thiserror::Error;

/// Error type for frame sequence operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameError {
    #[error("frame index {index} out of range (sequence has {len} frames)")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("frame is {found_width}x{found_height}, sequence is {width}x{height}")]
    DimensionMismatch { width: usize, height: usize, found_width: usize, found_height: usize },
    #[error(transparent)]
    Canvas(#[from] CanvasError),
}

/// An ordered, never-empty list of same-sized canvases.
///
/// The cursor always points at an existing frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameSequence {
    frames: Vec<Canvas>,
    current: usize,
}

impl FrameSequence {
    /// Start a sequence with one frame of `width × height` cells filled with `color`.
    pub fn new(width: usize, height: usize, color: PaletteColor) -> Result<Self, FrameError> {
        Ok(Self::from_canvas(Canvas::new(width, height, color)?))
    }

    /// Start a sequence from an existing canvas.
    pub fn from_canvas(canvas: Canvas) -> Self {
        Self { frames: vec![canvas], current: 0 }
    }

    /// Build a sequence from frames that all share the first frame's size.
    pub fn from_frames(frames: Vec<Canvas>) -> Result<Self, FrameError> {
        let mut iter = frames.into_iter();
        let first = iter.next().ok_or(CanvasError::EmptyDimensions { width: 0, height: 0 })?;
        let mut sequence = Self::from_canvas(first);
        for frame in iter {
            sequence.push(frame)?;
        }
        sequence.current = 0;
        Ok(sequence)
    }

    pub fn width(&self) -> usize {
        self.frames[0].width()
    }

    pub fn height(&self) -> usize {
        self.frames[0].height()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> &Canvas {
        &self.frames[self.current]
    }

    pub fn current_mut(&mut self) -> &mut Canvas {
        &mut self.frames[self.current]
    }

    pub fn frames(&self) -> &[Canvas] {
        &self.frames
    }

    pub fn get(&self, index: usize) -> Option<&Canvas> {
        self.frames.get(index)
    }

    /// Append a blank frame filled with `color` and move the cursor to it.
    pub fn add_frame(&mut self, color: PaletteColor) {
        let frame = self.current().blank_like(color);
        self.frames.push(frame);
        self.current = self.frames.len() - 1;
        log::debug!("added frame {} of {}", self.current + 1, self.frames.len());
    }

    /// Append a copy of the current frame and move the cursor to it.
    pub fn clone_current_frame(&mut self) {
        let frame = self.current().clone();
        self.frames.push(frame);
        self.current = self.frames.len() - 1;
        log::debug!("cloned frame into slot {}", self.current + 1);
    }

    /// Append a frame, moving the cursor to it. The frame must match the sequence size.
    pub fn push(&mut self, frame: Canvas) -> Result<(), FrameError> {
        if frame.width() != self.width() || frame.height() != self.height() {
            return Err(FrameError::DimensionMismatch {
                width: self.width(),
                height: self.height(),
                found_width: frame.width(),
                found_height: frame.height(),
            });
        }
        self.frames.push(frame);
        self.current = self.frames.len() - 1;
        Ok(())
    }

    /// Remove the current frame. The last remaining frame is never removed.
    ///
    /// Returns whether a frame was removed.
    pub fn delete_current_frame(&mut self) -> bool {
        if self.frames.len() <= 1 {
            return false;
        }
        self.frames.remove(self.current);
        self.current = self.current.min(self.frames.len() - 1);
        log::debug!("deleted frame, cursor now {} of {}", self.current + 1, self.frames.len());
        true
    }

    /// Move the cursor forward, wrapping to the first frame.
    pub fn next(&mut self) {
        self.current = (self.current + 1) % self.frames.len();
    }

    /// Move the cursor back, wrapping to the last frame.
    pub fn prev(&mut self) {
        self.current = (self.current + self.frames.len() - 1) % self.frames.len();
    }

    /// Point the cursor at `index`.
    pub fn set_current(&mut self, index: usize) -> Result<(), FrameError> {
        if index >= self.frames.len() {
            return Err(FrameError::IndexOutOfRange { index, len: self.frames.len() });
        }
        self.current = index;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use PaletteColor::*;

    fn sequence() -> FrameSequence {
        FrameSequence::new(4, 3, Black).unwrap()
    }

    #[test]
    fn test_new_has_one_frame() {
        let seq = sequence();
        assert_eq!(seq.len(), 1);
        assert_eq!(seq.current_index(), 0);
        assert_eq!((seq.width(), seq.height()), (4, 3));
    }

    #[test]
    fn test_add_frame_moves_cursor() {
        let mut seq = sequence();
        seq.add_frame(Red);
        assert_eq!(seq.len(), 2);
        assert_eq!(seq.current_index(), 1);
        assert_eq!(seq.current().get(0, 0), Some(Red));
        assert_eq!(seq.get(0).unwrap().get(0, 0), Some(Black));
    }

    #[test]
    fn test_delete_last_frame_is_noop() {
        let mut seq = sequence();
        assert!(!seq.delete_current_frame());
        assert_eq!(seq.len(), 1);
        assert_eq!(seq.current_index(), 0);
    }

    #[test]
    fn test_delete_clamps_cursor() {
        let mut seq = sequence();
        seq.add_frame(Red);
        seq.add_frame(Green);
        assert_eq!(seq.current_index(), 2);
        assert!(seq.delete_current_frame());
        assert_eq!(seq.len(), 2);
        assert_eq!(seq.current_index(), 1);
        assert_eq!(seq.current().get(0, 0), Some(Red));
    }

    #[test]
    fn test_delete_middle_keeps_index() {
        let mut seq = sequence();
        seq.add_frame(Red);
        seq.add_frame(Green);
        seq.set_current(1).unwrap();
        assert!(seq.delete_current_frame());
        assert_eq!(seq.current_index(), 1);
        assert_eq!(seq.current().get(0, 0), Some(Green));
    }

    #[test]
    fn test_clone_is_deep_copy() {
        let mut seq = sequence();
        seq.current_mut().paint(0, 0, Cyan).unwrap();
        seq.clone_current_frame();
        assert_eq!(seq.len(), 2);
        assert_eq!(seq.current_index(), 1);
        seq.current_mut().paint(0, 0, White).unwrap();
        assert_eq!(seq.get(0).unwrap().get(0, 0), Some(Cyan));
        assert_eq!(seq.get(1).unwrap().get(0, 0), Some(White));
    }

    #[test]
    fn test_next_prev_wrap() {
        let mut seq = sequence();
        seq.add_frame(Red);
        seq.add_frame(Green);
        seq.next();
        assert_eq!(seq.current_index(), 0);
        seq.prev();
        assert_eq!(seq.current_index(), 2);
        seq.prev();
        assert_eq!(seq.current_index(), 1);
    }

    #[test]
    fn test_next_on_single_frame_stays() {
        let mut seq = sequence();
        seq.next();
        seq.prev();
        assert_eq!(seq.current_index(), 0);
    }

    #[test]
    fn test_set_current_out_of_range() {
        let mut seq = sequence();
        assert_eq!(seq.set_current(1), Err(FrameError::IndexOutOfRange { index: 1, len: 1 }));
    }

    #[test]
    fn test_push_rejects_mismatched_frame() {
        let mut seq = sequence();
        let frame = Canvas::new(3, 3, Black).unwrap();
        assert!(matches!(seq.push(frame), Err(FrameError::DimensionMismatch { .. })));
        assert_eq!(seq.len(), 1);
    }

    #[test]
    fn test_from_frames() {
        let frames = vec![Canvas::new(2, 2, Red).unwrap(), Canvas::new(2, 2, Blue).unwrap()];
        let seq = FrameSequence::from_frames(frames).unwrap();
        assert_eq!(seq.len(), 2);
        assert_eq!(seq.current_index(), 0);
        assert!(FrameSequence::from_frames(vec![]).is_err());
    }
}
