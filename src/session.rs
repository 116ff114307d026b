//! Editor session: the single owner of all editing state.
//!
//! A front end translates user input into [`Intent`]s and applies them to
//! an [`EditorSession`]. After each intent it can read a [`Snapshot`] for
//! redraw and the packed planes of the current frame for inspection.

use crate::canvas::{CanvasError, ShiftDirection};
use crate::codec::{self, PackedPlanes};
use crate::config::JtConfig;
use crate::export::jt::{ExportDescriptor, ExportMode, DEFAULT_DELAY_MS};
use crate::export::{ExportError, ExportOptions, Exporter, JtExporter};
use crate::frames::{FrameError, FrameSequence};
use crate::mask::{Mask, MaskError, TextRasterizer};
use crate::palette::PaletteColor;
use crate::playback::Playback;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use thiserror::Error;

/// Error type for rejected intents. The session is unchanged when one is returned.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Canvas(#[from] CanvasError),
    #[error(transparent)]
    Frame(#[from] FrameError),
    #[error(transparent)]
    Mask(#[from] MaskError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error("frame delay must be a positive number of milliseconds")]
    InvalidDelay,
}

/// A discrete editing request from the front end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Intent {
    /// Choose the primary (left button) color
    SelectColor { color: PaletteColor },
    /// Choose the secondary (right button) color
    SelectSecondary { color: PaletteColor },
    /// Paint one pixel of the current frame
    Paint {
        row: usize,
        col: usize,
        #[serde(default)]
        secondary: bool,
    },
    /// Fill the current frame; a given color also becomes the primary color
    FillAll {
        #[serde(default)]
        color: Option<PaletteColor>,
    },
    /// Fill the current frame with the secondary color
    FillSecondary,
    /// Black cells take the color, everything else turns black
    Swap {
        #[serde(default)]
        color: Option<PaletteColor>,
    },
    Shift { direction: ShiftDirection },
    AddFrame,
    DeleteFrame,
    CloneFrame,
    NextFrame,
    PrevFrame,
    SetCursor { index: usize },
    SetMode { mode: ExportMode },
    SetDelay { ms: u32 },
    /// Overlay rows of `#`/`.` onto the current frame
    DrawMask {
        rows: Vec<String>,
        #[serde(default)]
        color: Option<PaletteColor>,
    },
    TogglePlayback,
    /// Write a `.jt` file; an empty path uses the default name
    Export {
        #[serde(default)]
        path: String,
    },
}

/// What applying an intent did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// State changed; redraw
    Changed,
    /// Valid intent with nothing to do
    Unchanged,
    /// Playback is now running (`true`) or stopped
    Playback(bool),
    /// A file was written
    Exported(PathBuf),
}

/// Read-only view for redraw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub width: usize,
    pub height: usize,
    pub frame_count: usize,
    pub current_index: usize,
    pub grid: Vec<Vec<PaletteColor>>,
}

/// All editing state for one document.
#[derive(Debug, Clone)]
pub struct EditorSession {
    frames: FrameSequence,
    primary: PaletteColor,
    secondary: PaletteColor,
    mode: ExportMode,
    delay_millis: u32,
    playback: Playback,
    export_options: ExportOptions,
}

impl EditorSession {
    /// New session with one frame filled with the secondary color (black).
    pub fn new(width: usize, height: usize) -> Result<Self, SessionError> {
        let frames = FrameSequence::new(width, height, PaletteColor::Black)?;
        Ok(Self::from_frames(frames, ExportDescriptor::default()))
    }

    /// New session using canvas size, colors and delay from a config.
    pub fn from_config(config: &JtConfig) -> Result<Self, SessionError> {
        let secondary = config.colors.secondary;
        let frames = FrameSequence::new(config.canvas.width, config.canvas.height, secondary)?;
        let descriptor = ExportDescriptor { mode: config.animation.mode, delay_millis: 0 };
        let mut session = Self::from_frames(frames, descriptor);
        session.set_colors(config.colors.primary, secondary);
        session.set_delay(config.animation.delay_ms, Instant::now())?;
        session.export_options = ExportOptions { pretty: config.export.pretty };
        Ok(session)
    }

    /// Wrap existing frames, e.g. ones decoded from a `.jt` file.
    pub fn from_frames(frames: FrameSequence, descriptor: ExportDescriptor) -> Self {
        let delay_millis =
            if descriptor.delay_millis == 0 { DEFAULT_DELAY_MS } else { descriptor.delay_millis };
        Self {
            frames,
            primary: PaletteColor::White,
            secondary: PaletteColor::Black,
            mode: descriptor.mode,
            delay_millis,
            playback: Playback::new(Duration::from_millis(delay_millis.into())),
            export_options: ExportOptions::default(),
        }
    }

    pub fn frames(&self) -> &FrameSequence {
        &self.frames
    }

    pub fn primary(&self) -> PaletteColor {
        self.primary
    }

    pub fn secondary(&self) -> PaletteColor {
        self.secondary
    }

    pub fn mode(&self) -> ExportMode {
        self.mode
    }

    pub fn delay_millis(&self) -> u32 {
        self.delay_millis
    }

    pub fn is_playing(&self) -> bool {
        self.playback.is_playing()
    }

    /// Set the primary and secondary colors.
    pub fn set_colors(&mut self, primary: PaletteColor, secondary: PaletteColor) {
        self.primary = primary;
        self.secondary = secondary;
    }

    pub fn set_export_options(&mut self, options: ExportOptions) {
        self.export_options = options;
    }

    /// Metadata for exporting the session as it stands.
    pub fn descriptor(&self) -> ExportDescriptor {
        ExportDescriptor { mode: self.mode, delay_millis: self.delay_millis }
    }

    /// Apply an intent at the current time.
    pub fn apply(&mut self, intent: Intent) -> Result<Outcome, SessionError> {
        self.apply_at(intent, Instant::now())
    }

    /// Apply an intent; `now` anchors any playback restart.
    pub fn apply_at(&mut self, intent: Intent, now: Instant) -> Result<Outcome, SessionError> {
        log::debug!("apply {:?}", intent);
        let outcome = match intent {
            Intent::SelectColor { color } => {
                self.primary = color;
                Outcome::Changed
            }
            Intent::SelectSecondary { color } => {
                self.secondary = color;
                Outcome::Changed
            }
            Intent::Paint { row, col, secondary } => {
                let color = if secondary { self.secondary } else { self.primary };
                self.frames.current_mut().paint(row, col, color)?;
                Outcome::Changed
            }
            Intent::FillAll { color } => {
                if let Some(color) = color {
                    self.primary = color;
                }
                self.frames.current_mut().fill(self.primary);
                Outcome::Changed
            }
            Intent::FillSecondary => {
                self.frames.current_mut().fill(self.secondary);
                Outcome::Changed
            }
            Intent::Swap { color } => {
                let color = color.unwrap_or(self.primary);
                self.frames.current_mut().swap_black_and(color);
                Outcome::Changed
            }
            Intent::Shift { direction } => {
                self.frames.current_mut().shift(direction);
                Outcome::Changed
            }
            Intent::AddFrame => {
                self.frames.add_frame(self.secondary);
                Outcome::Changed
            }
            Intent::DeleteFrame => {
                if self.frames.delete_current_frame() {
                    Outcome::Changed
                } else {
                    Outcome::Unchanged
                }
            }
            Intent::CloneFrame => {
                self.frames.clone_current_frame();
                Outcome::Changed
            }
            Intent::NextFrame => self.step(FrameSequence::next),
            Intent::PrevFrame => self.step(FrameSequence::prev),
            Intent::SetCursor { index } => {
                self.frames.set_current(index)?;
                Outcome::Changed
            }
            Intent::SetMode { mode } => {
                self.set_mode(mode);
                Outcome::Changed
            }
            Intent::SetDelay { ms } => {
                self.set_delay(ms, now)?;
                Outcome::Changed
            }
            Intent::DrawMask { rows, color } => {
                let mask = Mask::from_rows(rows.as_slice())?;
                self.draw_mask(&mask, color);
                Outcome::Changed
            }
            Intent::TogglePlayback => Outcome::Playback(self.playback.toggle(now)),
            Intent::Export { path } => Outcome::Exported(self.export_to(Path::new(&path))?),
        };
        Ok(outcome)
    }

    /// Switch export mode. Any running playback stops.
    pub fn set_mode(&mut self, mode: ExportMode) {
        self.playback.stop();
        self.mode = mode;
    }

    /// Change the frame delay, restarting playback if it is running.
    pub fn set_delay(&mut self, ms: u32, now: Instant) -> Result<(), SessionError> {
        if ms == 0 {
            return Err(SessionError::InvalidDelay);
        }
        self.delay_millis = ms;
        self.playback.set_interval(Duration::from_millis(ms.into()), now);
        Ok(())
    }

    /// Overlay a mask onto the current frame. Returns the number of cells written.
    pub fn draw_mask(&mut self, mask: &Mask, color: Option<PaletteColor>) -> usize {
        let color = color.unwrap_or(self.primary);
        let written = self.frames.current_mut().apply_mask(mask, color);
        log::debug!("mask wrote {} pixels in {}", written, color);
        written
    }

    /// Rasterize text to a canvas-sized mask and overlay it onto the current frame.
    pub fn draw_text<R: TextRasterizer + ?Sized>(
        &mut self,
        rasterizer: &R,
        text: &str,
        font_size: u32,
        letter_spacing: u32,
        color: Option<PaletteColor>,
    ) -> usize {
        let mask = rasterizer.rasterize(
            text,
            font_size,
            letter_spacing,
            self.frames.width(),
            self.frames.height(),
        );
        self.draw_mask(&mask, color)
    }

    /// Advance playback to `now`. Returns how many frames the cursor moved.
    ///
    /// Ticks only move the cursor in animation mode with more than one frame.
    pub fn tick(&mut self, now: Instant) -> u32 {
        let ticks = self.playback.poll(now);
        if ticks == 0 || self.mode != ExportMode::Animation || self.frames.len() <= 1 {
            return 0;
        }
        for _ in 0..ticks {
            self.frames.next();
        }
        ticks
    }

    /// Write the session as a `.jt` file. Returns the path written.
    pub fn export_to(&self, path: &Path) -> Result<PathBuf, ExportError> {
        JtExporter::new(self.descriptor(), self.export_options.clone()).export(&self.frames, path)
    }

    /// Redraw view of the current frame.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            width: self.frames.width(),
            height: self.frames.height(),
            frame_count: self.frames.len(),
            current_index: self.frames.current_index(),
            grid: self.frames.current().to_rows(),
        }
    }

    /// Packed channel planes of the current frame.
    pub fn diagnostics(&self) -> PackedPlanes {
        codec::pack_current(&self.frames)
    }

    fn step(&mut self, advance: fn(&mut FrameSequence)) -> Outcome {
        if self.frames.len() <= 1 {
            return Outcome::Unchanged;
        }
        advance(&mut self.frames);
        Outcome::Changed
    }
}
