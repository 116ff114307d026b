//! JT transfer format.
//!
//! A JT file is a JSON array holding exactly one record. Static images and
//! animations use different record shapes:
//!
//! ```json
//! [{"dataType":1,"data":{"speed":255,"mode":1,"pixelHeight":16,"stayTime":3,
//!   "graffitiData":[...],"pixelWidth":64,"graffitiType":1}}]
//!
//! [{"dataType":0,"data":{"pixelWidth":64,"aniData":[...],"frameNum":3,
//!   "delays":250,"aniType":1,"pixelHeight":16}}]
//! ```
//!
//! `graffitiData` / `aniData` hold the packed payload described in
//! [`crate::codec`]. Field order matches what the firmware tooling emits.

use crate::codec::{self, PackedPlanes};
use crate::export::{normalize_output_path, write_atomic, ExportError, ExportOptions, Exporter};
use crate::frames::FrameSequence;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Scroll speed for static images.
pub const SPEED: u32 = 255;
/// Display mode for static images.
pub const STATIC_MODE: u32 = 1;
/// Seconds a static image stays on screen.
pub const STAY_TIME: u32 = 3;
pub const GRAFFITI_TYPE: u32 = 1;
pub const ANI_TYPE: u32 = 1;
/// Frame delay used when none is configured.
pub const DEFAULT_DELAY_MS: u32 = 250;

const DATA_TYPE_ANIMATION: u8 = 0;
const DATA_TYPE_STATIC: u8 = 1;

/// Whether to export the current frame or the whole sequence.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ExportMode {
    /// Current frame only
    #[default]
    Static,
    /// All frames in order
    Animation,
}

impl std::fmt::Display for ExportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportMode::Static => write!(f, "static"),
            ExportMode::Animation => write!(f, "animation"),
        }
    }
}

/// Playback metadata accompanying an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportDescriptor {
    pub mode: ExportMode,
    /// Delay between animation frames in milliseconds, always positive
    pub delay_millis: u32,
}

impl Default for ExportDescriptor {
    fn default() -> Self {
        Self { mode: ExportMode::Static, delay_millis: DEFAULT_DELAY_MS }
    }
}

/// Payload of a static record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticData {
    pub speed: u32,
    pub mode: u32,
    pub pixel_height: usize,
    pub stay_time: u32,
    pub graffiti_data: Vec<u8>,
    pub pixel_width: usize,
    pub graffiti_type: u32,
}

/// Payload of an animation record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationData {
    pub pixel_width: usize,
    pub ani_data: Vec<u8>,
    pub frame_num: usize,
    pub delays: u32,
    pub ani_type: u32,
    pub pixel_height: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticRecord {
    pub data_type: u8,
    pub data: StaticData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationRecord {
    pub data_type: u8,
    pub data: AnimationData,
}

/// One entry of a JT document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JtRecord {
    Static(StaticRecord),
    Animation(AnimationRecord),
}

/// Error type for reading JT documents.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid JT JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected exactly one record, found {0}")]
    RecordCount(usize),
    #[error("unexpected dataType {found} for {kind} record")]
    DataType { kind: &'static str, found: u8 },
    #[error("pixel dimensions must be positive, got {width}x{height}")]
    Dimensions { width: usize, height: usize },
    #[error("animation must have at least one frame")]
    NoFrames,
    #[error("{width}x{height} with {frames} frame(s) is too large to decode")]
    TooLarge { width: usize, height: usize, frames: usize },
    #[error("payload has {found} bytes, expected {expected}")]
    PayloadLength { expected: usize, found: usize },
}

/// Build the JT record for a frame sequence.
pub fn encode(frames: &FrameSequence, descriptor: &ExportDescriptor) -> JtRecord {
    let (width, height) = (frames.width(), frames.height());
    match descriptor.mode {
        ExportMode::Static => JtRecord::Static(StaticRecord {
            data_type: DATA_TYPE_STATIC,
            data: StaticData {
                speed: SPEED,
                mode: STATIC_MODE,
                pixel_height: height,
                stay_time: STAY_TIME,
                graffiti_data: codec::pack_current(frames).to_payload(),
                pixel_width: width,
                graffiti_type: GRAFFITI_TYPE,
            },
        }),
        ExportMode::Animation => JtRecord::Animation(AnimationRecord {
            data_type: DATA_TYPE_ANIMATION,
            data: AnimationData {
                pixel_width: width,
                ani_data: codec::pack_all(frames).to_payload(),
                frame_num: frames.len(),
                delays: descriptor.delay_millis,
                ani_type: ANI_TYPE,
                pixel_height: height,
            },
        }),
    }
}

/// Serialize a record as a single-element JT document.
pub fn to_json_string(record: &JtRecord, options: &ExportOptions) -> Result<String, ExportError> {
    let document = std::slice::from_ref(record);
    let json = if options.pretty {
        serde_json::to_string_pretty(document)?
    } else {
        serde_json::to_string(document)?
    };
    Ok(json)
}

/// Parse a JT document and rebuild its frames.
///
/// Static documents yield a single frame with the default descriptor;
/// animations carry their delay through.
pub fn decode(json: &str) -> Result<(FrameSequence, ExportDescriptor), DecodeError> {
    let mut records: Vec<JtRecord> = serde_json::from_str(json)?;
    if records.len() != 1 {
        return Err(DecodeError::RecordCount(records.len()));
    }

    let (width, height, frame_count, payload, descriptor) = match records.remove(0) {
        JtRecord::Static(record) => {
            if record.data_type != DATA_TYPE_STATIC {
                return Err(DecodeError::DataType { kind: "static", found: record.data_type });
            }
            let data = record.data;
            let descriptor = ExportDescriptor::default();
            (data.pixel_width, data.pixel_height, 1, data.graffiti_data, descriptor)
        }
        JtRecord::Animation(record) => {
            if record.data_type != DATA_TYPE_ANIMATION {
                return Err(DecodeError::DataType { kind: "animation", found: record.data_type });
            }
            let data = record.data;
            let descriptor = ExportDescriptor {
                mode: ExportMode::Animation,
                delay_millis: if data.delays == 0 { DEFAULT_DELAY_MS } else { data.delays },
            };
            (data.pixel_width, data.pixel_height, data.frame_num, data.ani_data, descriptor)
        }
    };

    if width == 0 || height == 0 {
        return Err(DecodeError::Dimensions { width, height });
    }
    if frame_count == 0 {
        return Err(DecodeError::NoFrames);
    }
    let expected = codec::payload_len(width, height, frame_count).ok_or(DecodeError::TooLarge {
        width,
        height,
        frames: frame_count,
    })?;
    if payload.len() != expected {
        return Err(DecodeError::PayloadLength { expected, found: payload.len() });
    }

    // Length is validated above, so the split and every frame slice are in range
    let planes = PackedPlanes::from_payload(&payload)
        .ok_or(DecodeError::PayloadLength { expected, found: payload.len() })?;
    let mut frames = Vec::with_capacity(frame_count);
    for index in 0..frame_count {
        let frame = planes
            .unpack_frame(width, height, index)
            .ok_or(DecodeError::PayloadLength { expected, found: payload.len() })?;
        frames.push(frame);
    }
    let sequence =
        FrameSequence::from_frames(frames).map_err(|_| DecodeError::Dimensions { width, height })?;

    Ok((sequence, descriptor))
}

/// Exporter for `.jt` files.
#[derive(Debug, Clone, Default)]
pub struct JtExporter {
    pub descriptor: ExportDescriptor,
    pub options: ExportOptions,
}

impl JtExporter {
    pub fn new(descriptor: ExportDescriptor, options: ExportOptions) -> Self {
        Self { descriptor, options }
    }

    /// Export to a JSON string instead of a file.
    pub fn export_to_string(&self, frames: &FrameSequence) -> Result<String, ExportError> {
        to_json_string(&encode(frames, &self.descriptor), &self.options)
    }
}

impl Exporter for JtExporter {
    fn export(&self, frames: &FrameSequence, output_path: &Path) -> Result<PathBuf, ExportError> {
        let path = normalize_output_path(&output_path.to_string_lossy(), self.extension());
        let json = self.export_to_string(frames)?;
        write_atomic(&path, json.as_bytes())?;

        log::info!(
            "exported {} {}x{} ({} frame(s)) to {}",
            self.descriptor.mode,
            frames.width(),
            frames.height(),
            match self.descriptor.mode {
                ExportMode::Static => 1,
                ExportMode::Animation => frames.len(),
            },
            path.display()
        );
        Ok(path)
    }

    fn format_name(&self) -> &'static str {
        "jt"
    }

    fn extension(&self) -> &'static str {
        "jt"
    }
}
