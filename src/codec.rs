//! Bit-plane packing for the LED firmware.
//!
//! Each frame is walked column by column, top to bottom, eight rows at a
//! time. Every group of up to eight rows yields one byte per channel: row
//! `r0 + b` sets bit `7 - b` when the pixel lights that channel. A short
//! final group is zero-padded in its low bits.
//!
//! Bytes for all frames accumulate per channel, and the payload is the red
//! plane followed by the green plane, then the blue plane.

use crate::canvas::Canvas;
use crate::frames::FrameSequence;
use crate::palette::{Channel, PaletteColor};
use std::fmt;

/// Number of bytes one channel needs for a single frame.
pub fn bytes_per_frame(width: usize, height: usize) -> usize {
    width * height.div_ceil(8)
}

/// Total payload length for `frames` frames of `width × height`.
///
/// Returns `None` when the length does not fit in `usize`.
pub fn payload_len(width: usize, height: usize, frames: usize) -> Option<usize> {
    width.checked_mul(height.div_ceil(8))?.checked_mul(3)?.checked_mul(frames)
}

/// Packed red, green and blue planes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackedPlanes {
    pub red: Vec<u8>,
    pub green: Vec<u8>,
    pub blue: Vec<u8>,
}

impl PackedPlanes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pack a sequence of frames in order.
    pub fn from_frames<'a, I>(frames: I) -> Self
    where
        I: IntoIterator<Item = &'a Canvas>,
    {
        let mut planes = Self::new();
        for frame in frames {
            planes.push_frame(frame);
        }
        planes
    }

    /// Append one frame's bytes to each plane.
    pub fn push_frame(&mut self, canvas: &Canvas) {
        let (width, height) = (canvas.width(), canvas.height());
        let extra = bytes_per_frame(width, height);
        self.red.reserve(extra);
        self.green.reserve(extra);
        self.blue.reserve(extra);

        for col in 0..width {
            for r0 in (0..height).step_by(8) {
                let mut red = 0u8;
                let mut green = 0u8;
                let mut blue = 0u8;

                for bit in 0..8 {
                    let row = r0 + bit;
                    if row >= height {
                        break;
                    }
                    let color = canvas.get(row, col).unwrap_or_default();
                    let mask = 1 << (7 - bit);
                    if color.has_channel(Channel::Red) {
                        red |= mask;
                    }
                    if color.has_channel(Channel::Green) {
                        green |= mask;
                    }
                    if color.has_channel(Channel::Blue) {
                        blue |= mask;
                    }
                }

                self.red.push(red);
                self.green.push(green);
                self.blue.push(blue);
            }
        }
    }

    pub fn plane(&self, channel: Channel) -> &[u8] {
        match channel {
            Channel::Red => &self.red,
            Channel::Green => &self.green,
            Channel::Blue => &self.blue,
        }
    }

    /// Concatenate red, green and blue into the payload byte order.
    pub fn to_payload(&self) -> Vec<u8> {
        let mut payload = Vec::with_capacity(self.red.len() * 3);
        payload.extend_from_slice(&self.red);
        payload.extend_from_slice(&self.green);
        payload.extend_from_slice(&self.blue);
        payload
    }

    /// Split a payload back into its three planes.
    ///
    /// Returns `None` if the payload length is not a multiple of three.
    pub fn from_payload(payload: &[u8]) -> Option<Self> {
        if payload.len() % 3 != 0 {
            return None;
        }
        let n = payload.len() / 3;
        Some(Self {
            red: payload[..n].to_vec(),
            green: payload[n..2 * n].to_vec(),
            blue: payload[2 * n..].to_vec(),
        })
    }

    /// Rebuild frame `index` of a `width × height` sequence from the planes.
    ///
    /// Returns `None` if the planes are too short to hold that frame.
    pub fn unpack_frame(&self, width: usize, height: usize, index: usize) -> Option<Canvas> {
        let per_frame = bytes_per_frame(width, height);
        let start = index * per_frame;
        let end = start + per_frame;
        if end > self.red.len() || end > self.green.len() || end > self.blue.len() {
            return None;
        }

        let groups = height.div_ceil(8);
        let mut rows = vec![vec![PaletteColor::Black; width]; height];
        for col in 0..width {
            for group in 0..groups {
                let offset = start + col * groups + group;
                let (red, green, blue) = (self.red[offset], self.green[offset], self.blue[offset]);
                for bit in 0..8 {
                    let row = group * 8 + bit;
                    if row >= height {
                        break;
                    }
                    let mask = 1 << (7 - bit);
                    rows[row][col] = PaletteColor::from_channels(
                        red & mask != 0,
                        green & mask != 0,
                        blue & mask != 0,
                    );
                }
            }
        }
        Canvas::from_rows(rows).ok()
    }
}

impl fmt::Display for PackedPlanes {
    /// Decimal listing, one channel per paragraph.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, channel) in Channel::ALL.into_iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
                writeln!(f)?;
            }
            let values: Vec<String> = self.plane(channel).iter().map(u8::to_string).collect();
            write!(f, "{}: [{}]", channel.label(), values.join(", "))?;
        }
        Ok(())
    }
}

/// Pack only the current frame of a sequence.
pub fn pack_current(frames: &FrameSequence) -> PackedPlanes {
    PackedPlanes::from_frames(std::iter::once(frames.current()))
}

/// Pack every frame of a sequence, in order.
pub fn pack_all(frames: &FrameSequence) -> PackedPlanes {
    PackedPlanes::from_frames(frames.frames())
}

#[cfg(test)]
mod tests {
    use super::*;
    use PaletteColor::*;

    #[test]
    fn test_all_white_two_by_eight() {
        let canvas = Canvas::new(2, 8, White).unwrap();
        let planes = PackedPlanes::from_frames([&canvas]);
        assert_eq!(planes.red, vec![0xFF, 0xFF]);
        assert_eq!(planes.green, vec![0xFF, 0xFF]);
        assert_eq!(planes.blue, vec![0xFF, 0xFF]);
        assert_eq!(planes.to_payload(), vec![255; 6]);
    }

    #[test]
    fn test_top_left_black_clears_high_bit() {
        let mut canvas = Canvas::new(2, 8, White).unwrap();
        canvas.paint(0, 0, Black).unwrap();
        let planes = PackedPlanes::from_frames([&canvas]);
        assert_eq!(planes.red, vec![0x7F, 0xFF]);
        assert_eq!(planes.green, vec![0x7F, 0xFF]);
        assert_eq!(planes.blue, vec![0x7F, 0xFF]);
    }

    #[test]
    fn test_short_final_group_is_zero_padded() {
        let canvas = Canvas::new(1, 10, White).unwrap();
        let planes = PackedPlanes::from_frames([&canvas]);
        assert_eq!(planes.red, vec![0xFF, 0xC0]);
        assert_eq!(planes.to_payload().len(), 6);
    }

    #[test]
    fn test_channels_are_separated() {
        // Column 0: red, green, blue, yellow from the top
        let canvas =
            Canvas::from_rows(vec![vec![Red], vec![Green], vec![Blue], vec![Yellow]]).unwrap();
        let planes = PackedPlanes::from_frames([&canvas]);
        assert_eq!(planes.red, vec![0b1001_0000]);
        assert_eq!(planes.green, vec![0b0101_0000]);
        assert_eq!(planes.blue, vec![0b0010_0000]);
    }

    #[test]
    fn test_column_major_order() {
        let mut canvas = Canvas::new(3, 16, Black).unwrap();
        canvas.paint(8, 1, Red).unwrap();
        canvas.paint(15, 2, Red).unwrap();
        let planes = PackedPlanes::from_frames([&canvas]);
        // col0: [g0, g1], col1: [g0, g1], col2: [g0, g1]
        assert_eq!(planes.red, vec![0, 0, 0, 0x80, 0, 0x01]);
    }

    #[test]
    fn test_byte_counts() {
        for (w, h) in [(64, 16), (5, 3), (7, 9), (1, 1)] {
            let mut seq = FrameSequence::new(w, h, Black).unwrap();
            seq.add_frame(White);
            seq.add_frame(Cyan);
            let planes = pack_all(&seq);
            assert_eq!(planes.red.len(), 3 * bytes_per_frame(w, h));
            assert_eq!(Some(planes.to_payload().len()), payload_len(w, h, 3));
            assert_eq!(pack_current(&seq).red.len(), w * h.div_ceil(8));
        }
    }

    #[test]
    fn test_frames_concatenate_within_each_plane() {
        let mut seq = FrameSequence::new(1, 8, Red).unwrap();
        seq.add_frame(Blue);
        let payload = pack_all(&seq).to_payload();
        // red: [frame0, frame1], green: [..], blue: [..]
        assert_eq!(payload, vec![0xFF, 0x00, 0x00, 0x00, 0x00, 0xFF]);
    }

    #[test]
    fn test_unpack_inverts_pack() {
        let mut seq = FrameSequence::new(5, 11, Black).unwrap();
        seq.current_mut().paint(10, 4, Magenta).unwrap();
        seq.current_mut().paint(3, 0, Yellow).unwrap();
        seq.clone_current_frame();
        seq.current_mut().shift_left();
        let planes = pack_all(&seq);
        let restored = PackedPlanes::from_payload(&planes.to_payload()).unwrap();
        assert_eq!(restored.unpack_frame(5, 11, 0).as_ref(), seq.get(0));
        assert_eq!(restored.unpack_frame(5, 11, 1).as_ref(), seq.get(1));
        assert!(restored.unpack_frame(5, 11, 2).is_none());
    }

    #[test]
    fn test_payload_len_overflow_is_none() {
        assert_eq!(payload_len(64, 16, 2), Some(384));
        assert_eq!(payload_len(1 << 62, 8, 4), None);
        assert_eq!(payload_len(3, 8, usize::MAX / 2), None);
    }

    #[test]
    fn test_from_payload_rejects_uneven_length() {
        assert!(PackedPlanes::from_payload(&[1, 2, 3, 4]).is_none());
    }

    #[test]
    fn test_display_lists_channels() {
        let planes = PackedPlanes { red: vec![255, 0], green: vec![1], blue: vec![] };
        assert_eq!(planes.to_string(), "Red: [255, 0]\n\nGreen: [1]\n\nBlue: []");
    }
}
