//! The fixed 8-color LED palette.
//!
//! Every pixel on the display is one of eight colors identified by a 3-bit
//! code. The code's bits select the lit channels of the RGB LED:
//! red = `0b001`, green = `0b010`, blue = `0b100`. Written as the
//! three-character binary string used by the firmware documentation
//! (`"001"` for red), character 2 is red, character 1 green, and
//! character 0 blue.

use crate::color::parse_hex_color;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error type for palette lookups that are not allowed to degrade.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaletteError {
    /// Not a palette name, code, or hex color
    #[error("unknown color '{0}' (expected a palette name, a code 0-7, or a hex color)")]
    UnknownColor(String),
    /// Code outside 0..=7
    #[error("invalid palette code {0}, expected 0-7")]
    InvalidCode(u8),
}

/// One of the eight displayable colors, indexed by its 3-bit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(u8)]
pub enum PaletteColor {
    #[default]
    Black = 0,
    Red = 1,
    Green = 2,
    Yellow = 3,
    Blue = 4,
    Magenta = 5,
    Cyan = 6,
    White = 7,
}

/// A single LED channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    /// Channels in plane order.
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    /// Bit of a palette code that lights this channel.
    pub fn bit(self) -> u8 {
        match self {
            Channel::Red => 0b001,
            Channel::Green => 0b010,
            Channel::Blue => 0b100,
        }
    }

    /// Human-readable channel label.
    pub fn label(self) -> &'static str {
        match self {
            Channel::Red => "Red",
            Channel::Green => "Green",
            Channel::Blue => "Blue",
        }
    }
}

/// A row of the palette table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteEntry {
    pub color: PaletteColor,
    pub hex: &'static str,
    pub rgb: [u8; 3],
    pub name: &'static str,
}

/// The palette table, indexed by code.
pub const PALETTE: [PaletteEntry; 8] = [
    PaletteEntry { color: PaletteColor::Black, hex: "#000000", rgb: [0, 0, 0], name: "Black" },
    PaletteEntry { color: PaletteColor::Red, hex: "#FF0000", rgb: [255, 0, 0], name: "Red" },
    PaletteEntry { color: PaletteColor::Green, hex: "#00FF00", rgb: [0, 255, 0], name: "Green" },
    PaletteEntry {
        color: PaletteColor::Yellow,
        hex: "#FFFF00",
        rgb: [255, 255, 0],
        name: "Yellow",
    },
    PaletteEntry { color: PaletteColor::Blue, hex: "#0000FF", rgb: [0, 0, 255], name: "Blue" },
    PaletteEntry {
        color: PaletteColor::Magenta,
        hex: "#FF00FF",
        rgb: [255, 0, 255],
        name: "Magenta",
    },
    PaletteEntry { color: PaletteColor::Cyan, hex: "#00FFFF", rgb: [0, 255, 255], name: "Cyan" },
    PaletteEntry {
        color: PaletteColor::White,
        hex: "#FFFFFF",
        rgb: [255, 255, 255],
        name: "White",
    },
];

impl PaletteColor {
    /// All colors in code order.
    pub const ALL: [PaletteColor; 8] = [
        PaletteColor::Black,
        PaletteColor::Red,
        PaletteColor::Green,
        PaletteColor::Yellow,
        PaletteColor::Blue,
        PaletteColor::Magenta,
        PaletteColor::Cyan,
        PaletteColor::White,
    ];

    /// The 3-bit code of this color.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Look up a color by code. Returns `None` for codes above 7.
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }

    /// The palette table row for this color.
    pub fn entry(self) -> &'static PaletteEntry {
        &PALETTE[self as usize]
    }

    pub fn hex(self) -> &'static str {
        self.entry().hex
    }

    pub fn rgb(self) -> [u8; 3] {
        self.entry().rgb
    }

    pub fn name(self) -> &'static str {
        self.entry().name
    }

    /// Three-character binary form of the code, e.g. `"001"` for red.
    pub fn binary(self) -> String {
        format!("{:03b}", self.code())
    }

    /// Whether this color lights the given channel.
    pub fn has_channel(self, channel: Channel) -> bool {
        self.code() & channel.bit() != 0
    }

    /// Build a color from individual channel states.
    pub fn from_channels(red: bool, green: bool, blue: bool) -> Self {
        let mut code = 0;
        if red {
            code |= Channel::Red.bit();
        }
        if green {
            code |= Channel::Green.bit();
        }
        if blue {
            code |= Channel::Blue.bit();
        }
        PALETTE[code as usize].color
    }

    /// Exact RGB match against the table.
    pub fn from_rgb(rgb: [u8; 3]) -> Option<Self> {
        PALETTE.iter().find(|e| e.rgb == rgb).map(|e| e.color)
    }

    /// Exact hex match against the table (case-insensitive).
    pub fn from_hex(hex: &str) -> Option<Self> {
        parse_hex_color(hex).ok().and_then(Self::from_rgb)
    }

    /// Hex lookup that degrades anything outside the palette to black.
    pub fn from_hex_lossy(hex: &str) -> Self {
        match Self::from_hex(hex) {
            Some(color) => color,
            None => {
                log::warn!("color '{}' is not in the palette, using black", hex);
                PaletteColor::Black
            }
        }
    }

    /// Case-insensitive lookup by palette name.
    pub fn from_name(name: &str) -> Option<Self> {
        PALETTE.iter().find(|e| e.name.eq_ignore_ascii_case(name.trim())).map(|e| e.color)
    }
}

impl fmt::Display for PaletteColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for PaletteColor {
    type Error = PaletteError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::from_code(code).ok_or(PaletteError::InvalidCode(code))
    }
}

impl FromStr for PaletteColor {
    type Err = PaletteError;

    /// Accepts a palette name, a decimal code, or a hex color.
    ///
    /// Well-formed hex colors outside the palette degrade to black; only
    /// input that is not a color at all is an error.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(color) = Self::from_name(s) {
            return Ok(color);
        }
        if let Ok(code) = s.parse::<u8>() {
            return Self::try_from(code);
        }
        if parse_hex_color(s).is_ok() {
            return Ok(Self::from_hex_lossy(s));
        }
        Err(PaletteError::UnknownColor(s.to_string()))
    }
}

impl Serialize for PaletteColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.name().to_ascii_lowercase())
    }
}

impl<'de> Deserialize<'de> for PaletteColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Code(u8),
            Text(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Code(code) => PaletteColor::try_from(code).map_err(serde::de::Error::custom),
            Repr::Text(text) => text.parse().map_err(serde::de::Error::custom),
        }
    }
}

/// Map a hex color to its 3-bit code.
///
/// Case-insensitive. Colors outside the palette map to `0` (black); this
/// quantization is lossy and never fails.
pub fn color_to_code(hex: &str) -> u8 {
    PaletteColor::from_hex_lossy(hex).code()
}

/// Map a 3-bit code to its `#RRGGBB` color.
pub fn code_to_color(code: u8) -> Option<&'static str> {
    PaletteColor::from_code(code).map(PaletteColor::hex)
}

/// Presentation name of a hex color, or `"Unknown"`.
pub fn name_of(hex: &str) -> &'static str {
    PaletteColor::from_hex(hex).map_or("Unknown", PaletteColor::name)
}
