//! Hex color parsing
//!
//! Supports `#RGB` and `#RRGGBB`, with or without the leading `#`.
//! Hex digits are case-insensitive.

use thiserror::Error;

/// Error type for color parsing failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// Input string was empty
    #[error("empty color string")]
    Empty,
    /// Invalid length (must be 3 or 6 hex chars)
    #[error("invalid color length {0}, expected 3 or 6")]
    InvalidLength(usize),
    /// Contains non-hex characters
    #[error("invalid hex character '{0}'")]
    InvalidHex(char),
}

/// Parse a hex color string into an `[r, g, b]` triple.
///
/// # Examples
///
/// ```
/// use ledjt::color::parse_hex_color;
///
/// assert_eq!(parse_hex_color("#F00").unwrap(), [255, 0, 0]);
/// assert_eq!(parse_hex_color("#00ff00").unwrap(), [0, 255, 0]);
/// assert_eq!(parse_hex_color("0000FF").unwrap(), [0, 0, 255]);
/// ```
///
/// # Errors
///
/// Returns `ColorError` if the input is empty, has the wrong length, or
/// contains a non-hex character.
pub fn parse_hex_color(s: &str) -> Result<[u8; 3], ColorError> {
    let hex = s.trim();
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if hex.is_empty() {
        return Err(ColorError::Empty);
    }

    let mut digits = Vec::with_capacity(6);
    for c in hex.chars() {
        digits.push(parse_hex_digit(c)?);
    }

    match digits.len() {
        // #RGB -> #RRGGBB (doubled digits)
        3 => Ok([digits[0] * 17, digits[1] * 17, digits[2] * 17]),
        6 => Ok([
            digits[0] * 16 + digits[1],
            digits[2] * 16 + digits[3],
            digits[4] * 16 + digits[5],
        ]),
        len => Err(ColorError::InvalidLength(len)),
    }
}

/// Format an `[r, g, b]` triple as an uppercase `#RRGGBB` string.
pub fn format_hex_color(rgb: [u8; 3]) -> String {
    format!("#{:02X}{:02X}{:02X}", rgb[0], rgb[1], rgb[2])
}

/// Parse a single hex digit (0-9, A-F, a-f) to u8 (0-15)
fn parse_hex_digit(c: char) -> Result<u8, ColorError> {
    match c {
        '0'..='9' => Ok(c as u8 - b'0'),
        'a'..='f' => Ok(c as u8 - b'a' + 10),
        'A'..='F' => Ok(c as u8 - b'A' + 10),
        _ => Err(ColorError::InvalidHex(c)),
    }
}
