//! Inspect command implementation

use std::path::Path;
use std::process::ExitCode;

use serde_json::json;

use crate::canvas::Canvas;
use crate::codec::PackedPlanes;
use crate::export::jt::decode;
use crate::palette::PaletteColor;

use super::{EXIT_ERROR, EXIT_SUCCESS};

/// One character per palette color for terminal grids.
fn glyph(color: PaletteColor) -> char {
    match color {
        PaletteColor::Black => '.',
        PaletteColor::Red => 'R',
        PaletteColor::Green => 'G',
        PaletteColor::Yellow => 'Y',
        PaletteColor::Blue => 'B',
        PaletteColor::Magenta => 'M',
        PaletteColor::Cyan => 'C',
        PaletteColor::White => 'W',
    }
}

fn ascii_grid(canvas: &Canvas) -> String {
    canvas
        .rows()
        .map(|row| row.iter().copied().map(glyph).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Execute the inspect command
pub fn run_inspect(input: &Path, json: bool) -> ExitCode {
    let contents = match std::fs::read_to_string(input) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: Cannot read '{}': {}", input.display(), e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let (frames, descriptor) = match decode(&contents) {
        Ok(decoded) => decoded,
        Err(e) => {
            eprintln!("Error: '{}': {}", input.display(), e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    if json {
        let grids: Vec<_> = frames.frames().iter().map(Canvas::to_rows).collect();
        let output = json!({
            "mode": descriptor.mode,
            "width": frames.width(),
            "height": frames.height(),
            "frameCount": frames.len(),
            "delayMs": descriptor.delay_millis,
            "frames": grids,
        });
        match serde_json::to_string_pretty(&output) {
            Ok(s) => println!("{}", s),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
        return ExitCode::from(EXIT_SUCCESS);
    }

    println!("File: {}", input.display());
    println!("Mode: {}", descriptor.mode);
    println!("Size: {}x{}", frames.width(), frames.height());
    println!("Frames: {}", frames.len());
    if frames.len() > 1 {
        println!("Delay: {} ms", descriptor.delay_millis);
    }

    for (index, canvas) in frames.frames().iter().enumerate() {
        println!();
        println!("Frame {}:", index + 1);
        println!("{}", ascii_grid(canvas));
        println!();
        println!("{}", PackedPlanes::from_frames([canvas]));
    }

    ExitCode::from(EXIT_SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyphs_are_distinct() {
        let mut glyphs: Vec<char> = PaletteColor::ALL.iter().copied().map(glyph).collect();
        glyphs.sort_unstable();
        glyphs.dedup();
        assert_eq!(glyphs.len(), 8);
    }

    #[test]
    fn test_ascii_grid() {
        use PaletteColor::*;
        let canvas = Canvas::from_rows(vec![vec![Red, Black], vec![Black, White]]).unwrap();
        assert_eq!(ascii_grid(&canvas), "R.\n.W");
    }
}
