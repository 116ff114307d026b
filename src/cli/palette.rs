//! Palette command implementation

use std::process::ExitCode;

use crate::palette::PaletteColor;

use super::EXIT_SUCCESS;

/// Print the eight display colors with their codes and channel bits.
pub fn run_palette() -> ExitCode {
    println!("{:<6} {:<5} {:<8} Name", "Code", "Bits", "Hex");
    for color in PaletteColor::ALL {
        println!("{:<6} {:<5} {:<8} {}", color.code(), color.binary(), color.hex(), color.name());
    }
    ExitCode::from(EXIT_SUCCESS)
}
