//! ledjt - Pixel editor core for three-bit RGB LED matrix displays
//!
//! This library provides functionality to:
//! - Edit frames of eight-color pixel art (paint, fill, swap, shift, text masks)
//! - Manage an ordered sequence of frames with a cursor and timed playback
//! - Pack frames into per-channel bit planes and export them as `.jt` files
//! - Decode `.jt` files and render PNG previews

pub mod canvas;
pub mod cli;
pub mod codec;
pub mod color;
pub mod config;
pub mod export;
pub mod frames;
pub mod mask;
pub mod palette;
pub mod playback;
pub mod preview;
pub mod script;
pub mod session;
