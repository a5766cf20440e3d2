//! Encode images as half-block color markup.
//!
//! Every character cell is one `▀` glyph standing for two vertically stacked pixels:
//! the upper pixel is the foreground color, the lower pixel the background color.
//! Colors are set by a markup prefix in front of a glyph, and a prefix is only written
//! for the colors that changed since the previous glyph of the same row:
//! ```text
//! [#rrggbb:#rrggbb]▀   both colors change
//! [#rrggbb:]▀          foreground only
//! [:#rrggbb]▀          background only
//! ▀                    nothing changes
//! ```
//! Each pair of pixel rows (a band) ends with `\n` and starts over with no colors set.
//!
//! ```
//! use image::{Rgba, RgbaImage};
//! let red = Rgba([255, 0, 0, 255]);
//! let blue = Rgba([0, 0, 255, 255]);
//! let img = RgbaImage::from_fn(2, 2, |x, y| if (x, y) == (0, 0) { red } else { blue });
//! assert_eq!(pxl_markup::render(&img).unwrap(), "[#ff0000:#0000ff]▀[#0000ff:]▀\n");
//! ```

pub use pxl_image::{Color, ColorAccess, Storage};

#[macro_use]
pub mod macros;
pub mod ansi;
mod encoder;
pub use encoder::*;
mod hex;
pub use hex::*;
mod render;
pub use render::*;
pub mod scan;

/// The visible character of every cell, its foreground fills the upper half
pub const UPPER_HALF_BLOCK: char = '\u{2580}';
/// Terminates every band
pub const BAND_END: char = '\n';
