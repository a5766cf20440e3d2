//! `#rrggbb` color codes.

use pxl_image::Color;

const DIGITS: &[u8; 16] = b"0123456789abcdef";

const fn hex_table() -> [[u8; 2]; 256] {
    let mut table = [[0; 2]; 256];
    let mut i = 0;
    while i < 256 {
        table[i] = [DIGITS[i >> 4], DIGITS[i & 0xF]];
        i += 1;
    }
    table
}
/// Two lowercase hex digits for every byte
static FMT_HEX: [[u8; 2]; 256] = hex_table();

/// Length of a formatted color code, `#` and six digits
pub const HEX_LEN: usize = 7;

/// Format an 8-bit RGB triple as `#rrggbb`
/// ```
/// assert_eq!(&pxl_markup::hex_rgb([255, 8, 0xAB]), b"#ff08ab");
/// ```
#[inline]
pub fn hex_rgb(rgb: [u8; 3]) -> [u8; HEX_LEN] {
    let [[r0, r1], [g0, g1], [b0, b1]] = rgb.map(|c| FMT_HEX[c as usize]);
    [b'#', r0, r1, g0, g1, b0, b1]
}

/// Append the `#rrggbb` code of a color to `buf`, without allocating
#[inline]
pub fn push_hex<C: Color>(buf: &mut String, color: &C) {
    buf.extend(hex_rgb(color.to_rgb8()).iter().map(|&b| b as char));
}

/// The `#rrggbb` code of a color, channels reduced to 8 bits
/// ```
/// use image::{Rgb, Rgba};
/// assert_eq!(pxl_markup::hex(&Rgba([0u8, 128, 255, 0])), "#0080ff");
/// assert_eq!(pxl_markup::hex(&Rgb([0xFFFFu16, 0x0100, 0x00FF])), "#ff0100");
/// ```
pub fn hex<C: Color>(color: &C) -> String {
    let mut s = String::with_capacity(HEX_LEN);
    push_hex(&mut s, color);
    s
}
