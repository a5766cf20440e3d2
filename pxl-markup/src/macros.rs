//! Escape sequence literals, usable as `write!` format strings.
//! ```
//! use pxl_markup::{csi, fg_rgb, sgr};
//! assert_eq!(csi!("2J"), "\x1b[2J");
//! assert_eq!(sgr!("0"), "\x1b[0m");
//! assert_eq!(format!(fg_rgb!(), 1, 2, 3), "\x1b[38;2;1;2;3m");
//! ```

/// Prefix with ESC
#[macro_export]
macro_rules! esc {
    ($( $a:expr ),* $(,)?) => { concat!('\x1B', $( $a ),*) };
}
/// Control Sequence Introducer (CSI) sequence
#[macro_export]
macro_rules! csi {
    ($( $a:expr ),* $(,)?) => { $crate::esc!('[', $( $a ),*) };
}
/// Select Graphic Rendition (SGR) sequence
#[macro_export]
macro_rules! sgr {
    ($( $a:expr ),* $(,)?) => { $crate::csi!($($a),*, 'm') };
}
/// 24-bit foreground color, formatted with `r, g, b` arguments
#[macro_export]
macro_rules! fg_rgb {
    () => {
        $crate::sgr!("38;2;{};{};{}")
    };
}
/// 24-bit background color, formatted with `r, g, b` arguments
#[macro_export]
macro_rules! bg_rgb {
    () => {
        $crate::sgr!("48;2;{};{};{}")
    };
}
