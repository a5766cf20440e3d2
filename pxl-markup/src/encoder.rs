//! Run-length-aware encoding of a single pixel pair.

use pxl_image::Color;

use super::*;

/// Colors already set by earlier glyphs of the current band.
///
/// `None` means no color was set yet and never compares equal to a real color,
/// so the first glyph of every band writes both colors.
/// A state must never be carried from one band into the next.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EncoderState<C> {
    /// Previous foreground (upper pixel) color
    pub fg: Option<C>,
    /// Previous background (lower pixel) color
    pub bg: Option<C>,
}

impl<C> Default for EncoderState<C> {
    #[inline]
    fn default() -> Self { Self { fg: None, bg: None } }
}

impl<C: Color> EncoderState<C> {
    /// A fresh state with no colors set
    #[inline]
    pub fn new() -> Self { Self::default() }
}

/// Append one glyph for the `fg` over `bg` pixel pair to `buf`, updating `state`.
///
/// Colors are compared with their native equality, and only the ones that differ from
/// `state` are formatted and written.
#[inline]
pub fn encode_into<C: Color>(buf: &mut String, fg: C, bg: C, state: &mut EncoderState<C>) {
    let same_fg = state.fg == Some(fg);
    let same_bg = state.bg == Some(bg);
    match (same_fg, same_bg) {
        (true, true) => {}
        (true, false) => {
            buf.push_str("[:");
            push_hex(buf, &bg);
            buf.push(']');
            state.bg = Some(bg);
        }
        (false, true) => {
            buf.push('[');
            push_hex(buf, &fg);
            buf.push_str(":]");
            state.fg = Some(fg);
        }
        (false, false) => {
            buf.push('[');
            push_hex(buf, &fg);
            buf.push(':');
            push_hex(buf, &bg);
            buf.push(']');
            state.fg = Some(fg);
            state.bg = Some(bg);
        }
    }
    buf.push(UPPER_HALF_BLOCK);
}

/// Encode one glyph for the `fg` over `bg` pixel pair, updating `state`.
/// ```
/// use image::Rgb;
/// use pxl_markup::{encode, EncoderState};
/// let mut state = EncoderState::new();
/// assert_eq!(encode(Rgb([255u8, 0, 0]), Rgb([0, 0, 0]), &mut state), "[#ff0000:#000000]▀");
/// assert_eq!(encode(Rgb([255u8, 0, 0]), Rgb([0, 0, 0]), &mut state), "▀");
/// assert_eq!(encode(Rgb([255u8, 0, 0]), Rgb([0, 0, 9]), &mut state), "[:#000009]▀");
/// ```
pub fn encode<C: Color>(fg: C, bg: C, state: &mut EncoderState<C>) -> String {
    let mut s = String::new();
    encode_into(&mut s, fg, bg, state);
    s
}

#[cfg(test)]
mod tests {
    use image::{Rgb, Rgba};

    use super::*;

    const RED: Rgb<u8> = Rgb([255, 0, 0]);
    const GREEN: Rgb<u8> = Rgb([0, 255, 0]);
    const BLUE: Rgb<u8> = Rgb([0, 0, 255]);

    #[test]
    fn test_fresh_state_writes_both() {
        let mut state = EncoderState::new();
        assert_eq!(encode(RED, RED, &mut state), "[#ff0000:#ff0000]▀");
        assert_eq!(state, EncoderState { fg: Some(RED), bg: Some(RED) });
    }

    #[test]
    fn test_unchanged_is_bare() {
        let mut state = EncoderState { fg: Some(RED), bg: Some(BLUE) };
        assert_eq!(encode(RED, BLUE, &mut state), "▀");
        assert_eq!(state, EncoderState { fg: Some(RED), bg: Some(BLUE) });
    }

    #[test]
    fn test_background_only() {
        let mut state = EncoderState { fg: Some(RED), bg: Some(BLUE) };
        assert_eq!(encode(RED, GREEN, &mut state), "[:#00ff00]▀");
        assert_eq!(state, EncoderState { fg: Some(RED), bg: Some(GREEN) });
    }

    #[test]
    fn test_foreground_only() {
        let mut state = EncoderState { fg: Some(RED), bg: Some(BLUE) };
        assert_eq!(encode(GREEN, BLUE, &mut state), "[#00ff00:]▀");
        assert_eq!(state, EncoderState { fg: Some(GREEN), bg: Some(BLUE) });
    }

    #[test]
    fn test_both_changed() {
        let mut state = EncoderState { fg: Some(RED), bg: Some(BLUE) };
        assert_eq!(encode(BLUE, RED, &mut state), "[#0000ff:#ff0000]▀");
        assert_eq!(state, EncoderState { fg: Some(BLUE), bg: Some(RED) });
    }

    #[test]
    fn test_slots_compared_separately() {
        // fg matching the previous *background* is still a change
        let mut state = EncoderState { fg: Some(RED), bg: Some(BLUE) };
        assert_eq!(encode(BLUE, BLUE, &mut state), "[#0000ff:]▀");
    }

    #[test]
    fn test_native_equality_quirk() {
        // same displayed color, different alpha: written again
        let opaque = Rgba([10u8, 20, 30, 255]);
        let clear = Rgba([10u8, 20, 30, 0]);
        let mut state = EncoderState::new();
        assert_eq!(encode(opaque, opaque, &mut state), "[#0a141e:#0a141e]▀");
        assert_eq!(encode(clear, opaque, &mut state), "[#0a141e:]▀");
        assert_eq!(encode(clear, clear, &mut state), "[:#0a141e]▀");
    }

    #[test]
    fn test_encode_into_appends() {
        let mut buf = String::from("x");
        let mut state = EncoderState::new();
        encode_into(&mut buf, RED, BLUE, &mut state);
        encode_into(&mut buf, RED, BLUE, &mut state);
        assert_eq!(buf, "x[#ff0000:#0000ff]▀▀");
    }
}
