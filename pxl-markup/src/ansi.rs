//! Translate half-block markup into 24-bit ANSI escape sequences for terminal previews.
//!
//! ```
//! let ansi = pxl_markup::ansi::to_ansi("[#ff0000:#0000ff]▀[:#000000]▀\n");
//! assert_eq!(ansi, "\x1b[38;2;255;0;0m\x1b[48;2;0;0;255m▀\x1b[48;2;0;0;0m▀\x1b[0m\n");
//! ```

use ::core::fmt::Write;

/// Resets all attributes
pub const SGR_RESET: &str = sgr!("0");

/// A parsed color tag, `None` where a side is left unchanged
type Tag = (Option<[u8; 3]>, Option<[u8; 3]>);

fn parse_hex(s: &str) -> Option<[u8; 3]> {
    let digits = s.strip_prefix('#')?;
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some([channel(0)?, channel(2)?, channel(4)?])
}

fn parse_side(s: &str) -> Option<Option<[u8; 3]>> {
    if s.is_empty() {
        Some(None)
    } else {
        parse_hex(s).map(Some)
    }
}

/// Parse the body of a tag, the text between `[` and `]`
fn parse_tag(body: &str) -> Option<Tag> {
    let (fg, bg) = body.split_once(':')?;
    match (parse_side(fg)?, parse_side(bg)?) {
        (None, None) => None,
        tag => Some(tag),
    }
}

#[inline]
fn push_sgr(out: &mut String, tag: Tag) {
    // writing to a String never fails
    if let Some([r, g, b]) = tag.0 {
        let _ = write!(out, fg_rgb!(), r, g, b);
    }
    if let Some([r, g, b]) = tag.1 {
        let _ = write!(out, bg_rgb!(), r, g, b);
    }
}

/// Rewrite markup as SGR sequences.
///
/// Every line is terminated by [`SGR_RESET`] so colors never bleed past it, and
/// bracketed text that isn't a color tag is copied through unchanged.
pub fn to_ansi(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len() * 2);
    let mut rest = markup;
    while let Some(i) = rest.find(|c: char| c == '[' || c == '\n') {
        out.push_str(&rest[..i]);
        if rest.as_bytes()[i] == b'\n' {
            out.push_str(SGR_RESET);
            out.push('\n');
            rest = &rest[i + 1..];
            continue;
        }
        let tail = &rest[i + 1..];
        match tail.find(']').and_then(|end| parse_tag(&tail[..end]).map(|tag| (end, tag))) {
            Some((end, tag)) => {
                push_sgr(&mut out, tag);
                rest = &tail[end + 1..];
            }
            None => {
                out.push('[');
                rest = tail;
            }
        }
    }
    if !rest.is_empty() {
        out.push_str(rest);
        out.push_str(SGR_RESET);
    }
    out
}
