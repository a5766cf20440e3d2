//! Band scanners: walk an image two rows at a time and feed every column to the encoder.
//!
//! [`scan_generic`] works on any [`ColorAccess`], [`scan_paletted`] and [`scan_packed`] read
//! colors straight from a [`Storage`] layout. For the same logical image every scanner
//! writes the same bytes, and so do the `par_*` variants that render bands on the rayon pool.
//!
//! None of the scanners check the image height, a trailing odd row is never read.

#[cfg(feature = "rayon")]
use ::rayon::prelude::*;

use super::*;

/// Bytes reserved per glyph, enough for the glyph and a background change
pub const GLYPH_RESERVE: usize = "[:#rrggbb]".len() + UPPER_HALF_BLOCK.len_utf8();

#[inline]
fn band_capacity(width: u32) -> usize { width as usize * GLYPH_RESERVE + BAND_END.len_utf8() }

/// Encode one band of `width` columns, `pair(x)` gives the upper and lower color of column `x`
#[inline]
pub fn scan_band<C: Color>(buf: &mut String, width: u32, mut pair: impl FnMut(u32) -> (C, C)) {
    let mut state = EncoderState::new();
    for x in 0..width {
        let (fg, bg) = pair(x);
        encode_into(buf, fg, bg, &mut state);
    }
    buf.push(BAND_END);
}

/// Run `band` for every band, top to bottom, into one buffer
#[inline]
fn scan_bands(width: u32, height: u32, band: impl Fn(&mut String, usize)) -> String {
    let bands = height as usize / 2;
    let mut buf = String::with_capacity(bands * band_capacity(width));
    for b in 0..bands {
        band(&mut buf, b);
    }
    buf
}

/// Run `band` for every band on the rayon pool, concatenated top to bottom
#[cfg(feature = "rayon")]
#[inline]
fn par_scan_bands(width: u32, height: u32, band: impl Fn(&mut String, usize) + Sync) -> String {
    (0..height as usize / 2)
        .into_par_iter()
        .map(|b| {
            let mut buf = String::with_capacity(band_capacity(width));
            band(&mut buf, b);
            buf
        })
        .collect::<Vec<String>>()
        .concat()
}

#[inline(always)]
fn generic_band<I: ColorAccess + ?Sized>(img: &I, buf: &mut String, b: usize) {
    let (top, bottom) = (b as u32 * 2, b as u32 * 2 + 1);
    scan_band(buf, img.width(), |x| (img.color_at(x, top), img.color_at(x, bottom)));
}

/// Scan through per-coordinate access only.
/// ```
/// use image::{Luma, ImageBuffer};
/// let img: ImageBuffer<Luma<u8>, _> = ImageBuffer::from_fn(3, 2, |_, y| Luma([y as u8 * 255]));
/// assert_eq!(pxl_markup::scan::scan_generic(&img), "[#000000:#ffffff]▀▀▀\n");
/// ```
pub fn scan_generic<I: ColorAccess + ?Sized>(img: &I) -> String {
    scan_bands(img.width(), img.height(), |buf, b| generic_band(img, buf, b))
}

/// [`scan_generic`] with bands rendered in parallel
#[cfg(feature = "rayon")]
pub fn par_scan_generic<I>(img: &I) -> String
where
    I: ColorAccess + Sync + ?Sized,
{
    par_scan_bands(img.width(), img.height(), |buf, b| generic_band(img, buf, b))
}

#[inline(always)]
fn paletted_band<C: Color>(pix: &[u8], stride: usize, palette: &[C], width: u32, buf: &mut String, b: usize) {
    let w = width as usize;
    let top = &pix[b * 2 * stride..][..w];
    let bottom = &pix[(b * 2 + 1) * stride..][..w];
    scan_band(buf, width, |x| (palette[top[x as usize] as usize], palette[bottom[x as usize] as usize]));
}

/// Scan an index buffer, one palette index per pixel and rows `stride` indices apart.
///
/// # Panics
/// If `pix` does not cover `width x height` with the given stride, or an index is outside `palette`.
pub fn scan_paletted<C: Color>(pix: &[u8], stride: usize, palette: &[C], width: u32, height: u32) -> String {
    scan_bands(width, height, |buf, b| paletted_band(pix, stride, palette, width, buf, b))
}

/// [`scan_paletted`] with bands rendered in parallel
#[cfg(feature = "rayon")]
pub fn par_scan_paletted<C>(pix: &[u8], stride: usize, palette: &[C], width: u32, height: u32) -> String
where
    C: Color + Sync,
{
    par_scan_bands(width, height, |buf, b| paletted_band(pix, stride, palette, width, buf, b))
}

#[inline(always)]
fn packed_band<C: Color>(pix: &[C::Channel], stride: usize, width: u32, buf: &mut String, b: usize) {
    let row = width as usize * C::CHANNELS;
    let top = &pix[b * 2 * stride..][..row];
    let bottom = &pix[(b * 2 + 1) * stride..][..row];
    scan_band(buf, width, |x| {
        let i = x as usize * C::CHANNELS;
        (C::read_channels(&top[i..i + C::CHANNELS]), C::read_channels(&bottom[i..i + C::CHANNELS]))
    });
}

/// Scan a packed buffer, `C::CHANNELS` channels per pixel and rows `stride` channels apart.
///
/// # Panics
/// If `pix` does not cover `width x height` with the given stride.
/// ```
/// use image::Rgba;
/// let pix = [9u8, 9, 9, 255, 0, 0, 0, 255, 9, 9, 9, 255, 0, 0, 0, 255];
/// let out = pxl_markup::scan::scan_packed::<Rgba<u8>>(&pix, 8, 2, 2);
/// assert_eq!(out, "[#090909:#090909]▀[#000000:#000000]▀\n");
/// ```
pub fn scan_packed<C: Color>(pix: &[C::Channel], stride: usize, width: u32, height: u32) -> String {
    scan_bands(width, height, |buf, b| packed_band::<C>(pix, stride, width, buf, b))
}

/// [`scan_packed`] with bands rendered in parallel
#[cfg(feature = "rayon")]
pub fn par_scan_packed<C: Color>(pix: &[C::Channel], stride: usize, width: u32, height: u32) -> String {
    par_scan_bands(width, height, |buf, b| packed_band::<C>(pix, stride, width, buf, b))
}

#[cfg(test)]
mod tests {
    use image::{ImageBuffer, Rgb, Rgba, RgbaImage};
    use pxl_image::{GenericAccess, PackedView, PalettedImage};

    use super::*;

    fn stripes() -> RgbaImage {
        RgbaImage::from_fn(5, 6, |x, y| match (x + y) % 3 {
            0 => Rgba([255, 0, 0, 255]),
            1 => Rgba([0, 255, 0, 255]),
            _ => Rgba([0, 0, 255, 128]),
        })
    }

    #[test]
    fn test_band_and_glyph_counts() {
        let img = ImageBuffer::from_fn(7, 4, |x, y| Rgb([x as u8, y as u8, 0]));
        let out = scan_generic(&img);
        let bands: Vec<&str> = out.split_terminator(BAND_END).collect();
        assert_eq!(bands.len(), 2);
        for band in bands {
            assert_eq!(band.chars().filter(|&c| c == UPPER_HALF_BLOCK).count(), 7);
        }
        assert!(out.ends_with(BAND_END));
    }

    #[test]
    fn test_identical_columns_markup_once() {
        let img = RgbaImage::from_pixel(4, 2, Rgba([1, 2, 3, 255]));
        assert_eq!(scan_generic(&img), "[#010203:#010203]▀▀▀▀\n");
    }

    #[test]
    fn test_alternating_foreground() {
        let img = ImageBuffer::from_fn(4, 2, |x, y| match (x % 2, y) {
            (_, 1) => Rgb([0u8, 0, 0]),
            (0, _) => Rgb([255, 255, 255]),
            _ => Rgb([128, 128, 128]),
        });
        assert_eq!(scan_generic(&img), "[#ffffff:#000000]▀[#808080:]▀[#ffffff:]▀[#808080:]▀\n");
    }

    #[test]
    fn test_state_resets_per_band() {
        let img = RgbaImage::from_pixel(2, 4, Rgba([0, 0, 0, 255]));
        assert_eq!(scan_generic(&img), "[#000000:#000000]▀▀\n[#000000:#000000]▀▀\n");
    }

    #[test]
    fn test_empty_images() {
        let wide = RgbaImage::new(3, 0);
        assert_eq!(scan_generic(&wide), "");
        let tall = RgbaImage::new(0, 4);
        assert_eq!(scan_generic(&tall), "\n\n");
    }

    #[test]
    fn test_paths_agree() {
        let img = stripes();
        let expected = scan_generic(&GenericAccess(img.clone()));
        let view = PackedView::from_buffer(&img);
        assert_eq!(scan_packed::<Rgba<u8>>(img.as_raw(), view.stride(), 5, 6), expected);
        let paletted = PalettedImage::from_rgba(&img).unwrap();
        let out = scan_paletted(paletted.indices(), paletted.stride(), paletted.palette(), 5, 6);
        assert_eq!(out, expected);
    }

    #[test]
    fn test_paletted_with_padding() {
        // stride 3 for a 2 wide image, the padding column is never read
        let palette = [Rgb([255u8, 0, 0]), Rgb([0, 0, 255])];
        let pix = [0, 1, 1, 1, 1, 0];
        assert_eq!(scan_paletted(&pix, 3, &palette, 2, 2), "[#ff0000:#0000ff]▀[#0000ff:]▀\n");
    }

    #[test]
    fn test_packed_sub_view() {
        let img = stripes();
        let view = PackedView::from_buffer(&img).sub_view(1, 2, 3, 4).unwrap();
        let cropped = image::imageops::crop_imm(&img, 1, 2, 3, 4).to_image();
        match view.storage() {
            Storage::Packed { pix, stride } => {
                assert_eq!(scan_packed::<Rgba<u8>>(pix, stride, 3, 4), scan_generic(&GenericAccess(cropped)));
            }
            other => panic!("expected packed storage, got {:?}", other),
        }
    }

    #[test]
    fn test_odd_row_ignored() {
        let img = RgbaImage::from_pixel(1, 3, Rgba([0, 0, 0, 255]));
        assert_eq!(scan_generic(&img), "[#000000:#000000]▀\n");
        assert_eq!(scan_packed::<Rgba<u8>>(img.as_raw(), 4, 1, 3), "[#000000:#000000]▀\n");
    }

    #[cfg(feature = "rayon")]
    #[test]
    fn test_parallel_matches_sequential() {
        let img = RgbaImage::from_fn(33, 64, |x, y| Rgba([(x * 7) as u8, (y * 3) as u8, ((x ^ y) & 0xF0) as u8, 255]));
        let expected = scan_generic(&img);
        assert_eq!(par_scan_generic(&img), expected);
        assert_eq!(par_scan_packed::<Rgba<u8>>(img.as_raw(), 33 * 4, 33, 64), expected);
        let small = stripes();
        let paletted = PalettedImage::from_rgba(&small).unwrap();
        let out = par_scan_paletted(paletted.indices(), paletted.stride(), paletted.palette(), 5, 6);
        assert_eq!(out, scan_generic(&small));
    }
}
