//! Index-table-backed images, the layout palette-based formats (GIF, PNG8) are stored in.

use ::std::collections::HashMap;

use ::image::{Rgba, RgbaImage};

use super::*;

/// The most colors a single-byte index can address
pub const MAX_PALETTE_LEN: usize = 256;

/// An image stored as one palette index per pixel.
///
/// Indices are validated on construction, so every in-bounds pixel maps to a palette entry.
/// ```
/// use image::Rgba;
/// use pxl_image::{ColorAccess, PalettedImage};
/// let red = Rgba([255, 0, 0, 255]);
/// let blue = Rgba([0, 0, 255, 255]);
/// let img = PalettedImage::from_indices(vec![0, 1, 0, 1], 2, 2, vec![red, blue]).unwrap();
/// assert_eq!(img.color_at(1, 1), blue);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PalettedImage<C: Color = Rgba<u8>> {
    /// Palette indices, rows `stride` apart
    pix: Vec<u8>,
    /// Distance in indices between the starts of two rows
    stride: usize,
    /// The pixel width of the image
    width: u32,
    /// The pixel height of the image
    height: u32,
    /// The colors indices refer to
    palette: Vec<C>,
}

impl<C: Color> PalettedImage<C> {
    /// Create a paletted image from raw indices with a row stride.
    /// # Errors
    /// If the stride is narrower than `width`, `pix` does not cover `height` rows,
    /// or an in-bounds index is not a palette entry.
    pub fn from_raw(pix: Vec<u8>, width: u32, height: u32, stride: usize, palette: Vec<C>) -> Result<Self, LayoutError> {
        let needed = required_len(width, height, width as usize, stride)?;
        if pix.len() < needed {
            return Err(LayoutError::BufferTooShort { len: pix.len(), needed });
        }
        for y in 0..height {
            let row = y as usize * stride;
            if let Some(x) = pix[row..row + width as usize].iter().position(|&i| i as usize >= palette.len()) {
                return Err(LayoutError::IndexOutOfRange { index: pix[row + x], x: x as u32, y, len: palette.len() });
            }
        }
        Ok(Self { pix, stride, width, height, palette })
    }
    /// Create a paletted image from tightly packed indices (`stride == width`)
    /// # Errors
    /// See [`PalettedImage::from_raw`]
    #[inline]
    pub fn from_indices(pix: Vec<u8>, width: u32, height: u32, palette: Vec<C>) -> Result<Self, LayoutError> {
        Self::from_raw(pix, width, height, width as usize, palette)
    }
    /// Palette index of the pixel at `(x, y)`
    ///
    /// # Panics
    /// If `(x, y)` is outside the image.
    #[inline(always)]
    pub fn index_at(&self, x: u32, y: u32) -> u8 { self.pix[y as usize * self.stride + x as usize] }
    /// The palette
    #[inline(always)]
    pub fn palette(&self) -> &[C] { &self.palette }
    /// Distance in indices between the starts of two rows
    #[inline(always)]
    pub fn stride(&self) -> usize { self.stride }
    /// Raw index buffer
    #[inline(always)]
    pub fn indices(&self) -> &[u8] { &self.pix }
}

impl PalettedImage<Rgba<u8>> {
    /// Index an RGBA8 image, with palette entries in first-seen (row-major) order.
    ///
    /// Returns `None` if the image has more than [`MAX_PALETTE_LEN`] distinct colors.
    pub fn from_rgba(img: &RgbaImage) -> Option<Self> {
        let mut lookup: HashMap<Rgba<u8>, u8> = HashMap::new();
        let mut palette = Vec::new();
        let mut pix = Vec::with_capacity(img.width() as usize * img.height() as usize);
        for &p in img.pixels() {
            let i = match lookup.get(&p) {
                Some(&i) => i,
                None => {
                    if palette.len() == MAX_PALETTE_LEN {
                        return None;
                    }
                    let i = palette.len() as u8;
                    palette.push(p);
                    lookup.insert(p, i);
                    i
                }
            };
            pix.push(i);
        }
        let stride = img.width() as usize;
        Some(Self { pix, stride, width: img.width(), height: img.height(), palette })
    }
}

impl<C: Color> ColorAccess for PalettedImage<C> {
    type Color = C;
    #[inline(always)]
    fn width(&self) -> u32 { self.width }
    #[inline(always)]
    fn height(&self) -> u32 { self.height }
    #[inline(always)]
    fn color_at(&self, x: u32, y: u32) -> C { self.palette[self.index_at(x, y) as usize] }
    #[inline(always)]
    fn storage(&self) -> Storage<'_, C> { Storage::Paletted { pix: &self.pix, stride: self.stride, palette: &self.palette } }
}

#[cfg(test)]
mod tests {
    use image::{Luma, Rgba, RgbaImage};

    use super::*;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);

    #[test]
    fn test_from_raw_with_padding() {
        // 2x2 image, rows padded to 3 indices, last row unpadded
        let img = PalettedImage::from_raw(vec![0, 1, 9, 1, 0], 2, 2, 3, vec![RED, BLUE]).unwrap();
        assert_eq!(img.color_at(0, 0), RED);
        assert_eq!(img.color_at(1, 0), BLUE);
        assert_eq!(img.color_at(0, 1), BLUE);
        assert_eq!(img.color_at(1, 1), RED);
        assert!(matches!(img.storage(), Storage::Paletted { stride: 3, .. }));
    }

    #[test]
    fn test_from_raw_rejects_bad_layouts() {
        assert_eq!(
            PalettedImage::from_raw(vec![0; 3], 2, 2, 2, vec![RED]),
            Err(LayoutError::BufferTooShort { len: 3, needed: 4 })
        );
        assert_eq!(
            PalettedImage::from_raw(vec![0; 4], 2, 2, 1, vec![RED]),
            Err(LayoutError::StrideTooNarrow { stride: 1, row: 2 })
        );
        assert_eq!(
            PalettedImage::from_indices(vec![0, 0, 0, 2], 2, 2, vec![RED, BLUE]),
            Err(LayoutError::IndexOutOfRange { index: 2, x: 1, y: 1, len: 2 })
        );
    }

    #[test]
    #[should_panic]
    fn test_index_at_out_of_bounds() {
        let img = PalettedImage::from_indices(vec![0, 1, 1, 0], 2, 2, vec![RED, BLUE]).unwrap();
        img.index_at(0, 2);
    }

    #[test]
    fn test_padding_indices_are_not_validated() {
        assert!(PalettedImage::from_raw(vec![0, 0, 200, 0, 0], 2, 2, 3, vec![Luma([0u8])]).is_ok());
    }

    #[test]
    fn test_from_rgba_first_seen_order() {
        let img = RgbaImage::from_fn(3, 2, |x, _| if x == 1 { RED } else { BLUE });
        let paletted = PalettedImage::from_rgba(&img).unwrap();
        assert_eq!(paletted.palette(), &[BLUE, RED]);
        assert_eq!(paletted.indices(), &[0, 1, 0, 0, 1, 0]);
        for (x, y, p) in img.enumerate_pixels() {
            assert_eq!(paletted.color_at(x, y), *p);
        }
    }

    #[test]
    fn test_from_rgba_too_many_colors() {
        let img = RgbaImage::from_fn(257, 2, |x, y| Rgba([x as u8, (x >> 8) as u8, y as u8, 255]));
        assert!(PalettedImage::from_rgba(&img).is_none());
        let img = RgbaImage::from_fn(256, 2, |x, _| Rgba([x as u8, 0, 0, 255]));
        assert_eq!(PalettedImage::from_rgba(&img).unwrap().palette().len(), MAX_PALETTE_LEN);
    }
}
