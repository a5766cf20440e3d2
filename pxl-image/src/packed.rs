//! Borrowed windows into packed RGBA8 buffers.

use ::image::{Rgba, RgbaImage};

use super::*;

/// A borrowed RGBA8 image: [`PACKED_CHANNELS`] bytes per pixel, rows `stride` bytes apart.
///
/// Cropping with [`PackedView::sub_view`] keeps the parent's stride, so no pixels are copied.
/// ```
/// use image::{Rgba, RgbaImage};
/// use pxl_image::{ColorAccess, PackedView};
/// let img = RgbaImage::from_fn(4, 4, |x, y| Rgba([x as u8, y as u8, 0, 255]));
/// let view = PackedView::from_buffer(&img).sub_view(1, 2, 2, 2).unwrap();
/// assert_eq!(view.color_at(0, 0), Rgba([1, 2, 0, 255]));
/// assert_eq!(view.stride(), 16);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PackedView<'a> {
    /// The image data, starting at the top-left pixel of the view
    pix: &'a [u8],
    /// The pixel width of the view
    width: u32,
    /// The pixel height of the view
    height: u32,
    /// Distance in bytes between the starts of two rows
    stride: usize,
}

impl<'a> PackedView<'a> {
    /// Create a view over raw RGBA8 bytes
    /// # Errors
    /// If the stride is narrower than a row, or `pix` does not cover `height` rows
    pub fn new(pix: &'a [u8], width: u32, height: u32, stride: usize) -> Result<Self, LayoutError> {
        let row = (width as usize).checked_mul(PACKED_CHANNELS).ok_or(LayoutError::TooLarge { width, height })?;
        let needed = required_len(width, height, row, stride)?;
        if pix.len() < needed {
            return Err(LayoutError::BufferTooShort { len: pix.len(), needed });
        }
        Ok(Self { pix, width, height, stride })
    }
    /// View a whole RGBA8 image buffer
    #[inline]
    pub fn from_buffer(img: &'a RgbaImage) -> Self {
        Self { pix: img.as_raw(), width: img.width(), height: img.height(), stride: img.width() as usize * PACKED_CHANNELS }
    }
    /// View tightly packed pixels
    /// # Errors
    /// If `pixels` holds fewer than `width * height` pixels
    #[inline]
    pub fn from_pixels(pixels: &'a [[u8; 4]], width: u32, height: u32) -> Result<Self, LayoutError> {
        Self::new(::bytemuck::cast_slice(pixels), width, height, width as usize * PACKED_CHANNELS)
    }
    /// Crop to the region at `(x, y)` of `width x height`, sharing this view's buffer
    /// # Errors
    /// If the region is not fully inside this view
    pub fn sub_view(&self, x: u32, y: u32, width: u32, height: u32) -> Result<Self, LayoutError> {
        let inside = x.checked_add(width).map_or(false, |r| r <= self.width)
            && y.checked_add(height).map_or(false, |b| b <= self.height);
        if !inside {
            return Err(LayoutError::OutOfBounds { x, y, width, height, bounds: (self.width, self.height) });
        }
        if width == 0 || height == 0 {
            // empty regions need no buffer
            return Ok(Self { pix: &[], width, height, stride: 0 });
        }
        let start = y as usize * self.stride + x as usize * PACKED_CHANNELS;
        Ok(Self { pix: &self.pix[start..], width, height, stride: self.stride })
    }
    /// Distance in bytes between the starts of two rows
    #[inline(always)]
    pub fn stride(&self) -> usize { self.stride }
    #[inline(always)]
    fn offset(&self, x: u32, y: u32) -> usize { y as usize * self.stride + x as usize * PACKED_CHANNELS }
}

impl<'a> ColorAccess for PackedView<'a> {
    type Color = Rgba<u8>;
    #[inline(always)]
    fn width(&self) -> u32 { self.width }
    #[inline(always)]
    fn height(&self) -> u32 { self.height }
    #[inline(always)]
    fn color_at(&self, x: u32, y: u32) -> Rgba<u8> {
        let i = self.offset(x, y);
        Rgba::read_channels(&self.pix[i..i + PACKED_CHANNELS])
    }
    #[inline(always)]
    fn storage(&self) -> Storage<'_, Rgba<u8>> { Storage::Packed { pix: self.pix, stride: self.stride } }
}
