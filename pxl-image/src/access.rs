//! The [`ColorAccess`] capability and the optional [`Storage`] descriptor used for fast paths.

use ::core::ops::Deref;

use ::image::{GenericImageView, ImageBuffer, Pixel};

use super::*;

/// In-memory pixel layout of a [`ColorAccess`] image, if it has one worth reading directly.
///
/// # Contract
/// Whatever an implementor returns here must describe exactly the colors [`ColorAccess::color_at`]
/// returns for every in-bounds coordinate, and the buffers must cover the image's full extent.
#[derive(Debug, Clone, Copy)]
pub enum Storage<'a, C: Color> {
    /// Only per-coordinate access is available
    Opaque,
    /// One palette index per pixel, rows `stride` indices apart
    Paletted { pix: &'a [u8], stride: usize, palette: &'a [C] },
    /// [`PACKED_CHANNELS`] 8-bit channels per pixel, rows `stride` channels apart
    Packed { pix: &'a [C::Channel], stride: usize },
}

impl<'a, C: Color> Storage<'a, C> {
    /// Is there a layout to read directly?
    #[inline]
    pub fn is_opaque(&self) -> bool { matches!(self, Storage::Opaque) }
}

/// Minimal capability the renderer needs from a decoded image.
///
/// Coordinates always start at `(0, 0)`, callers never ask for a pixel outside `width() x height()`.
pub trait ColorAccess {
    /// The native color of a pixel
    type Color: Color;
    /// Pixel width of the image
    fn width(&self) -> u32;
    /// Pixel height of the image
    fn height(&self) -> u32;
    /// Dimensions of the image
    #[inline]
    fn dimensions(&self) -> (u32, u32) { (self.width(), self.height()) }
    /// Color of the pixel at `(x, y)`
    fn color_at(&self, x: u32, y: u32) -> Self::Color;
    /// Pixel layout for direct reads, [`Storage::Opaque`] by default
    #[inline]
    fn storage(&self) -> Storage<'_, Self::Color> { Storage::Opaque }
}

impl<T: ColorAccess + ?Sized> ColorAccess for &T {
    type Color = T::Color;
    #[inline(always)]
    fn width(&self) -> u32 { (**self).width() }
    #[inline(always)]
    fn height(&self) -> u32 { (**self).height() }
    #[inline(always)]
    fn color_at(&self, x: u32, y: u32) -> Self::Color { (**self).color_at(x, y) }
    #[inline(always)]
    fn storage(&self) -> Storage<'_, Self::Color> { (**self).storage() }
}

/// Returns true if colors of type `C` can be read from a packed buffer
#[inline(always)]
pub const fn is_packed<C: Color>() -> bool { C::CHANNELS == PACKED_CHANNELS && <C::Channel as Channel>::BITS == 8 }

impl<P, C> ColorAccess for ImageBuffer<P, C>
where
    P: Pixel + PartialEq,
    P::Subpixel: Channel,
    C: Deref<Target = [P::Subpixel]>,
{
    type Color = P;
    #[inline(always)]
    fn width(&self) -> u32 { ImageBuffer::width(self) }
    #[inline(always)]
    fn height(&self) -> u32 { ImageBuffer::height(self) }
    #[inline(always)]
    fn color_at(&self, x: u32, y: u32) -> P { *self.get_pixel(x, y) }
    #[inline]
    fn storage(&self) -> Storage<'_, P> {
        if is_packed::<P>() {
            let pix: &[P::Subpixel] = self.as_raw();
            Storage::Packed { pix, stride: ImageBuffer::width(self) as usize * PACKED_CHANNELS }
        } else {
            Storage::Opaque
        }
    }
}

/// Wrapper that exposes any [`GenericImageView`] through per-coordinate access only.
///
/// Useful for views without a flat buffer (e.g. [`image::SubImage`]), or to force the generic path.
/// ```
/// use image::{Rgba, RgbaImage};
/// use pxl_image::{ColorAccess, GenericAccess};
/// let img = RgbaImage::from_pixel(2, 2, Rgba([1, 2, 3, 255]));
/// assert!(!img.storage().is_opaque());
/// assert!(GenericAccess(img.clone()).storage().is_opaque());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct GenericAccess<I>(pub I);

impl<I> ColorAccess for GenericAccess<I>
where
    I: GenericImageView,
    I::Pixel: Color,
{
    type Color = I::Pixel;
    #[inline(always)]
    fn width(&self) -> u32 { self.0.width() }
    #[inline(always)]
    fn height(&self) -> u32 { self.0.height() }
    #[inline(always)]
    fn color_at(&self, x: u32, y: u32) -> I::Pixel { self.0.get_pixel(x, y) }
}

#[cfg(test)]
mod tests {
    use image::{ImageBuffer, Luma, Rgb, Rgba, RgbaImage};

    use super::*;

    #[test]
    fn test_rgba8_buffer_is_packed() {
        let img = RgbaImage::from_fn(3, 2, |x, y| Rgba([x as u8, y as u8, 0, 255]));
        match img.storage() {
            Storage::Packed { pix, stride } => {
                assert_eq!(stride, 12);
                assert_eq!(pix.len(), 24);
                assert_eq!(&pix[stride + 4..stride + 8], &[1, 1, 0, 255]);
            }
            other => panic!("expected packed storage, got {:?}", other),
        }
    }

    #[test]
    fn test_other_buffers_are_opaque() {
        let rgb: ImageBuffer<Rgb<u8>, Vec<u8>> = ImageBuffer::new(2, 2);
        assert!(rgb.storage().is_opaque());
        let rgba16: ImageBuffer<Rgba<u16>, Vec<u16>> = ImageBuffer::new(2, 2);
        assert!(rgba16.storage().is_opaque());
        let luma: ImageBuffer<Luma<u8>, Vec<u8>> = ImageBuffer::new(2, 2);
        assert!(luma.storage().is_opaque());
    }

    #[test]
    fn test_color_at_matches_pixels() {
        let img = ImageBuffer::from_fn(4, 2, |x, y| Rgb([x as u16 * 1000, y as u16, 7]));
        assert_eq!(img.color_at(3, 1), Rgb([3000, 1, 7]));
        assert_eq!(GenericAccess(img.clone()).color_at(3, 1), Rgb([3000, 1, 7]));
        assert_eq!((&img).dimensions(), (4, 2));
    }

    #[test]
    fn test_generic_access_sub_image() {
        let img = RgbaImage::from_fn(4, 4, |x, y| Rgba([x as u8, y as u8, 0, 255]));
        let view = image::imageops::crop_imm(&img, 1, 2, 2, 2);
        let access = GenericAccess(view);
        assert_eq!(access.dimensions(), (2, 2));
        assert_eq!(access.color_at(0, 0), Rgba([1, 2, 0, 255]));
    }
}
