//! Height validation and scan path dispatch.

use ::image::DynamicImage;
use ::tracing::{debug, instrument};

use super::*;

/// The only error rendering can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, ::thiserror::Error)]
#[error("can't process image with uneven height {height}")]
pub struct InvalidHeight {
    /// The rejected height
    pub height: u32,
}

/// Reject images whose rows can't be paired up
/// ```
/// assert!(pxl_markup::validate(4).is_ok());
/// assert!(pxl_markup::validate(0).is_ok());
/// assert_eq!(pxl_markup::validate(3).unwrap_err().height, 3);
/// ```
#[inline]
pub fn validate(height: u32) -> Result<(), InvalidHeight> {
    if height % 2 == 0 {
        Ok(())
    } else {
        Err(InvalidHeight { height })
    }
}

/// Which scanner an image is routed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScanPath {
    Generic,
    Paletted,
    Packed,
}

/// The scanner [`render`] picks for `img`
pub fn scan_path<I: ColorAccess + ?Sized>(img: &I) -> ScanPath {
    match img.storage() {
        Storage::Opaque => ScanPath::Generic,
        Storage::Paletted { .. } => ScanPath::Paletted,
        Storage::Packed { .. } => ScanPath::Packed,
    }
}

/// Encode an image as half-block markup.
///
/// Fails with [`InvalidHeight`] before reading any pixel if the height is odd.
/// ```
/// use image::{Rgb, RgbImage};
/// let img = RgbImage::from_pixel(1, 2, Rgb([0, 0, 0]));
/// assert_eq!(pxl_markup::render(&img).unwrap(), "[#000000:#000000]▀\n");
/// assert!(pxl_markup::render(&RgbImage::new(1, 3)).is_err());
/// ```
#[instrument(skip_all, fields(width = img.width(), height = img.height()))]
pub fn render<I: ColorAccess + ?Sized>(img: &I) -> Result<String, InvalidHeight> {
    let (width, height) = img.dimensions();
    validate(height)?;
    Ok(match img.storage() {
        Storage::Paletted { pix, stride, palette } => {
            debug!("paletted scan");
            scan::scan_paletted(pix, stride, palette, width, height)
        }
        Storage::Packed { pix, stride } => {
            debug!("packed scan");
            scan::scan_packed::<I::Color>(pix, stride, width, height)
        }
        Storage::Opaque => {
            debug!("generic scan");
            scan::scan_generic(img)
        }
    })
}

/// [`render`] with bands encoded in parallel, the output is the same
#[cfg(feature = "rayon")]
#[instrument(skip_all, fields(width = img.width(), height = img.height()))]
pub fn par_render<I>(img: &I) -> Result<String, InvalidHeight>
where
    I: ColorAccess + Sync + ?Sized,
    I::Color: Sync,
{
    let (width, height) = img.dimensions();
    validate(height)?;
    Ok(match img.storage() {
        Storage::Paletted { pix, stride, palette } => {
            debug!("parallel paletted scan");
            scan::par_scan_paletted(pix, stride, palette, width, height)
        }
        Storage::Packed { pix, stride } => {
            debug!("parallel packed scan");
            scan::par_scan_packed::<I::Color>(pix, stride, width, height)
        }
        Storage::Opaque => {
            debug!("parallel generic scan");
            scan::par_scan_generic(img)
        }
    })
}

/// Bind the concrete buffer of a [`DynamicImage`] to `$buf` and evaluate `$f`
macro_rules! dyn_map {
    ($img:expr, $buf:ident => $f:expr) => {
        match $img {
            DynamicImage::ImageLuma8($buf) => $f,
            DynamicImage::ImageLumaA8($buf) => $f,
            DynamicImage::ImageRgb8($buf) => $f,
            DynamicImage::ImageRgba8($buf) => $f,
            DynamicImage::ImageLuma16($buf) => $f,
            DynamicImage::ImageLumaA16($buf) => $f,
            DynamicImage::ImageRgb16($buf) => $f,
            DynamicImage::ImageRgba16($buf) => $f,
            DynamicImage::ImageRgb32F($buf) => $f,
            DynamicImage::ImageRgba32F($buf) => $f,
            other => {
                let $buf = &other.to_rgba8();
                $f
            }
        }
    };
}

/// [`render`] over the color model of a decoded [`DynamicImage`].
///
/// Colors keep their native representation, so only 8-bit RGBA takes the packed path.
#[instrument(skip_all, fields(color = ?img.color()))]
pub fn render_dynamic(img: &DynamicImage) -> Result<String, InvalidHeight> { dyn_map!(img, buf => render(buf)) }

/// [`render_dynamic`] with bands encoded in parallel
#[cfg(feature = "rayon")]
#[instrument(skip_all, fields(color = ?img.color()))]
pub fn par_render_dynamic(img: &DynamicImage) -> Result<String, InvalidHeight> {
    dyn_map!(img, buf => par_render(buf))
}
