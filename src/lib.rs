//! Render images as half-block color markup.
//!
//! Thin file and stream wrappers around [`pxl_markup`], plus the configuration and logging
//! used by the `pxl` command line tool.
//! ```
//! use image::{DynamicImage, Rgb, RgbImage};
//! let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(2, 2, Rgb([255, 255, 255])));
//! assert_eq!(pxl::from_image(&img).unwrap(), "[#ffffff:#ffffff]▀▀\n");
//! ```
use std::{
    cell::Cell,
    fs::File,
    io::{BufReader, Read},
    path::Path,
    str::FromStr,
};

use ::anyhow::{Context, Result};
use ::image::{DynamicImage, GenericImageView};
use ::serde::Deserialize;
use ::tracing::instrument;
pub use pxl_image::{Channel, Color, ColorAccess, GenericAccess, LayoutError, PackedView, PalettedImage, Storage};
pub use pxl_markup::{ansi::to_ansi, hex, render, render_dynamic, scan_path, validate, InvalidHeight, ScanPath};

#[macro_use]
mod macros;
mod config;
pub use config::*;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum LogLevel {
    /// Info and above
    #[default]
    Info = 0,
    /// Warnings and above
    Warn = 1,
    /// Errors and above
    Error = 2,
    /// No logging
    Silent = 3,
}
impl FromStr for LogLevel {
    type Err = String;
    #[inline]
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "info" => Ok(Self::Info),
            "warn" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            "silent" => Ok(Self::Silent),
            _ => Err(format!("invalid log level: {}, must be one of info, warn, error, silent", s)),
        }
    }
}
impl<'de> Deserialize<'de> for LogLevel {
    #[inline]
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        String::deserialize(deserializer)?.parse().map_err(serde::de::Error::custom)
    }
}
impl LogLevel {
    /// Are messages of this level printed?
    #[inline]
    pub fn enabled(self) -> bool { LOG_LEVEL.with(|cell| cell.get() <= self) }
    /// Make this the level of the current thread
    #[inline]
    pub fn set(self) { LOG_LEVEL.with(|cell| cell.set(self)) }
}
impl From<u8> for LogLevel {
    #[inline]
    fn from(v: u8) -> Self {
        match v {
            0 => Self::Info,
            1 => Self::Warn,
            2 => Self::Error,
            _ => Self::Silent,
        }
    }
}

thread_local! {
    pub static LOG_LEVEL: Cell<LogLevel> = Cell::new(LogLevel::Info);
}

/// Render a decoded image, bands are encoded in parallel with the `rayon` feature
#[inline]
fn render_decoded(img: &DynamicImage) -> std::result::Result<String, InvalidHeight> {
    #[cfg(feature = "rayon")]
    {
        pxl_markup::par_render_dynamic(img)
    }
    #[cfg(not(feature = "rayon"))]
    {
        pxl_markup::render_dynamic(img)
    }
}

/// Render a decoded image.
///
/// An odd height fails with [`InvalidHeight`], which can be recovered with `downcast_ref`.
#[instrument(skip_all, fields(width = img.width(), height = img.height()))]
pub fn from_image(img: &DynamicImage) -> Result<String> { Ok(render_decoded(img)?) }

/// Read an encoded image from a stream, guess its format and render it
#[instrument(skip_all)]
pub fn from_reader<R: Read>(mut reader: R) -> Result<String> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf).context("could not read image")?;
    let img = ::image::load_from_memory(&buf).context("could not decode image")?;
    from_image(&img)
}

/// Open, decode and render an image file
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    let img = open(path)?;
    from_image(&img).with_context(|| format!("could not render {}", path.display()))
}

/// Open and decode an image file, guessing the format from its content
pub fn open(path: &Path) -> Result<DynamicImage> {
    let file = File::open(path).with_context(|| format!("could not open {}", path.display()))?;
    ::image::io::Reader::new(BufReader::new(file))
        .with_guessed_format()
        .with_context(|| format!("could not read {}", path.display()))?
        .decode()
        .with_context(|| format!("could not decode {}", path.display()))
}

/// Pixel height of an image resized to `width` columns with its aspect ratio kept,
/// rounded up to an even number of rows and never less than 2
/// ```
/// assert_eq!(pxl::fit_height((100, 50), 10), 6);
/// assert_eq!(pxl::fit_height((100, 50), 20), 10);
/// assert_eq!(pxl::fit_height((1000, 1), 10), 2);
/// ```
pub fn fit_height((width, height): (u32, u32), columns: u32) -> u32 {
    if width == 0 {
        return height + height % 2;
    }
    let rows = (height as f64 * columns as f64 / width as f64).round() as u32;
    (rows + rows % 2).max(2)
}

/// Resize an image to `columns` pixels wide, see [`fit_height`]
#[instrument(skip(img), fields(width = img.width(), height = img.height()))]
pub fn resize(img: &DynamicImage, columns: u32, filter: FilterType) -> DynamicImage {
    let height = fit_height((img.width(), img.height()), columns);
    img.resize_exact(columns, height, filter.into())
}
