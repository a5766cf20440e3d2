//! Render an image file as half-block color markup.
use std::{
    fs::File,
    io::{stdout, BufWriter, Write},
};

use anyhow::{Context, Result};
use image::GenericImageView;
use pxl::{debug, error, info, warn, Config, Dimension, InvalidHeight};

/// A threshold for warning the user that the image is too large (width * height).
const IMAGE_SIZE_THRESHOLD: u32 = 3840 * 2160; // 4k
/// Columns used when the terminal width cannot be determined.
const DEFAULT_COLS: u16 = 80;

/// Width of the terminal in columns
#[cfg(not(target_family = "wasm"))]
fn terminal_columns() -> u16 {
    match ::crossterm::terminal::size() {
        Ok((cols, _)) if cols > 0 => cols,
        _ => env_columns(),
    }
}
/// Width of the terminal in columns
#[cfg(target_family = "wasm")]
fn terminal_columns() -> u16 { env_columns() }
/// Terminals that can't report a size may at least export COLUMNS
fn env_columns() -> u16 {
    match std::env::var("COLUMNS").map(|cols| cols.parse::<u16>()) {
        Ok(Ok(cols)) if cols > 0 => cols,
        _ => {
            warn!("Could not get terminal width, using {} columns", DEFAULT_COLS);
            DEFAULT_COLS
        }
    }
}

fn main() -> Result<()> {
    #[cfg(feature = "debug")]
    {
        eprint!("[DEBUG] features: ");
        #[cfg(feature = "rayon")]
        eprint!("rayon,");
        #[cfg(feature = "env")]
        eprint!("env,");
        #[cfg(feature = "config")]
        eprint!("config,");
        eprintln!("debug");
    }
    let conf = Config::new();
    conf.log.set();
    debug!("config: {:#?}", conf);

    let orig = pxl::open(&conf.image).context("Failed to load image, the file may not be a supported format")?;
    // Any errors from here on out are likely to not be the users fault, so we can ask for a bug report
    human_panic::setup_panic!();

    let (w, h) = orig.dimensions();
    if w.saturating_mul(h) >= IMAGE_SIZE_THRESHOLD {
        info!("Image is very large, consider --width to render fewer columns");
    }
    let img = match conf.width {
        Dimension::Original => orig,
        Dimension::Fit => pxl::resize(&orig, terminal_columns() as u32, conf.filter),
        Dimension::Limit(cols) => pxl::resize(&orig, cols, conf.filter),
    };
    debug!("rendering {}x{} pixels", img.width(), img.height());

    let markup = match pxl::from_image(&img) {
        Ok(markup) => markup,
        Err(e) => {
            if e.downcast_ref::<InvalidHeight>().is_some() {
                error!("{}", e);
                info!("Resize the image with --width to render it anyway");
                std::process::exit(1);
            }
            return Err(e);
        }
    };
    let out = if conf.ansi { pxl::to_ansi(&markup) } else { markup };

    match &conf.output {
        Some(path) => {
            let mut file = BufWriter::new(File::create(path).with_context(|| format!("could not create {}", path.display()))?);
            file.write_all(out.as_bytes()).and_then(|_| file.flush()).with_context(|| format!("could not write {}", path.display()))?;
            info!("Wrote {} bands to {}", img.height() / 2, path.display());
        }
        None => {
            let mut lock = BufWriter::new(stdout().lock());
            lock.write_all(out.as_bytes()).and_then(|_| lock.flush()).context("could not write to stdout")?;
        }
    }
    Ok(())
}
