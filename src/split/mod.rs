//! Image split: a full-size background copy plus a centered square crop.
//!
//! The input is fully decoded and every output format is resolved before
//! anything is written, so a bad input leaves the output directory untouched.

mod crop;

pub use crop::{crop_padded, CropBox};

use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat, ImageReader};
use serde::Serialize;
use sprout_common::{Error, Result};

use crate::config::SplitConfig;

/// Result of a successful split.
#[derive(Debug, Clone, Serialize)]
pub struct SplitOutcome {
    pub width: u32,
    pub height: u32,
    pub crop_box: CropBox,
    pub background_path: PathBuf,
    pub crop_path: PathBuf,
}

/// Split `input` into `out_dir/{background_name}` and `out_dir/{crop_name}`.
///
/// # Errors
///
/// - [`Error::NotFound`] if `input` does not exist.
/// - [`Error::Image`] if it cannot be decoded, or an output extension has
///   no known image format.
/// - [`Error::InvalidInput`] if `crop_ratio` is not in `(0, 1]`, or the
///   image is too short to produce a crop.
/// - [`Error::Io`] if the output directory or files cannot be written.
pub fn split_image(input: &Path, out_dir: &Path, config: &SplitConfig) -> Result<SplitOutcome> {
    if !(config.crop_ratio > 0.0 && config.crop_ratio <= 1.0) {
        return Err(Error::invalid_input(format!(
            "crop_ratio must be in (0, 1], got {}",
            config.crop_ratio
        )));
    }

    if !input.is_file() {
        return Err(Error::not_found(input.display().to_string()));
    }

    let img = ImageReader::open(input)?.with_guessed_format()?.decode()?;
    let (width, height) = (img.width(), img.height());
    tracing::info!("Loaded {:?}: {}x{}", input, width, height);

    let crop_box = CropBox::centered(width, height, config.crop_ratio);
    if crop_box.is_empty() {
        return Err(Error::invalid_input(format!(
            "image height {} is too small for a {} crop",
            height, config.crop_ratio
        )));
    }

    let background_path = out_dir.join(&config.background_name);
    let crop_path = out_dir.join(&config.crop_name);
    let background_format = ImageFormat::from_path(&background_path)?;
    let crop_format = ImageFormat::from_path(&crop_path)?;

    std::fs::create_dir_all(out_dir)?;

    save_image(&img, &background_path, background_format)?;
    tracing::debug!("Wrote background copy {:?}", background_path);

    let cropped = crop_padded(&img, crop_box);
    save_image(&cropped, &crop_path, crop_format)?;
    tracing::info!("Wrote crop {} to {:?}", crop_box, crop_path);

    Ok(SplitOutcome {
        width,
        height,
        crop_box,
        background_path,
        crop_path,
    })
}

/// Encode `img` in `format` and write it to `path`.
///
/// JPEG has no alpha channel, so JPEG targets are flattened to RGB8 first.
fn save_image(img: &DynamicImage, path: &Path, format: ImageFormat) -> Result<()> {
    let mut buf = Cursor::new(Vec::new());
    match format {
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(img.to_rgb8()).write_to(&mut buf, format)?,
        _ => img.write_to(&mut buf, format)?,
    }
    std::fs::write(path, buf.into_inner())?;
    Ok(())
}
