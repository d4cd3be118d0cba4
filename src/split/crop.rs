use std::fmt;

use image::{imageops, DynamicImage, GenericImageView};
use serde::Serialize;

/// A `(left, top, right, bottom)` rectangle in source pixel coordinates.
///
/// Coordinates are signed: a centered box on a narrow image can start left
/// of the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CropBox {
    pub left: i64,
    pub top: i64,
    pub right: i64,
    pub bottom: i64,
}

impl CropBox {
    /// Square box centered at `(width / 2, height / 2)`.
    ///
    /// The nominal side is `floor(height * ratio)`; the box extends
    /// `side / 2` in each direction, so odd sides lose one pixel.
    pub fn centered(width: u32, height: u32, ratio: f64) -> Self {
        let cw = i64::from(width / 2);
        let ch = i64::from(height / 2);
        let size = (f64::from(height) * ratio).floor() as i64;
        let half = size / 2;

        Self {
            left: cw - half,
            top: ch - half,
            right: cw + half,
            bottom: ch + half,
        }
    }

    /// Side lengths saturate at `u32::MAX`; an inverted box is empty.
    pub fn width(&self) -> u32 {
        side_length(self.left, self.right)
    }

    pub fn height(&self) -> u32 {
        side_length(self.top, self.bottom)
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Whether the box lies entirely inside a `width` x `height` image.
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.left >= 0
            && self.top >= 0
            && self.right <= i64::from(width)
            && self.bottom <= i64::from(height)
    }
}

fn side_length(start: i64, end: i64) -> u32 {
    u32::try_from(end.saturating_sub(start).max(0)).unwrap_or(u32::MAX)
}

impl fmt::Display for CropBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.left, self.top, self.right, self.bottom
        )
    }
}

/// Extract `crop_box` from `img`. Regions outside the source are zero-filled.
pub fn crop_padded(img: &DynamicImage, crop_box: CropBox) -> DynamicImage {
    let (width, height) = img.dimensions();
    if crop_box.fits_within(width, height) {
        return img.crop_imm(
            crop_box.left as u32,
            crop_box.top as u32,
            crop_box.width(),
            crop_box.height(),
        );
    }

    let mut canvas = DynamicImage::new(crop_box.width(), crop_box.height(), img.color());
    imageops::replace(&mut canvas, img, -crop_box.left, -crop_box.top);
    canvas
}
