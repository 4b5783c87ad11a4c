use std::path::Path;

use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};
use tracing::{debug, warn};

use crate::consts::SQUARE_TOLERANCE;
use crate::crop::geometry::CropBox;
use crate::error::Result;

use super::placeholder::placeholder;

/// A source image prepared for grid display.
#[derive(Clone, Debug)]
pub struct Normalized {
    pub image: DynamicImage,
    /// Aspect ratio (w/h) of the source before any square crop.
    pub aspect_ratio: f64,
    /// True when the source was center-cropped to a square.
    pub was_cropped: bool,
    /// Native size of the source; `None` for placeholders.
    pub source_size: Option<(u32, u32)>,
}

impl Normalized {
    pub fn is_placeholder(&self) -> bool {
        self.source_size.is_none()
    }
}

pub fn aspect_ratio(width: u32, height: u32) -> f64 {
    width as f64 / height.max(1) as f64
}

/// Whether a ratio lies outside the tolerance band around 1:1.
pub fn needs_square_crop(ratio: f64) -> bool {
    (ratio - 1.0).abs() > SQUARE_TOLERANCE
}

/// Centered square box using the shorter side.
pub fn center_square_box(width: u32, height: u32) -> CropBox {
    let side = width.min(height);
    let left = (width - side) / 2;
    let top = (height - side) / 2;
    CropBox::new(left, top, left + side, top + side)
}

/// Resize to exactly `target_width` wide, keeping the aspect ratio.
pub fn resize_to_width(image: &DynamicImage, target_width: u32) -> DynamicImage {
    let target_width = target_width.max(1);
    let (w, h) = image.dimensions();
    let ratio = aspect_ratio(w, h);
    let target_height = ((target_width as f64 / ratio).round() as u32).max(1);
    image.resize_exact(target_width, target_height, FilterType::Lanczos3)
}

/// Normalize a decoded image: optional center square crop, then resize.
pub fn normalize(image: &DynamicImage, target_width: u32, preserve_aspect_ratio: bool) -> Normalized {
    let (w, h) = image.dimensions();
    let ratio = aspect_ratio(w, h);
    let crop = needs_square_crop(ratio) && !preserve_aspect_ratio;

    let resized = if crop {
        let b = center_square_box(w, h);
        resize_to_width(&image.crop_imm(b.left, b.top, b.width(), b.height()), target_width)
    } else {
        resize_to_width(image, target_width)
    };

    Normalized {
        image: resized,
        aspect_ratio: ratio,
        was_cropped: crop,
        source_size: Some((w, h)),
    }
}

/// Decode an image file.
pub fn open_image(path: &Path) -> Result<DynamicImage> {
    Ok(image::open(path)?)
}

/// Load and normalize an image, falling back to a `target_width` square
/// placeholder when the path is absent, missing or undecodable.
pub fn normalize_path(
    path: Option<&Path>,
    target_width: u32,
    preserve_aspect_ratio: bool,
    caption: &str,
) -> Normalized {
    let fallback = || Normalized {
        image: placeholder(target_width.max(1), target_width.max(1), caption),
        aspect_ratio: 1.0,
        was_cropped: false,
        source_size: None,
    };

    let Some(path) = path else {
        return fallback();
    };
    if !path.is_file() {
        debug!(path = %path.display(), "Image missing, using placeholder");
        return fallback();
    }
    match open_image(path) {
        Ok(img) => normalize(&img, target_width, preserve_aspect_ratio),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to decode image, using placeholder");
            fallback()
        }
    }
}
