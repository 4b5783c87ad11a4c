use image::{DynamicImage, GenericImageView};
use tracing::debug;

use crate::config::{Configuration, DisplayOptions, Sample};
use crate::crop::CropRegion;
use crate::imaging::{apply_mask, draw_all, load_mask, normalize_path};

/// One main image of the grid, ready to display or export.
#[derive(Clone, Debug)]
pub struct GridCell {
    pub method: String,
    pub image: DynamicImage,
    /// Source aspect ratio before any square crop; 1.0 for placeholders.
    pub aspect_ratio: f64,
    pub was_cropped: bool,
    /// The image could not be loaded and `image` is a placeholder.
    pub missing: bool,
}

/// Normalize one sample/method image, darken it through the sample's mask
/// when masking is on, then outline `regions` on top.
///
/// Placeholders are never masked or outlined.
pub fn render_cell(
    config: &Configuration,
    sample: &Sample,
    method: &str,
    regions: &[CropRegion],
    options: &DisplayOptions,
) -> GridCell {
    let path = config.image_path(sample, method);
    let normalized = normalize_path(
        path.as_deref(),
        options.image_width,
        options.preserve_aspect_ratio,
        &options.placeholder_caption,
    );

    let Some(source_size) = normalized.source_size else {
        return GridCell {
            method: method.to_string(),
            image: normalized.image,
            aspect_ratio: normalized.aspect_ratio,
            was_cropped: false,
            missing: true,
        };
    };

    let mut image = normalized.image;
    if options.mask.enabled {
        match config.existing_mask(sample) {
            Some(mask_path) => {
                if let Some(mask) = load_mask(&mask_path, image.dimensions()) {
                    image = apply_mask(&image, &mask, options.darken_factor());
                }
            }
            None => debug!(sample = %sample.name, "No mask for sample"),
        }
    }

    if options.close_view_enabled && !regions.is_empty() {
        let display_size = image.dimensions();
        image = draw_all(&image, regions, source_size, display_size);
    }

    GridCell {
        method: method.to_string(),
        image,
        aspect_ratio: normalized.aspect_ratio,
        was_cropped: normalized.was_cropped,
        missing: false,
    }
}
