use image::{DynamicImage, GenericImageView, Pixel, Rgb, RgbImage, Rgba, RgbaImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;

use crate::consts::OUTLINE_THICKNESS;
use crate::crop::geometry::{CropBox, OverlayTransform};
use crate::crop::store::CropRegion;
use crate::error::{JuxtaError, Result};

use super::normalize::resize_to_width;

/// Outline every region on a copy of `display_image`, oldest first so later
/// regions paint over earlier ones.
///
/// `original_size` must be the true source size, not that of an
/// intermediate square crop.
pub fn draw_all(
    display_image: &DynamicImage,
    crops: &[CropRegion],
    original_size: (u32, u32),
    display_size: (u32, u32),
) -> DynamicImage {
    if crops.is_empty() {
        return display_image.clone();
    }
    let transform = OverlayTransform::new(original_size, display_size);

    if display_image.color().has_alpha() {
        let mut canvas: RgbaImage = display_image.to_rgba8();
        for region in crops {
            let [r, g, b] = region.color.rgb();
            outline(&mut canvas, &transform, region.crop_box, Rgba([r, g, b, 255]));
        }
        DynamicImage::ImageRgba8(canvas)
    } else {
        let mut canvas: RgbImage = display_image.to_rgb8();
        for region in crops {
            outline(&mut canvas, &transform, region.crop_box, Rgb(region.color.rgb()));
        }
        DynamicImage::ImageRgb8(canvas)
    }
}

/// Concentric 1px rectangles, shrinking inwards, with inclusive corners.
fn outline<P: Pixel>(
    canvas: &mut image::ImageBuffer<P, Vec<P::Subpixel>>,
    transform: &OverlayTransform,
    crop_box: CropBox,
    color: P,
) {
    let (left, top, right, bottom) = transform.map(crop_box);
    for i in 0..OUTLINE_THICKNESS as i32 {
        let (x0, y0, x1, y1) = (left + i, top + i, right - i, bottom - i);
        if x1 < x0 || y1 < y0 {
            break;
        }
        let rect = Rect::at(x0, y0).of_size((x1 - x0 + 1) as u32, (y1 - y0 + 1) as u32);
        draw_hollow_rect_mut(canvas, rect, color);
    }
}

/// Crop `image` to `crop_box` (clamped to the image) and resize the result
/// to `target_width`, keeping its aspect ratio.
pub fn crop_and_resize(image: &DynamicImage, crop_box: CropBox, target_width: u32) -> Result<DynamicImage> {
    let (w, h) = image.dimensions();
    let b = crop_box.clamped(w, h).ok_or_else(|| {
        JuxtaError::InvalidCrop(format!("box {crop_box} lies outside the {w}x{h} image"))
    })?;
    let cropped = image.crop_imm(b.left, b.top, b.width(), b.height());
    Ok(resize_to_width(&cropped, target_width))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outline_stops_on_tiny_box() {
        let mut canvas = RgbImage::new(10, 10);
        let transform = OverlayTransform::new((10, 10), (10, 10));
        outline(&mut canvas, &transform, CropBox::new(4, 4, 5, 5), Rgb([255, 0, 0]));
        assert_eq!(canvas.get_pixel(4, 4).0, [255, 0, 0]);
        assert_eq!(canvas.get_pixel(0, 0).0, [0, 0, 0]);
    }
}
