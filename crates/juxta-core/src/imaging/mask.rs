use std::borrow::Cow;
use std::path::Path;

use image::imageops::{self, FilterType};
use image::{DynamicImage, GenericImageView, GrayImage, ImageBuffer, Pixel, Primitive};
use num_traits::{NumCast, ToPrimitive};
use tracing::debug;

/// Load a mask as single-channel intensity, resized to `target_size`.
/// Any failure yields `None`: masks are decoration, never fatal.
pub fn load_mask(path: &Path, target_size: (u32, u32)) -> Option<GrayImage> {
    let decoded = match image::open(path) {
        Ok(img) => img,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "Mask unreadable, skipping");
            return None;
        }
    };
    let gray = decoded.to_luma8();
    Some(fit_mask(&gray, target_size).into_owned())
}

fn fit_mask(mask: &GrayImage, (w, h): (u32, u32)) -> Cow<'_, GrayImage> {
    if mask.dimensions() == (w, h) {
        Cow::Borrowed(mask)
    } else {
        Cow::Owned(imageops::resize(mask, w.max(1), h.max(1), FilterType::Lanczos3))
    }
}

/// Darken every pixel whose mask intensity is exactly zero by
/// `darken_factor` (1.0 = black); pixels under a nonzero mask are kept.
/// The input's colour type is preserved.
pub fn apply_mask(image: &DynamicImage, mask: &GrayImage, darken_factor: f32) -> DynamicImage {
    let mask = fit_mask(mask, image.dimensions());
    let keep = 1.0 - darken_factor.clamp(0.0, 1.0);

    let mut out = image.clone();
    match &mut out {
        DynamicImage::ImageLuma8(buf) => darken_unmasked(buf, &mask, keep),
        DynamicImage::ImageLumaA8(buf) => darken_unmasked(buf, &mask, keep),
        DynamicImage::ImageRgb8(buf) => darken_unmasked(buf, &mask, keep),
        DynamicImage::ImageRgba8(buf) => darken_unmasked(buf, &mask, keep),
        DynamicImage::ImageLuma16(buf) => darken_unmasked(buf, &mask, keep),
        DynamicImage::ImageLumaA16(buf) => darken_unmasked(buf, &mask, keep),
        DynamicImage::ImageRgb16(buf) => darken_unmasked(buf, &mask, keep),
        DynamicImage::ImageRgba16(buf) => darken_unmasked(buf, &mask, keep),
        DynamicImage::ImageRgb32F(buf) => darken_unmasked(buf, &mask, keep),
        DynamicImage::ImageRgba32F(buf) => darken_unmasked(buf, &mask, keep),
        other => {
            let mut rgba = other.to_rgba8();
            darken_unmasked(&mut rgba, &mask, keep);
            *other = DynamicImage::ImageRgba8(rgba);
        }
    }
    out
}

fn darken_unmasked<P: Pixel>(
    buf: &mut ImageBuffer<P, Vec<P::Subpixel>>,
    mask: &GrayImage,
    keep: f32,
) {
    let max = P::Subpixel::DEFAULT_MAX_VALUE.to_f32().unwrap_or(1.0);
    for (x, y, px) in buf.enumerate_pixels_mut() {
        if mask.get_pixel(x, y).0[0] > 0 {
            continue;
        }
        for c in px.channels_mut() {
            let v = c.to_f32().unwrap_or(0.0) * keep;
            *c = NumCast::from(v.clamp(0.0, max)).unwrap_or(*c);
        }
    }
}
