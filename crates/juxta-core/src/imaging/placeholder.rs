use ab_glyph::{FontRef, PxScale};
use image::{DynamicImage, Rgb, RgbImage};
use imageproc::drawing::{draw_text_mut, text_size};

use crate::consts::{PLACEHOLDER_FILL, PLACEHOLDER_TEXT};

/// Neutral grey image with `caption` centered on it.
pub fn placeholder(width: u32, height: u32, caption: &str) -> DynamicImage {
    let mut img = RgbImage::from_pixel(width, height, Rgb(PLACEHOLDER_FILL));

    // Caption is decoration; a font that fails to parse leaves the plain fill.
    if let Ok(font) = FontRef::try_from_slice(epaint_default_fonts::UBUNTU_LIGHT) {
        let scale = PxScale::from((width.min(height) / 10).max(20) as f32);
        let (text_w, text_h) = text_size(scale, &font, caption);
        let x = (width as i32 - text_w as i32) / 2;
        let y = (height as i32 - text_h as i32) / 2;
        draw_text_mut(&mut img, Rgb(PLACEHOLDER_TEXT), x, y, scale, &font, caption);
    }

    DynamicImage::ImageRgb8(img)
}
