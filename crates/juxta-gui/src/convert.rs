use image::DynamicImage;

/// Convert any decoded image to an egui ColorImage (straight alpha).
pub fn dynamic_to_color_image(image: &DynamicImage) -> egui::ColorImage {
    let rgba = image.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw())
}

pub fn upload(ctx: &egui::Context, name: &str, image: &DynamicImage) -> egui::TextureHandle {
    ctx.load_texture(
        name,
        dynamic_to_color_image(image),
        egui::TextureOptions::LINEAR,
    )
}
