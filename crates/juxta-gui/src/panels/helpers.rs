use juxta_core::crop::CropColor;

pub(crate) fn section_header(
    ui: &mut egui::Ui,
    label: &str,
    status: Option<&str>,
    color: Option<egui::Color32>,
) {
    let frame = if let Some(c) = color {
        egui::Frame::NONE
            .fill(c)
            .inner_margin(4.0)
            .corner_radius(2.0)
    } else {
        egui::Frame::NONE.inner_margin(4.0)
    };
    frame.show(ui, |ui| {
        ui.horizontal(|ui| {
            ui.strong(label);
            if let Some(s) = status {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.small(s);
                });
            }
        });
    });
}

pub(crate) fn crop_color32(color: CropColor) -> egui::Color32 {
    let [r, g, b] = color.rgb();
    egui::Color32::from_rgb(r, g, b)
}

/// Small filled square in a close-view colour.
pub(crate) fn color_swatch(ui: &mut egui::Ui, color: CropColor, size: f32) {
    let (rect, _) = ui.allocate_exact_size(egui::vec2(size, size), egui::Sense::hover());
    ui.painter().rect_filled(rect, 2.0, crop_color32(color));
}
