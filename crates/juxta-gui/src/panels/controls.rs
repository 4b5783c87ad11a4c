use juxta_core::config::{DisplayOptions, Method};

use super::helpers::section_header;
use crate::app::JuxtaApp;

const LEFT_PANEL_WIDTH: f32 = 260.0;

pub fn show(ctx: &egui::Context, app: &mut JuxtaApp) {
    egui::SidePanel::left("controls")
        .default_width(LEFT_PANEL_WIDTH)
        .resizable(true)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.set_min_width(LEFT_PANEL_WIDTH - 20.0);

                let Some(ref mut session) = app.session else {
                    ui.label("Open a configuration to begin.");
                    return;
                };

                let before = session.options.clone();
                let total = session.config().samples.len();
                let methods = session.config().methods.clone();
                let masks_available = session.config().masks_available();
                let editing = session.editor().is_editing();

                ui.add_enabled_ui(!editing, |ui| {
                    let options = &mut session.options;
                    pagination_section(ui, options, total);
                    ui.separator();
                    methods_section(ui, options, &methods);
                    ui.separator();
                    display_section(ui, options);
                    ui.separator();
                    mask_section(ui, options, masks_available);
                });

                if session.options != before {
                    app.ui_state.default_options = session.options.clone();
                    app.ui_state.mark_dirty();
                }
            });
        });
}

fn pagination_section(ui: &mut egui::Ui, options: &mut DisplayOptions, total: usize) {
    let range = options.sample_range(total);
    let status = if range.is_empty() {
        "empty".to_string()
    } else {
        format!("{}-{} of {total}", range.start + 1, range.end)
    };
    section_header(ui, "Samples", Some(&status), None);

    ui.horizontal(|ui| {
        let step = options.rows_per_page.max(1);
        if ui.add_enabled(options.start_index > 0, egui::Button::new("< Prev")).clicked() {
            options.start_index = options.start_index.saturating_sub(step);
        }
        if ui.add_enabled(range.end < total, egui::Button::new("Next >")).clicked() {
            options.start_index = range.end;
        }
    });

    let last = total.saturating_sub(1);
    ui.horizontal(|ui| {
        ui.label("First sample:");
        let mut first = options.start_index + 1;
        if ui.add(egui::DragValue::new(&mut first).range(1..=last + 1)).changed() {
            options.start_index = first - 1;
        }
    });
    ui.horizontal(|ui| {
        ui.label("Rows per page:");
        ui.add(egui::DragValue::new(&mut options.rows_per_page).range(1..=50));
    });
}

fn methods_section(ui: &mut egui::Ui, options: &mut DisplayOptions, methods: &[Method]) {
    let shown = options
        .visible_methods
        .as_ref()
        .map_or(methods.len(), |v| methods.iter().filter(|m| v.contains(&m.name)).count());
    section_header(ui, "Methods", Some(&format!("{shown}/{}", methods.len())), None);

    let mut visible: Vec<bool> = methods
        .iter()
        .map(|m| options.visible_methods.as_ref().map_or(true, |v| v.contains(&m.name)))
        .collect();

    let mut changed = false;
    for (method, on) in methods.iter().zip(visible.iter_mut()) {
        let mut resp = ui.checkbox(on, &method.name);
        if let Some(ref description) = method.description {
            resp = resp.on_hover_text(description);
        }
        changed |= resp.changed();
    }

    ui.horizontal(|ui| {
        if ui.small_button("All").clicked() {
            visible.iter_mut().for_each(|v| *v = true);
            changed = true;
        }
        if ui.small_button("None").clicked() {
            visible.iter_mut().for_each(|v| *v = false);
            changed = true;
        }
    });

    if changed {
        options.visible_methods = if visible.iter().all(|v| *v) {
            None
        } else {
            Some(
                methods
                    .iter()
                    .zip(&visible)
                    .filter(|(_, on)| **on)
                    .map(|(m, _)| m.name.clone())
                    .collect(),
            )
        };
    }
}

fn display_section(ui: &mut egui::Ui, options: &mut DisplayOptions) {
    section_header(ui, "Display", None, None);

    ui.horizontal(|ui| {
        ui.label("Image width:");
        ui.add(egui::DragValue::new(&mut options.image_width).range(64..=2048).suffix(" px"));
    });
    ui.checkbox(&mut options.preserve_aspect_ratio, "Preserve aspect ratio")
        .on_hover_text("Off: center-crop non-square images to squares");
    ui.checkbox(&mut options.show_method_names, "Method names");
    ui.checkbox(&mut options.show_sample_names, "Sample names");
    ui.checkbox(&mut options.show_text, "Sample text");
    ui.checkbox(&mut options.show_descriptions, "Method descriptions");
    ui.checkbox(&mut options.close_view_enabled, "Close views");
    ui.add_enabled_ui(options.close_view_enabled, |ui| {
        ui.checkbox(&mut options.show_edit_buttons, "Edit buttons");
    });

    ui.add(egui::Slider::new(&mut options.text_size, 8..=32).text("Text size"));
    ui.add(egui::Slider::new(&mut options.method_text_size, 8..=36).text("Method size"));

    ui.horizontal(|ui| {
        ui.label("Missing image:");
        ui.text_edit_singleline(&mut options.placeholder_caption);
    });
}

fn mask_section(ui: &mut egui::Ui, options: &mut DisplayOptions, masks_available: bool) {
    let status = if masks_available { None } else { Some("no masks") };
    section_header(ui, "Mask", status, None);

    ui.add_enabled_ui(masks_available, |ui| {
        ui.checkbox(&mut options.mask.enabled, "Apply mask");
        ui.add_enabled_ui(options.mask.enabled, |ui| {
            ui.add(egui::Slider::new(&mut options.mask.darken_factor, 0.0..=1.0).text("Darken"));
        });
    });
}
