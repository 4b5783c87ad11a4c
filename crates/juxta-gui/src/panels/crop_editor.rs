use juxta_core::crop::{DisplayMapping, EditSession};
use juxta_core::session::SessionState;

use super::crop_interaction;
use super::helpers::color_swatch;
use crate::app::JuxtaApp;
use crate::convert::upload;
use crate::state::{EditorKey, EditorUi, UIState};

const PREVIEW_MAX_WIDTH: f32 = 300.0;

enum EditorAction {
    Save,
    Cancel,
    Reference(String),
}

pub fn show(ctx: &egui::Context, app: &mut JuxtaApp) {
    let Some(ref mut session) = app.session else {
        return;
    };
    let Some(edit) = session.editor().session().cloned() else {
        if app.editor.loaded.is_some() {
            app.editor.reset();
        }
        return;
    };

    let editor = &mut app.editor;
    let ui_state = &mut app.ui_state;

    sync_reference(ctx, session, &edit, editor, ui_state);

    let sample_name = session
        .config()
        .samples
        .get(edit.sample)
        .map(|s| s.name.clone())
        .unwrap_or_default();
    let references: Vec<String> = session
        .config()
        .samples
        .get(edit.sample)
        .map(|s| {
            session
                .config()
                .methods_with_images(s)
                .into_iter()
                .map(|m| m.name.clone())
                .collect()
        })
        .unwrap_or_default();

    let mut action = None;
    egui::Window::new(format!("Close View: {sample_name}"))
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                color_swatch(ui, edit.color, 12.0);
                let status = if edit.is_new { "new" } else { "editing" };
                ui.strong(format!("{} ({status})", edit.crop_id));
            });

            ui.horizontal_wrapped(|ui| {
                ui.label("Reference:");
                let mut selected = edit.reference_method.clone();
                for name in &references {
                    if ui.radio_value(&mut selected, name.clone(), name).changed() {
                        action = Some(EditorAction::Reference(selected.clone()));
                    }
                }
            });
            ui.separator();

            selection_area(ctx, ui, &edit, editor);

            ui.separator();
            ui.label("Preview");
            match editor.preview {
                Some(ref texture) => {
                    ui.add(
                        egui::Image::from_texture(egui::load::SizedTexture::from_handle(texture))
                            .max_width(PREVIEW_MAX_WIDTH),
                    );
                }
                None => {
                    ui.weak("Drag on the image to select a region");
                }
            }

            ui.separator();
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(editor.selection.is_some(), egui::Button::new("Save"))
                    .clicked()
                {
                    action = Some(EditorAction::Save);
                }
                if ui.button("Cancel").clicked() {
                    action = Some(EditorAction::Cancel);
                }
            });
        });

    if editor.preview_stale && editor.drag_start.is_none() && !editor.moving {
        refresh_preview(ctx, session, editor, ui_state);
    }

    match action {
        Some(EditorAction::Save) => save(session, editor, ui_state),
        Some(EditorAction::Cancel) => {
            session.cancel_crop();
            editor.reset();
            ui_state.add_log("Close view edit cancelled".into());
        }
        Some(EditorAction::Reference(method)) => {
            if let Err(e) = session.select_reference(&method) {
                ui_state.add_log(format!("ERROR: {e}"));
            }
        }
        None => {}
    }
}

/// Load the reference image when the editor session or reference changes.
fn sync_reference(
    ctx: &egui::Context,
    session: &SessionState,
    edit: &EditSession,
    editor: &mut EditorUi,
    ui_state: &mut UIState,
) {
    let key = EditorKey {
        sample: edit.sample,
        crop_id: edit.crop_id.clone(),
        reference: edit.reference_method.clone(),
    };
    if editor.loaded.as_ref() == Some(&key) {
        return;
    }

    let same_crop = editor
        .loaded
        .as_ref()
        .is_some_and(|k| k.sample == key.sample && k.crop_id == key.crop_id);

    match session.reference_display() {
        Ok((image, mapping)) => {
            let texture = upload(ctx, "crop_reference", &image);
            if !same_crop {
                editor.selection = edit.initial_box.map(|b| display_to_rect(&mapping, b));
            }
            editor.reference = Some((texture, mapping));
            editor.preview_stale = true;
        }
        Err(e) => {
            editor.reference = None;
            ui_state.add_log(format!("ERROR: {e}"));
        }
    }
    editor.loaded = Some(key);
}

fn display_to_rect(mapping: &DisplayMapping, crop_box: juxta_core::crop::CropBox) -> egui::Rect {
    let r = mapping.to_display(crop_box);
    egui::Rect::from_min_size(
        egui::pos2(r.left as f32, r.top as f32),
        egui::vec2(r.width as f32, r.height as f32),
    )
}

fn selection_area(ctx: &egui::Context, ui: &mut egui::Ui, edit: &EditSession, editor: &mut EditorUi) {
    let Some((ref texture, mapping)) = editor.reference else {
        ui.label("Reference image unavailable");
        return;
    };
    let texture_id = texture.id();
    let (w, h) = mapping.display_size();
    let image_size = egui::vec2(w as f32, h as f32);

    let (rect, response) = ui.allocate_exact_size(image_size, egui::Sense::click_and_drag());
    ui.painter().image(
        texture_id,
        rect,
        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
        egui::Color32::WHITE,
    );

    if crop_interaction::handle_crop_interaction(ctx, &response, ui, editor, image_size) {
        editor.preview_stale = true;
    }

    if let Some(selection) = editor.selection {
        crop_interaction::draw_crop_overlay(
            ui,
            selection,
            edit.color,
            rect,
            image_size,
            (mapping.original_width, mapping.original_height),
        );
    }
}

fn refresh_preview(
    ctx: &egui::Context,
    session: &SessionState,
    editor: &mut EditorUi,
    ui_state: &mut UIState,
) {
    editor.preview_stale = false;
    editor.preview = None;

    let (Some(rect), Some((_, mapping))) = (editor.display_rect(), editor.reference.as_ref()) else {
        return;
    };
    let Some(crop_box) = mapping.to_original(rect) else {
        return;
    };
    match session.preview(crop_box) {
        Ok(image) => editor.preview = Some(upload(ctx, "crop_preview", &image)),
        Err(e) => ui_state.add_log(format!("Preview failed: {e}")),
    }
}

fn save(session: &mut SessionState, editor: &mut EditorUi, ui_state: &mut UIState) {
    let Some(rect) = editor.display_rect() else {
        return;
    };
    match session.save_crop_display(rect) {
        Ok(id) => {
            ui_state.add_log(format!("Saved close view {id}"));
            ui_state.mark_dirty();
            editor.reset();
        }
        Err(e) => ui_state.add_log(format!("ERROR: {e}")),
    }
}
