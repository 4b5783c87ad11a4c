use juxta_core::config::DisplayOptions;
use juxta_core::consts::MAX_CROPS_PER_SAMPLE;

use super::helpers::color_swatch;
use crate::app::JuxtaApp;
use crate::state::{GridTextures, RowTextures};

/// Something the user clicked inside the grid, applied after drawing.
enum GridAction {
    AddCrop(usize),
    EditCrop(usize, String),
    DeleteCrop(usize, String),
}

pub fn show(ctx: &egui::Context, app: &mut JuxtaApp) {
    let mut actions = Vec::new();

    egui::CentralPanel::default().show(ctx, |ui| {
        let (Some(session), Some(grid)) = (app.session.as_ref(), app.grid.as_ref()) else {
            show_placeholder(ui);
            return;
        };
        let options = &session.options;
        let editing = session.editor().is_editing();

        egui::ScrollArea::both().show(ui, |ui| {
            if grid.rows.is_empty() {
                ui.label("No samples on this page.");
            }
            if options.show_method_names && !grid.methods.is_empty() {
                method_header(ui, grid, options);
                ui.separator();
            }
            for row in &grid.rows {
                sample_row(ui, row, grid, options, editing, &mut actions);
                ui.separator();
            }
            if options.show_descriptions {
                description_table(ui, grid);
            }
            aspect_advisory(ui, grid);
        });
    });

    for action in actions {
        apply(app, action);
    }
}

fn show_placeholder(ui: &mut egui::Ui) {
    ui.centered_and_justified(|ui| {
        ui.label(
            egui::RichText::new("Open a configuration (Ctrl+O) or a set of folders")
                .size(16.0)
                .color(egui::Color32::from_gray(120)),
        );
    });
}

fn column_width(options: &DisplayOptions) -> f32 {
    options.image_width as f32
}

fn method_header(ui: &mut egui::Ui, grid: &GridTextures, options: &DisplayOptions) {
    ui.horizontal(|ui| {
        for method in &grid.methods {
            let (rect, _) = ui.allocate_exact_size(
                egui::vec2(column_width(options), options.method_text_size as f32 * 1.5),
                egui::Sense::hover(),
            );
            ui.put(
                rect,
                egui::Label::new(
                    egui::RichText::new(&method.name)
                        .size(options.method_text_size as f32)
                        .strong(),
                ),
            );
        }
    });
}

fn sample_row(
    ui: &mut egui::Ui,
    row: &RowTextures,
    grid: &GridTextures,
    options: &DisplayOptions,
    editing: bool,
    actions: &mut Vec<GridAction>,
) {
    if row.failed {
        ui.colored_label(
            egui::Color32::from_rgb(220, 80, 80),
            format!("Sample '{}' failed to load", row.name),
        );
    } else {
        ui.horizontal(|ui| {
            for cell in &row.cells {
                let resp = ui.add(egui::Image::from_texture(
                    egui::load::SizedTexture::from_handle(&cell.texture),
                ));
                if cell.missing {
                    resp.on_hover_text(format!("{}: no image", cell.method));
                }
            }
        });
    }

    if options.close_view_enabled {
        close_views(ui, row, grid, options, editing, actions);
    }

    caption(ui, row, options);
}

fn close_views(
    ui: &mut egui::Ui,
    row: &RowTextures,
    grid: &GridTextures,
    options: &DisplayOptions,
    editing: bool,
    actions: &mut Vec<GridAction>,
) {
    for view in &row.close_views {
        ui.horizontal(|ui| {
            color_swatch(ui, view.color, 12.0);
            ui.strong(format!("Close View #{}", view.number));
            if options.show_edit_buttons {
                ui.add_enabled_ui(!editing, |ui| {
                    if ui.small_button("Edit").clicked() {
                        actions.push(GridAction::EditCrop(row.index, view.id.clone()));
                    }
                    if ui.small_button("Delete").clicked() {
                        actions.push(GridAction::DeleteCrop(row.index, view.id.clone()));
                    }
                });
            }
        });
        ui.horizontal(|ui| {
            for (method, thumb) in grid.methods.iter().zip(&view.thumbnails) {
                match thumb {
                    Some(texture) => {
                        ui.add(egui::Image::from_texture(
                            egui::load::SizedTexture::from_handle(texture),
                        ))
                        .on_hover_text(&method.name);
                    }
                    None => {
                        let (rect, _) = ui.allocate_exact_size(
                            egui::vec2(column_width(options), 40.0),
                            egui::Sense::hover(),
                        );
                        ui.put(rect, egui::Label::new("N/A"));
                    }
                }
            }
        });
    }

    if !options.show_edit_buttons || row.failed {
        return;
    }
    if row.can_add_crop {
        let add = ui.add_enabled(!editing, egui::Button::new("Add Crop"));
        if add.clicked() {
            actions.push(GridAction::AddCrop(row.index));
        }
    } else {
        ui.small(format!("Maximum of {MAX_CROPS_PER_SAMPLE} close views reached"));
    }
}

fn caption(ui: &mut egui::Ui, row: &RowTextures, options: &DisplayOptions) {
    let size = options.text_size as f32;
    ui.horizontal_wrapped(|ui| {
        if options.show_sample_names {
            ui.label(egui::RichText::new(&row.name).size(size).strong());
        }
        if options.show_text {
            if let Some(ref text) = row.text {
                if options.show_sample_names {
                    ui.label(egui::RichText::new("|").size(size));
                }
                ui.label(egui::RichText::new(format!("Text: {text}")).size(size));
            }
        }
    });
}

fn description_table(ui: &mut egui::Ui, grid: &GridTextures) {
    ui.heading("Method Descriptions");
    egui::Grid::new("method_descriptions")
        .striped(true)
        .num_columns(2)
        .show(ui, |ui| {
            for method in &grid.methods {
                ui.strong(&method.name);
                ui.label(method.description.as_deref().unwrap_or(""));
                ui.end_row();
            }
        });
}

fn aspect_advisory(ui: &mut egui::Ui, grid: &GridTextures) {
    if grid.aspect_warnings.is_empty() {
        return;
    }
    ui.add_space(8.0);
    egui::CollapsingHeader::new(format!(
        "Aspect ratio advisory ({})",
        grid.aspect_warnings.len()
    ))
    .default_open(false)
    .show(ui, |ui| {
        for w in &grid.aspect_warnings {
            ui.label(format!(
                "{} / {}: aspect {:.3} differs from average {:.3}",
                w.sample, w.method, w.ratio, w.average
            ));
        }
    });
}

fn apply(app: &mut JuxtaApp, action: GridAction) {
    let Some(ref mut session) = app.session else {
        return;
    };
    match action {
        GridAction::AddCrop(sample) => {
            if let Err(e) = session.enter_crop_editor(sample, None) {
                app.ui_state.add_log(format!("ERROR: {e}"));
            }
            app.editor.reset();
        }
        GridAction::EditCrop(sample, id) => {
            if let Err(e) = session.enter_crop_editor(sample, Some(&id)) {
                app.ui_state.add_log(format!("ERROR: {e}"));
            }
            app.editor.reset();
        }
        GridAction::DeleteCrop(sample, id) => {
            session.delete_crop(sample, &id);
            app.ui_state.add_log(format!("Deleted {id} from sample {}", sample + 1));
            app.ui_state.mark_dirty();
        }
    }
}
