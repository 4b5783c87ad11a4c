use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use juxta_core::config::{Configuration, DisplayOptions};
use juxta_core::export::NoOpReporter;

use crate::app::{format_duration, JuxtaApp};

pub fn show(ctx: &egui::Context, app: &mut JuxtaApp) {
    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                let open_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::O);
                if ui.add(egui::Button::new("Open Configuration...").shortcut_text(ctx.format_shortcut(&open_shortcut))).clicked() {
                    ui.close();
                    open_config(app);
                }

                if ui.button("Open Folders...").clicked() {
                    ui.close();
                    open_folders(app);
                }

                ui.separator();

                let has_session = app.session.is_some();
                let export_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::E);
                if ui.add_enabled(has_session, egui::Button::new("Export PDF...").shortcut_text(ctx.format_shortcut(&export_shortcut))).clicked() {
                    ui.close();
                    export_pdf(app);
                }

                ui.separator();

                if ui.button("Import Options...").clicked() {
                    ui.close();
                    import_options(app);
                }

                if ui.button("Export Options...").clicked() {
                    ui.close();
                    export_options(app);
                }

                ui.separator();

                let quit_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Q);
                if ui.add(egui::Button::new("Quit").shortcut_text(ctx.format_shortcut(&quit_shortcut))).clicked() {
                    ui.close();
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("Edit", |ui| {
                if ui.button("Reset Options").clicked() {
                    ui.close();
                    apply_options(app, DisplayOptions::default());
                    app.ui_state.add_log("Options reset to defaults".into());
                }
            });

            ui.menu_button("Help", |ui| {
                if ui.button("About").clicked() {
                    ui.close();
                    app.show_about = true;
                }
            });
        });

        // Keyboard shortcuts (consumed outside menus)
        if ctx.input_mut(|i| i.consume_shortcut(&egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::O))) {
            open_config(app);
        }
        if app.session.is_some()
            && ctx.input_mut(|i| i.consume_shortcut(&egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::E)))
        {
            export_pdf(app);
        }
        if ctx.input_mut(|i| i.consume_shortcut(&egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Q))) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    });
}

fn report(app: &mut JuxtaApp, result: Result<()>) {
    if let Err(e) = result {
        app.ui_state.add_log(format!("ERROR: {e:#}"));
    }
}

fn open_config(app: &mut JuxtaApp) {
    let Some(path) = rfd::FileDialog::new()
        .add_filter("JSON", &["json"])
        .add_filter("All files", &["*"])
        .pick_file()
    else {
        return;
    };

    let result = Configuration::load_json(&path)
        .with_context(|| format!("Failed to load {}", path.display()))
        .map(|config| {
            app.set_configuration(config, path.display().to_string());
            app.ui_state.config_path = Some(path);
        });
    report(app, result);
}

fn open_folders(app: &mut JuxtaApp) {
    let Some(folders) = rfd::FileDialog::new().pick_folders() else {
        return;
    };

    let result = Configuration::from_folders(&folders)
        .context("Failed to scan folders")
        .map(|config| {
            app.set_configuration(config, format!("{} folders", folders.len()));
            app.ui_state.config_path = None;
        });
    report(app, result);
}

fn export_pdf(app: &mut JuxtaApp) {
    let Some(path) = rfd::FileDialog::new()
        .add_filter("PDF", &["pdf"])
        .set_file_name("comparison.pdf")
        .save_file()
    else {
        return;
    };

    let result = write_pdf(app, &path);
    report(app, result);
}

fn write_pdf(app: &mut JuxtaApp, path: &Path) -> Result<()> {
    let Some(ref session) = app.session else {
        return Ok(());
    };
    let start = Instant::now();
    let bytes = session.export_pdf(&NoOpReporter)?;
    std::fs::write(path, &bytes).with_context(|| format!("Failed to write {}", path.display()))?;
    app.ui_state.add_log(format!(
        "Saved: {} ({})",
        path.display(),
        format_duration(start.elapsed())
    ));
    Ok(())
}

fn import_options(app: &mut JuxtaApp) {
    let Some(path) = rfd::FileDialog::new().add_filter("TOML", &["toml"]).pick_file() else {
        return;
    };

    let result = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))
        .and_then(|content| {
            toml::from_str::<DisplayOptions>(&content)
                .with_context(|| format!("Invalid options in {}", path.display()))
        })
        .map(|options| {
            apply_options(app, options);
            app.ui_state.add_log(format!("Options imported from {}", path.display()));
        });
    report(app, result);
}

fn export_options(app: &mut JuxtaApp) {
    let options = match app.session {
        Some(ref session) => session.options.clone(),
        None => app.ui_state.default_options.clone(),
    };
    let Some(path) = rfd::FileDialog::new()
        .add_filter("TOML", &["toml"])
        .set_file_name("juxta_options.toml")
        .save_file()
    else {
        return;
    };

    let result = toml::to_string_pretty(&options)
        .context("Failed to serialize options")
        .and_then(|content| {
            std::fs::write(&path, content)
                .with_context(|| format!("Failed to write {}", path.display()))
        })
        .map(|()| app.ui_state.add_log(format!("Options saved to {}", path.display())));
    report(app, result);
}

fn apply_options(app: &mut JuxtaApp, options: DisplayOptions) {
    if let Some(ref mut session) = app.session {
        session.options = options.clone();
    }
    app.ui_state.default_options = options;
    app.ui_state.mark_dirty();
}
