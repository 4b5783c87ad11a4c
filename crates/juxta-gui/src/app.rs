use juxta_core::config::Configuration;
use juxta_core::session::SessionState;

use crate::panels;
use crate::state::{EditorUi, GridTextures, UIState};

pub struct JuxtaApp {
    pub session: Option<SessionState>,
    pub grid: Option<GridTextures>,
    pub ui_state: UIState,
    pub editor: EditorUi,
    pub show_about: bool,
}

impl JuxtaApp {
    pub fn new(_ctx: &egui::Context) -> Self {
        Self {
            session: None,
            grid: None,
            ui_state: UIState::default(),
            editor: EditorUi::default(),
            show_about: false,
        }
    }

    /// Install a configuration. An unchanged configuration keeps its close views.
    pub fn set_configuration(&mut self, config: Configuration, label: String) {
        self.ui_state.add_log(format!(
            "Opened: {label} ({} methods, {} samples)",
            config.methods.len(),
            config.samples.len()
        ));
        match self.session {
            Some(ref mut session) => {
                if session.replace_configuration(config) {
                    self.ui_state.add_log("Configuration changed, close views cleared".into());
                }
            }
            None => {
                let options = self.ui_state.default_options.clone();
                self.session = Some(SessionState::new(config, options));
            }
        }
        self.editor.reset();
        self.ui_state.mark_dirty();
    }

    fn refresh_grid(&mut self, ctx: &egui::Context) {
        if !self.ui_state.dirty {
            return;
        }
        self.ui_state.dirty = false;
        self.grid = self
            .session
            .as_ref()
            .map(|session| GridTextures::upload(ctx, session.render_grid()));
    }
}

impl eframe::App for JuxtaApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        panels::menu_bar::show(ctx, self);
        panels::status::show(ctx, self);
        panels::controls::show(ctx, self);
        panels::crop_editor::show(ctx, self);

        self.refresh_grid(ctx);
        panels::grid::show(ctx, self);

        // About dialog
        if self.show_about {
            egui::Window::new("About Juxta")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("Juxta");
                        ui.label("Side-by-side image comparison");
                        ui.add_space(8.0);
                        ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                        ui.add_space(8.0);
                        if ui.button("Close").clicked() {
                            self.show_about = false;
                        }
                    });
                });
        }
    }
}

pub fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs_f32();
    if secs < 1.0 {
        format!("{:.0}ms", d.as_millis())
    } else if secs < 60.0 {
        format!("{secs:.1}s")
    } else {
        let mins = secs / 60.0;
        format!("{mins:.1}min")
    }
}
