use crate::app::JuxtaApp;

pub fn show(ctx: &egui::Context, app: &mut JuxtaApp) {
    egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
        ui.add_space(2.0);

        // Log area, fixed height for 4 lines.
        let line_height = ui.text_style_height(&egui::TextStyle::Body);
        let spacing = ui.spacing().item_spacing.y;
        let log_height = line_height * 4.0 + spacing * 3.0;

        egui::ScrollArea::vertical()
            .max_height(log_height)
            .min_scrolled_height(log_height)
            .stick_to_bottom(true)
            .show(ui, |ui| {
                if app.ui_state.log_messages.is_empty() {
                    for _ in 0..4 {
                        ui.label("");
                    }
                } else {
                    for msg in &app.ui_state.log_messages {
                        ui.label(msg);
                    }
                }
            });

        ui.horizontal(|ui| {
            match app.session {
                Some(ref session) => {
                    let config = session.config();
                    let page = session.page();
                    ui.label(format!(
                        "{} methods, {} samples",
                        config.methods.len(),
                        config.samples.len()
                    ));
                    ui.separator();
                    if page.is_empty() {
                        ui.label("No samples on this page");
                    } else {
                        ui.label(format!("Showing {}-{}", page.start + 1, page.end));
                    }
                    ui.separator();
                    let close_views: usize = session
                        .crops()
                        .samples()
                        .map(|i| session.crops().count(i))
                        .sum();
                    ui.label(format!("Close views: {close_views}"));
                }
                None => {
                    ui.label("No configuration loaded");
                }
            }
            if let Some(ref path) = app.ui_state.config_path {
                ui.separator();
                ui.label(path.display().to_string());
            }
        });

        ui.add_space(2.0);
    });
}
