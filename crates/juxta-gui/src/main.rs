mod app;
mod convert;
mod panels;
mod state;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Juxta"),
        ..Default::default()
    };

    eframe::run_native(
        "Juxta",
        options,
        Box::new(|cc| Ok(Box::new(app::JuxtaApp::new(&cc.egui_ctx)))),
    )
}
