mod app;
mod convert;
mod messages;
mod panels;
mod states;
mod widget;
mod worker;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1024.0, 720.0])
            .with_min_inner_size([480.0, 360.0])
            .with_title("Enlarge"),
        ..Default::default()
    };

    eframe::run_native(
        "Enlarge",
        options,
        Box::new(|cc| Ok(Box::new(app::EnlargeApp::new(&cc.egui_ctx)?))),
    )
}
