mod app;
mod automation;
mod core;
mod error;
mod omere;
mod settings;
mod tools;
mod ui;

use app::OmereBatchApp;
use eframe::egui;
use settings::AppSettings;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), eframe::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("omere_batch=info")),
        )
        .init();

    // Screen matching and clicks must agree on physical pixels
    crate::core::window::enable_dpi_awareness();

    let settings = AppSettings::load();
    tracing::info!("Settings loaded from {}", AppSettings::base_dir().display());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([860.0, 560.0])
            .with_title("OMERE Batch Runner"),
        ..Default::default()
    };

    eframe::run_native(
        "OMERE Batch Runner",
        options,
        Box::new(move |_cc| Box::new(OmereBatchApp::new(settings))),
    )
}
