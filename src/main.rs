//! Papershelf - desktop document library panel
//!
//! Manage past papers and textbooks: upload, preview, download, delete.

mod app;
mod core;
mod ui;

use app::PapershelfApp;
use eframe::egui;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> eframe::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::filter::LevelFilter::INFO)
        .init();

    tracing::info!("Starting Papershelf...");

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 720.0])
            .with_min_inner_size([760.0, 520.0])
            .with_title("Papershelf"),
        ..Default::default()
    };

    eframe::run_native(
        "Papershelf",
        native_options,
        Box::new(|cc| Ok(Box::new(PapershelfApp::new(cc)))),
    )
}
