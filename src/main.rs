//! Chart Gallery - Interactive charts over live synthetic data
//!
//! A Rust application presenting thirty chart types, with stock and weather
//! feeds that keep growing on a refresh timer.

mod charts;
mod config;
mod data;
mod gui;
mod layout;
mod state;
mod stats;

use config::AppConfig;
use eframe::egui;
use gui::GalleryApp;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("chart_gallery=info")),
        )
        .init();

    let config_path = AppConfig::default_path();
    let config = AppConfig::load_or_default(&config_path);
    info!(
        interval_ms = config.refresh_interval_ms,
        capacity = config.live_capacity,
        "Starting Chart Gallery"
    );

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 860.0])
            .with_min_inner_size([1000.0, 640.0])
            .with_title("Chart Gallery"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Chart Gallery",
        options,
        Box::new(move |cc| Ok(Box::new(GalleryApp::new(cc, config, config_path)))),
    )
}
