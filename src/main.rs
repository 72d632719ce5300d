mod app;
mod color;
mod config;
mod data;
mod feed;
mod state;
mod stats;
mod ui;

use std::sync::Arc;

use app::DashboardApp;
use config::DashboardConfig;
use eframe::egui;
use state::Session;

fn main() -> eframe::Result {
    env_logger::init();

    let config = DashboardConfig::default();
    let dataset = Arc::new(data::loader::load_or_empty(&config.data_path));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Healthcare Expenditure Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(DashboardApp::new(Session::new(dataset, config))))),
    )
}
