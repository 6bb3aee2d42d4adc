mod app;
mod color;
mod config;
mod data;
mod outputs;
mod reactive;
mod state;
mod theme;
mod ui;

use std::sync::Arc;

use anyhow::Result;
use app::PenguinDashboardApp;
use config::DashboardConfig;
use eframe::egui;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    // The dashboard never starts on a partial dataset.
    let state = match bootstrap() {
        Ok(state) => state,
        Err(e) => {
            log::error!("Failed to start dashboard: {e:#}");
            std::process::exit(1);
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Penguins dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(PenguinDashboardApp::new(state)))),
    )
}

fn bootstrap() -> Result<AppState> {
    let config = DashboardConfig::from_env()?;
    log::debug!("Config: {config:?}");

    let dataset = Arc::new(data::loader::load_file(&config.data_path)?);
    if dataset.is_empty() {
        log::warn!("{} contains no penguins", config.data_path.display());
    }
    Ok(AppState::new(dataset, &config))
}
