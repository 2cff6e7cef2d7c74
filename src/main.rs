mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use std::path::PathBuf;

use anyhow::Context;
use app::LaunchDashApp;
use config::DashboardConfig;
use eframe::egui;
use state::AppState;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut config = DashboardConfig::discover().context("loading dashboard config")?;
    if let Some(path) = std::env::args_os().nth(1) {
        config.dataset_path = PathBuf::from(path);
    }

    // The dataset is loaded once up front; a bad file stops startup.
    let dataset = data::loader::load_file(&config.dataset_path)
        .with_context(|| format!("loading dataset {}", config.dataset_path.display()))?;

    let title = config.title.clone();
    let mut state = AppState::new(config);
    state.set_dataset(dataset);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(&title)
            .with_inner_size([1200.0, 900.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(|_cc| Ok(Box::new(LaunchDashApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running dashboard window: {e}"))
}
