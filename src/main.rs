// src/main.rs
use std::sync::Arc;

use anyhow::{Context, Result};
use eframe::egui;
use tracing::info;
use tracing_subscriber::EnvFilter;

use euromillions_dashboard::api::HttpAnalysisClient;
use euromillions_dashboard::app::DashboardApp;
use euromillions_dashboard::dashboard::Dashboard;
use euromillions_dashboard::file::RonFileStore;
use euromillions_dashboard::settings::Settings;
use euromillions_dashboard::ui::EguiClipboard;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = Settings::load()?;
    info!(api = %settings.api_base_url, "Starting dashboard");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    let source = Arc::new(HttpAnalysisClient::new(&settings));
    let store = RonFileStore::open(settings.resolved_store_path());
    let toast_duration = settings.toast_duration();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([settings.window_width, settings.window_height])
            .with_min_inner_size([640.0, 480.0])
            .with_title("EuroMilhões Dashboard"),
        ..Default::default()
    };

    eframe::run_native(
        "EuroMilhões Dashboard",
        options,
        Box::new(move |cc| {
            let clipboard = EguiClipboard::new(cc.egui_ctx.clone());
            let dashboard = Dashboard::new(store, clipboard, toast_duration);
            Box::new(DashboardApp::new(&cc.egui_ctx, dashboard, source, runtime))
        }),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run application: {}", e))
}
