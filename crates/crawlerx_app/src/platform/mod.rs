mod app;
mod config;
mod effects;
mod logging;
mod ui;

use std::path::Path;

use crawlerx_engine::{ApiError, EngineHandle};
use crawlerx_logging::{log_info, log_warn};
use eframe::egui;
use thiserror::Error;

use config::{AppConfig, API_URL_ENV, CONFIG_FILENAME};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("engine setup failed: {0}")]
    Engine(#[from] ApiError),
    #[error("window failed: {0}")]
    Ui(#[from] eframe::Error),
}

pub fn run_app() -> Result<(), AppError> {
    let (config, config_error) = AppConfig::load(Path::new(CONFIG_FILENAME));
    let config = config.with_env_override(std::env::var(API_URL_ENV).ok());

    logging::initialize(config.log_destination, config.level_filter());
    if let Some(err) = config_error {
        log_warn!("Using default configuration: {}", err);
    }

    let settings = config.api_settings();
    log_info!(
        "CrawlerX starting; backend {} prefix {:?}",
        settings.base_url,
        settings.api_prefix
    );
    let engine = EngineHandle::new(settings)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(ui::constants::APP_TITLE)
            .with_inner_size(ui::constants::WINDOW_SIZE),
        ..Default::default()
    };
    eframe::run_native(
        ui::constants::APP_TITLE,
        options,
        Box::new(move |cc| Ok(Box::new(app::DashboardApp::new(cc, engine)))),
    )?;
    log_info!("CrawlerX shut down");
    Ok(())
}
