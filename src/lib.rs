#![allow(clippy::collapsible_if)]
#![allow(clippy::type_complexity)]

// Core modules
pub mod analysis;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod models;
pub mod ui;
pub mod utils;

use std::path::PathBuf;

// Re-export commonly used types
pub use analysis::{GraphReport, build_graph_report, prepare_forecast_inputs};
pub use config::RescaleMode;
pub use domain::{DailyBar, PriceRequest, PriceSeries};
pub use error::AppError;
pub use models::{ForecastModel, ModelSlot};
pub use ui::{AppServices, StockTrendApp};

// CLI argument parsing
use clap::Parser;

use crate::config::PERSISTENCE;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Keep fetched prices in a local cache and answer repeat requests from it
    #[arg(long, default_value_t = false)]
    pub price_cache: bool,

    /// With `--price-cache`, ask the Yahoo API first and use the cache as fallback
    #[arg(long, default_value_t = false)]
    pub prefer_api: bool,

    /// Pre-trained forecast model (JSON dense network)
    #[arg(long, default_value = PERSISTENCE.model_path)]
    pub model_path: PathBuf,

    /// Headlines and ticker directory
    #[arg(long, default_value = PERSISTENCE.fixtures_path)]
    pub fixtures_path: PathBuf,

    /// How normalized forecasts are mapped back to prices
    #[arg(long, value_enum, default_value_t = RescaleMode::ScaleOnly)]
    pub rescale: RescaleMode,

    /// Defer loading the model until the first forecast is requested
    #[arg(long, default_value_t = false)]
    pub lazy_model: bool,
}

/// Main application entry point - creates the GUI app
/// This is the public API for the binary to call
pub fn run_app(cc: &eframe::CreationContext, services: AppServices) -> Box<dyn eframe::App> {
    Box::new(ui::StockTrendApp::new(cc, services))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_defaults() {
        let args = Cli::parse_from(["stock-trend"]);
        assert!(!args.prefer_api);
        assert!(!args.price_cache);
        assert!(!args.lazy_model);
        assert_eq!(args.rescale, RescaleMode::ScaleOnly);
        assert_eq!(args.model_path, PathBuf::from("models/forecast_model.json"));
        assert_eq!(args.fixtures_path, PathBuf::from("assets/fixtures.json"));
    }

    #[test]
    fn cli_rescale_flag() {
        let args = Cli::parse_from(["stock-trend", "--rescale", "affine", "--prefer-api"]);
        assert_eq!(args.rescale, RescaleMode::Affine);
        assert!(args.prefer_api);
    }
}
