#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use std::sync::Arc;

use clap::Parser;
use eframe::NativeOptions;
use tokio::runtime::Runtime;

use stock_trend::data::{FetchOptions, Fixtures};
use stock_trend::ui::config::UI_TEXT;
use stock_trend::{AppServices, Cli, ModelSlot, run_app};

fn main() -> eframe::Result {
    // A. Init Logging
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panicked: {:?}", panic_info);
    }));
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    // B. Parse Args
    let args = Cli::parse();
    #[cfg(debug_assertions)]
    log::info!("Parsed arguments: {:?}", args);

    // C. Runtime for provider calls, driven from the UI's request threads
    let rt = Runtime::new().expect("Failed to create Tokio runtime");

    // D. Model: loaded once, shared read-only
    let model_slot = Arc::new(ModelSlot::new(&args.model_path));
    if !args.lazy_model {
        model_slot.preload();
    }

    // E. Fixtures
    let fixtures = Fixtures::load_or_embedded(&args.fixtures_path).unwrap_or_else(|e| {
        log::error!("No fixtures available: {:#}", e);
        Fixtures::default()
    });

    let services = AppServices {
        runtime: rt.handle().clone(),
        model_slot,
        fetch_options: FetchOptions::from(&args),
        rescale_mode: args.rescale,
        fixtures,
    };

    // F. Run Native App (no persisted state between sessions)
    eframe::run_native(
        UI_TEXT.app_title,
        NativeOptions::default(),
        Box::new(move |cc| Ok(run_app(cc, services))),
    )
}
