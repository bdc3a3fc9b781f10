use anyhow::{Context, Result};
use std::path::PathBuf;

use stock_trend::config::{FORECAST, PERSISTENCE};
use stock_trend::models::forecast_model::{DenseForecastModel, demo_artifact};

/// Weight ratio between consecutive window positions
const DEMO_DECAY: f64 = 0.95;

fn main() -> Result<()> {
    build_demo_model()
}

fn build_demo_model() -> Result<()> {
    let output_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(PERSISTENCE.model_path));

    let artifact = demo_artifact(FORECAST.window_len, DEMO_DECAY);
    // Round-trip through the loader's validation before writing
    let model = DenseForecastModel::from_artifact(artifact.clone())?;

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(&artifact).context("Failed to encode model")?;
    std::fs::write(&output_path, json)
        .with_context(|| format!("Failed to write model to {}", output_path.display()))?;

    println!(
        "Demo model '{}' (window {}) written to {:?}",
        model.name(),
        FORECAST.window_len,
        output_path
    );
    Ok(())
}
