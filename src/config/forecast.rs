//! Forecast preprocessing and charting configuration

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// How normalized model outputs are mapped back to price units.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum RescaleMode {
    /// `normalized * (max - min)`. The training minimum is NOT added back,
    /// which reproduces the reference dashboard's charts bit-for-bit.
    #[default]
    ScaleOnly,
    /// `normalized * (max - min) + min`, the exact inverse of the min-max fit.
    Affine,
}

/// Settings for the Forecast Preprocessor and overlays
pub struct ForecastConfig {
    /// Share of the series (in whole percent) that forms the training prefix.
    /// Integer so that the split is an exact floor of `pct * N / 100`.
    pub train_split_pct: usize,
    /// Length of every model input window (and of the training tail carried
    /// into the evaluation series)
    pub window_len: usize,
    /// Moving-average overlay widths (short, long)
    pub ma_short: usize,
    pub ma_long: usize,
    /// Start of the Graph/Data view history
    pub history_start: &'static str,
}

pub const FORECAST: ForecastConfig = ForecastConfig {
    train_split_pct: 70,
    window_len: 100,
    ma_short: 100,
    ma_long: 200,
    history_start: "2010-01-01",
};
