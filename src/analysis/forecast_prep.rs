//! Forecast Preprocessor: train/test split, min-max fit on the training
//! prefix, sliding windows over the normalized evaluation series.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::FORECAST;
#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::domain::PriceSeries;
use crate::error::AppError;
use crate::utils::maths_utils;

/// Partition of a series into a training prefix and a testing suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Split {
    pub training_len: usize,
    pub testing_len: usize,
}

impl Split {
    /// `training_len = floor(n * pct / 100)`, computed in integers so there is
    /// no float rounding at the boundary.
    pub fn at_pct(n: usize, train_split_pct: usize) -> Self {
        let training_len = (n * train_split_pct.min(100)) / 100;
        Self {
            training_len,
            testing_len: n - training_len,
        }
    }

    pub fn total(&self) -> usize {
        self.training_len + self.testing_len
    }
}

/// Min-max normalization fitted on training closes only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleParameters {
    pub min: f64,
    pub max: f64,
}

impl ScaleParameters {
    pub fn fit(training: &[f64]) -> Result<Self, AppError> {
        let (min, max) = maths_utils::get_min_max(training).ok_or(AppError::InsufficientData {
            available: 0,
            required: 1,
        })?;
        if max == min {
            return Err(AppError::DegenerateScale { price: min });
        }
        Ok(Self { min, max })
    }

    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    /// Multiplier taking a price delta into normalized units, `1 / (max - min)`
    pub fn scale(&self) -> f64 {
        1.0 / self.range()
    }

    /// Reciprocal of [`scale`](Self::scale); converts normalized values back to price deltas
    pub fn scale_factor(&self) -> f64 {
        1.0 / self.scale()
    }

    pub fn normalize(&self, value: f64) -> f64 {
        (value - self.min) / self.range()
    }
}

/// Everything the model and the rescaler need for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastInputs {
    /// Model inputs, chronological, each `window_len` long
    pub windows: Vec<Vec<f64>>,
    /// Normalized value immediately following each window
    pub targets: Vec<f64>,
    /// Calendar date of each target
    pub target_dates: Vec<NaiveDate>,
    pub scale: ScaleParameters,
    pub split: Split,
}

impl ForecastInputs {
    pub fn window_count(&self) -> usize {
        self.windows.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForecastPreprocessor {
    pub window_len: usize,
    pub train_split_pct: usize,
}

impl Default for ForecastPreprocessor {
    fn default() -> Self {
        Self {
            window_len: FORECAST.window_len,
            train_split_pct: FORECAST.train_split_pct,
        }
    }
}

impl ForecastPreprocessor {
    /// Fewest observations that can yield a window.
    pub fn min_observations(&self) -> usize {
        self.window_len + 1
    }

    pub fn prepare(&self, series: &PriceSeries) -> Result<ForecastInputs, AppError> {
        let closes = series.closes();
        let n = closes.len();
        let split = Split::at_pct(n, self.train_split_pct);
        let (training, testing) = closes.split_at(split.training_len);

        // Tail of the training prefix gives the first test targets their history
        let tail_start = training.len().saturating_sub(self.window_len);
        let evaluation: Vec<f64> = training[tail_start..]
            .iter()
            .chain(testing.iter())
            .copied()
            .collect();

        if evaluation.len() <= self.window_len {
            return Err(AppError::InsufficientData {
                available: n,
                required: self.min_observations(),
            });
        }

        let scale = ScaleParameters::fit(training)?;
        let normalized: Vec<f64> = evaluation.iter().map(|&v| scale.normalize(v)).collect();

        let (windows, targets): (Vec<Vec<f64>>, Vec<f64>) = (self.window_len..normalized.len())
            .map(|i| (normalized[i - self.window_len..i].to_vec(), normalized[i]))
            .unzip();

        let dates = series.dates();
        let target_dates = dates[n - targets.len()..].to_vec();

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_forecast {
            log::info!(
                "{}: split {}/{} -> {} windows, scale min {:.4} max {:.4}",
                series.ticker(),
                split.training_len,
                split.testing_len,
                windows.len(),
                scale.min,
                scale.max
            );
        }

        Ok(ForecastInputs {
            windows,
            targets,
            target_dates,
            scale,
            split,
        })
    }
}

/// Preprocesses with the configured 70% split and 100-value windows.
pub fn prepare_forecast_inputs(series: &PriceSeries) -> Result<ForecastInputs, AppError> {
    ForecastPreprocessor::default().prepare(series)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn synthetic(n: usize) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let closes: Vec<f64> = (0..n).map(|i| 100.0 + (i as f64 * 0.1).sin() * 5.0 + i as f64 * 0.05).collect();
        PriceSeries::from_closes("TEST", start, &closes)
    }

    #[test]
    fn split_floors_seventy_percent_of_n() {
        assert_eq!(Split::at_pct(150, 70), Split { training_len: 105, testing_len: 45 });
        assert_eq!(Split::at_pct(101, 70), Split { training_len: 70, testing_len: 31 });
        // 0.7 * 143 = 100.1
        assert_eq!(Split::at_pct(143, 70).training_len, 100);
        assert_eq!(Split::at_pct(143, 70).total(), 143);
    }

    #[test]
    fn window_count_equals_testing_len_once_training_covers_a_window() {
        let inputs = ForecastPreprocessor::default().prepare(&synthetic(150)).unwrap();
        assert_eq!(inputs.split.testing_len, 45);
        assert_eq!(inputs.window_count(), 45);
        assert_eq!(inputs.targets.len(), 45);
        assert!(inputs.windows.iter().all(|w| w.len() == 100));
    }

    #[test]
    fn windows_and_targets_are_chronological_and_aligned() {
        let series = synthetic(200);
        let inputs = ForecastPreprocessor::default().prepare(&series).unwrap();
        let closes = series.closes();
        let scale = inputs.scale;

        // Target k is close[140 + k]; its window is the 100 closes before it
        for (k, (window, target)) in inputs.windows.iter().zip(&inputs.targets).enumerate() {
            let idx = 140 + k;
            assert_eq!(*target, scale.normalize(closes[idx]));
            assert_eq!(window[99], scale.normalize(closes[idx - 1]));
            assert_eq!(window[0], scale.normalize(closes[idx - 100]));
        }
        // Each window shifts by one
        assert_eq!(inputs.windows[1][98], inputs.windows[0][99]);
        assert_eq!(inputs.target_dates.first(), series.dates().get(140));
        assert_eq!(inputs.target_dates.last(), series.last_date().as_ref());
    }

    #[test]
    fn scale_is_fit_on_training_prefix_only() {
        let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let mut closes = vec![10.0; 140];
        closes[0] = 5.0;
        closes[1] = 20.0;
        // A testing spike far above the training max must not move the fit
        closes.extend(std::iter::repeat_n(500.0, 60));
        let series = PriceSeries::from_closes("SPIKE", start, &closes);

        let inputs = ForecastPreprocessor::default().prepare(&series).unwrap();
        assert_eq!(inputs.scale, ScaleParameters { min: 5.0, max: 20.0 });
        assert!(inputs.targets.iter().all(|&t| t > 1.0));
    }

    #[test]
    fn boundary_lengths() {
        let prep = ForecastPreprocessor::default();
        assert_eq!(prep.prepare(&synthetic(101)).unwrap().window_count(), 1);
        assert_eq!(
            prep.prepare(&synthetic(100)),
            Err(AppError::InsufficientData {
                available: 100,
                required: 101
            })
        );
        assert!(matches!(
            prep.prepare(&synthetic(0)),
            Err(AppError::InsufficientData { .. })
        ));
    }

    #[test]
    fn constant_training_prices_are_degenerate() {
        let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let mut closes = vec![42.0; 105];
        closes.extend((0..45).map(|i| 42.0 + i as f64));
        let series = PriceSeries::from_closes("FLAT", start, &closes);

        assert_eq!(
            ForecastPreprocessor::default().prepare(&series),
            Err(AppError::DegenerateScale { price: 42.0 })
        );
    }

    #[test]
    fn preprocessing_is_idempotent() {
        let series = synthetic(320);
        assert_eq!(prepare_forecast_inputs(&series).unwrap(), prepare_forecast_inputs(&series).unwrap());
    }
}
