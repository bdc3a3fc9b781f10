//! Per-request analysis: overlays, forecast alignment and rescaling.

use std::time::Instant;

use chrono::NaiveDate;

use crate::analysis::forecast_prep::{ForecastPreprocessor, ScaleParameters, Split};
use crate::analysis::moving_average::rolling_mean;
use crate::analysis::rescale::rescale;
use crate::config::{FORECAST, RescaleMode};
use crate::domain::PriceSeries;
use crate::error::AppError;
use crate::models::{ForecastModel, ModelSlot};

/// Original vs predicted prices over the testing tail, in price units.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastReport {
    pub dates: Vec<NaiveDate>,
    pub actual: Vec<f64>,
    pub predicted: Vec<f64>,
    pub scale: ScaleParameters,
    pub split: Split,
    pub mode: RescaleMode,
}

pub fn run_forecast(
    series: &PriceSeries,
    model: &dyn ForecastModel,
    mode: RescaleMode,
) -> Result<ForecastReport, AppError> {
    let preprocessor = ForecastPreprocessor::default();
    if model.window_len() != preprocessor.window_len {
        return Err(AppError::ModelUnavailable(format!(
            "model expects windows of {} values, preprocessing produces {}",
            model.window_len(),
            preprocessor.window_len
        )));
    }

    let inputs = preprocessor.prepare(series)?;
    let predictions = model.predict(&inputs.windows)?;
    if predictions.len() != inputs.window_count() {
        return Err(AppError::ModelOutput(format!(
            "{} predictions for {} windows",
            predictions.len(),
            inputs.window_count()
        )));
    }
    if let Some(idx) = predictions.iter().position(|p| !p.is_finite()) {
        return Err(AppError::ModelOutput(format!(
            "non-finite prediction {} for window {}",
            predictions[idx], idx
        )));
    }

    Ok(ForecastReport {
        dates: inputs.target_dates,
        actual: rescale(&inputs.targets, &inputs.scale, mode),
        predicted: rescale(&predictions, &inputs.scale, mode),
        scale: inputs.scale,
        split: inputs.split,
        mode,
    })
}

/// Everything the Graph view draws for one ticker.
#[derive(Debug, Clone)]
pub struct GraphReport {
    pub ticker: String,
    pub dates: Vec<NaiveDate>,
    pub closes: Vec<f64>,
    pub ma_short: Vec<Option<f64>>,
    pub ma_long: Vec<Option<f64>>,
    /// Forecast failures only hide the last chart
    pub forecast: Result<ForecastReport, AppError>,
}

pub fn build_graph_report(
    series: &PriceSeries,
    model_slot: &ModelSlot,
    mode: RescaleMode,
) -> Result<GraphReport, AppError> {
    if series.is_empty() {
        return Err(AppError::NoData {
            ticker: series.ticker().to_string(),
        });
    }

    let start_time = Instant::now();
    let closes = series.closes();
    let forecast = model_slot.get().and_then(|model| run_forecast(series, model.as_ref(), mode));

    match &forecast {
        Ok(report) => log::info!(
            "{}: {} bars, {} forecast points in {:?}",
            series.ticker(),
            closes.len(),
            report.predicted.len(),
            start_time.elapsed()
        ),
        Err(e) => log::warn!("{}: forecast skipped: {}", series.ticker(), e),
    }

    Ok(GraphReport {
        ticker: series.ticker().to_string(),
        dates: series.dates(),
        ma_short: rolling_mean(&closes, FORECAST.ma_short),
        ma_long: rolling_mean(&closes, FORECAST.ma_long),
        closes,
        forecast,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    /// Predicts the mean of each window
    struct MeanModel;

    impl ForecastModel for MeanModel {
        fn window_len(&self) -> usize {
            100
        }

        fn predict(&self, windows: &[Vec<f64>]) -> Result<Vec<f64>, AppError> {
            Ok(windows.iter().map(|w| w.iter().sum::<f64>() / w.len() as f64).collect())
        }
    }

    struct ShortModel;

    impl ForecastModel for ShortModel {
        fn window_len(&self) -> usize {
            100
        }

        fn predict(&self, windows: &[Vec<f64>]) -> Result<Vec<f64>, AppError> {
            Ok(vec![0.0; windows.len().saturating_sub(1)])
        }
    }

    /// Returns NaN for every window
    struct NanModel;

    impl ForecastModel for NanModel {
        fn window_len(&self) -> usize {
            100
        }

        fn predict(&self, windows: &[Vec<f64>]) -> Result<Vec<f64>, AppError> {
            Ok(vec![f64::NAN; windows.len()])
        }
    }

    fn ramp_series() -> PriceSeries {
        // close[j] = 100 + j for 200 days
        let closes: Vec<f64> = (0..200).map(|j| 100.0 + j as f64).collect();
        PriceSeries::from_closes("TEST", NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(), &closes)
    }

    #[test]
    fn end_to_end_with_window_mean_model() {
        let series = ramp_series();
        // Training is close[0..140] = 100..=239, so min 100 and range 139.
        // The window before index j averages to j + 49.5 in price units.
        let scale_only = run_forecast(&series, &MeanModel, RescaleMode::ScaleOnly).unwrap();
        assert_eq!(scale_only.scale, ScaleParameters { min: 100.0, max: 239.0 });
        assert_eq!(scale_only.predicted.len(), 60);
        for (k, (pred, actual)) in scale_only.predicted.iter().zip(&scale_only.actual).enumerate() {
            let j = (140 + k) as f64;
            assert!(approx_eq(*pred, j - 50.5));
            assert!(approx_eq(*actual, j));
        }

        let affine = run_forecast(&series, &MeanModel, RescaleMode::Affine).unwrap();
        assert!(approx_eq(affine.predicted[0], 140.0 + 49.5));
        assert!(approx_eq(affine.actual[59], 299.0));
        assert_eq!(affine.dates.first(), series.dates().get(140));
    }

    #[test]
    fn short_model_batch_is_rejected() {
        assert!(matches!(
            run_forecast(&ramp_series(), &ShortModel, RescaleMode::ScaleOnly),
            Err(AppError::ModelOutput(_))
        ));
    }

    #[test]
    fn non_finite_predictions_are_rejected() {
        assert!(matches!(
            run_forecast(&ramp_series(), &NanModel, RescaleMode::Affine),
            Err(AppError::ModelOutput(_))
        ));

        let slot = ModelSlot::with_model(Arc::new(NanModel));
        let report = build_graph_report(&ramp_series(), &slot, RescaleMode::ScaleOnly).unwrap();
        assert_eq!(report.closes.len(), 200);
        assert!(matches!(report.forecast, Err(AppError::ModelOutput(_))));
    }

    #[test]
    fn graph_report_keeps_price_charts_when_model_is_missing() {
        let slot = ModelSlot::new("missing/model.json");
        let report = build_graph_report(&ramp_series(), &slot, RescaleMode::ScaleOnly).unwrap();
        assert_eq!(report.closes.len(), 200);
        assert_eq!(report.ma_short.iter().filter(|v| v.is_some()).count(), 101);
        assert_eq!(report.ma_long.iter().filter(|v| v.is_some()).count(), 1);
        assert!(matches!(report.forecast, Err(AppError::ModelUnavailable(_))));
    }

    #[test]
    fn graph_report_with_loaded_model() {
        let slot = ModelSlot::with_model(Arc::new(MeanModel));
        let report = build_graph_report(&ramp_series(), &slot, RescaleMode::Affine).unwrap();
        assert_eq!(report.forecast.unwrap().predicted.len(), 60);

        let empty = build_graph_report(&PriceSeries::empty("ZZZZ"), &slot, RescaleMode::Affine);
        assert!(matches!(empty, Err(AppError::NoData { .. })));
    }
}
