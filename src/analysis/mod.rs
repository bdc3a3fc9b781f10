// Price series analysis: overlays, forecast preprocessing, summaries
pub mod comparison;
pub mod forecast_prep;
pub mod moving_average;
pub mod pipeline;
pub mod rescale;
pub mod summary;

// Re-export commonly used types
pub use comparison::{ComparisonSeries, compare_range, comparison_request};
pub use forecast_prep::{ForecastInputs, ForecastPreprocessor, ScaleParameters, Split, prepare_forecast_inputs};
pub use moving_average::rolling_mean;
pub use pipeline::{ForecastReport, GraphReport, build_graph_report, run_forecast};
pub use rescale::rescale;
pub use summary::{ColumnStats, DataSummary, STAT_LABELS, describe};
