//! Descriptive statistics for the "Show Data" view.

use itertools::Itertools;
use strum::IntoEnumIterator;

use crate::domain::{BarField, PriceSeries};
use crate::utils::maths_utils::{mean, quantile_sorted, sample_std_dev};

/// Statistic labels, in table order
pub const STAT_LABELS: [&str; 8] = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnStats {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (n - 1)
    pub std: f64,
    pub min: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub max: f64,
}

impl ColumnStats {
    pub fn from_values(values: &[f64]) -> Self {
        let sorted: Vec<f64> = values
            .iter()
            .copied()
            .filter(|v| !v.is_nan())
            .sorted_by(|a, b| a.total_cmp(b))
            .collect();

        Self {
            count: sorted.len(),
            mean: if sorted.is_empty() { f64::NAN } else { mean(&sorted) },
            std: if sorted.len() < 2 {
                f64::NAN
            } else {
                sample_std_dev(&sorted)
            },
            min: sorted.first().copied().unwrap_or(f64::NAN),
            p25: quantile_sorted(&sorted, 0.25),
            p50: quantile_sorted(&sorted, 0.50),
            p75: quantile_sorted(&sorted, 0.75),
            max: sorted.last().copied().unwrap_or(f64::NAN),
        }
    }

    /// Values in [`STAT_LABELS`] order
    pub fn as_row(&self) -> [f64; 8] {
        [
            self.count as f64,
            self.mean,
            self.std,
            self.min,
            self.p25,
            self.p50,
            self.p75,
            self.max,
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DataSummary {
    pub ticker: String,
    pub columns: Vec<(BarField, ColumnStats)>,
}

impl DataSummary {
    pub fn stats(&self, field: BarField) -> Option<&ColumnStats> {
        self.columns.iter().find(|(f, _)| *f == field).map(|(_, s)| s)
    }
}

pub fn describe(series: &PriceSeries) -> DataSummary {
    let columns = BarField::iter()
        .map(|field| {
            let values: Vec<f64> = series.bars().iter().map(|bar| bar.field(field)).collect();
            (field, ColumnStats::from_values(&values))
        })
        .collect();

    DataSummary {
        ticker: series.ticker().to_string(),
        columns,
    }
}
