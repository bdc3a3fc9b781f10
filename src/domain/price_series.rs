use anyhow::{Result, bail};
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::daily_bar::DailyBar;

// ============================================================================
// PriceSeries: daily observations for one ticker, strictly increasing by date
// ============================================================================

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct PriceSeries {
    ticker: String,
    bars: Vec<DailyBar>,
}

impl PriceSeries {
    /// Validating constructor: dates must be strictly increasing.
    pub fn new(ticker: impl Into<String>, bars: Vec<DailyBar>) -> Result<Self> {
        let ticker = ticker.into();
        if let Some(pair) = bars.windows(2).find(|w| w[0].date >= w[1].date) {
            bail!(
                "{}: dates must be strictly increasing ({} then {})",
                ticker,
                pair[0].date,
                pair[1].date
            );
        }
        Ok(Self { ticker, bars })
    }

    /// Sorts by date and keeps the last bar seen for any duplicated date.
    pub fn from_unordered(ticker: impl Into<String>, mut bars: Vec<DailyBar>) -> Self {
        // Stable sort keeps arrival order within a date, so "last" means last received
        bars.sort_by_key(|bar| bar.date);
        let mut deduped: Vec<DailyBar> = Vec::with_capacity(bars.len());
        for bar in bars {
            match deduped.last_mut() {
                Some(prev) if prev.date == bar.date => *prev = bar,
                _ => deduped.push(bar),
            }
        }
        Self {
            ticker: ticker.into(),
            bars: deduped,
        }
    }

    /// Consecutive calendar days starting at `start`, one per close.
    pub fn from_closes(ticker: impl Into<String>, start: NaiveDate, closes: &[f64]) -> Self {
        let bars = closes
            .iter()
            .enumerate()
            .filter_map(|(i, &close)| {
                start
                    .checked_add_days(Days::new(i as u64))
                    .map(|date| DailyBar::from_close(date, close))
            })
            .collect();
        Self {
            ticker: ticker.into(),
            bars,
        }
    }

    pub fn empty(ticker: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            bars: Vec::new(),
        }
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn bars(&self) -> &[DailyBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|bar| bar.close).collect()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.bars.iter().map(|bar| bar.date).collect()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.bars.last().map(|bar| bar.date)
    }

    /// Bars with `start <= date <= end`. Order is preserved.
    pub fn between(&self, start: NaiveDate, end: NaiveDate) -> PriceSeries {
        Self {
            ticker: self.ticker.clone(),
            bars: self
                .bars
                .iter()
                .filter(|bar| bar.date >= start && bar.date <= end)
                .cloned()
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn rejects_out_of_order_or_duplicate_dates() {
        let ok = vec![DailyBar::from_close(day(1), 1.0), DailyBar::from_close(day(2), 2.0)];
        assert!(PriceSeries::new("AAPL", ok).is_ok());

        let dup = vec![DailyBar::from_close(day(2), 1.0), DailyBar::from_close(day(2), 2.0)];
        assert!(PriceSeries::new("AAPL", dup).is_err());

        let backwards = vec![DailyBar::from_close(day(3), 1.0), DailyBar::from_close(day(2), 2.0)];
        assert!(PriceSeries::new("AAPL", backwards).is_err());
    }

    #[test]
    fn from_unordered_sorts_and_keeps_last_duplicate() {
        let series = PriceSeries::from_unordered(
            "MSFT",
            vec![
                DailyBar::from_close(day(3), 30.0),
                DailyBar::from_close(day(1), 10.0),
                DailyBar::from_close(day(3), 31.0),
            ],
        );
        assert_eq!(series.dates(), vec![day(1), day(3)]);
        assert_eq!(series.closes(), vec![10.0, 31.0]);
    }

    #[test]
    fn between_is_inclusive_on_both_ends() {
        let series = PriceSeries::from_closes("T", day(1), &[1.0, 2.0, 3.0, 4.0, 5.0]);
        let window = series.between(day(2), day(4));
        assert_eq!(window.closes(), vec![2.0, 3.0, 4.0]);
        assert_eq!(window.ticker(), "T");
        assert!(series.between(day(6), day(9)).is_empty());
    }
}
