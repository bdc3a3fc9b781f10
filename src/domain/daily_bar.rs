use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One trading day for a single ticker.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DailyBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    /// Close adjusted for splits and dividends
    pub adj_close: f64,
    pub volume: f64,
}

impl DailyBar {
    /// A bar where only the close is known (synthetic series, fixtures)
    pub fn from_close(date: NaiveDate, close: f64) -> Self {
        DailyBar {
            date,
            open: close,
            high: close,
            low: close,
            close,
            adj_close: close,
            volume: 0.0,
        }
    }

    /// Column accessor used by the summary table
    pub fn field(&self, field: BarField) -> f64 {
        match field {
            BarField::Open => self.open,
            BarField::High => self.high,
            BarField::Low => self.low,
            BarField::Close => self.close,
            BarField::AdjClose => self.adj_close,
            BarField::Volume => self.volume,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, strum_macros::EnumIter, strum_macros::Display)]
pub enum BarField {
    Open,
    High,
    Low,
    Close,
    #[strum(to_string = "Adj Close")]
    AdjClose,
    Volume,
}
