use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// What the Data Provider is asked for. `end` is exclusive.
#[derive(Serialize, Deserialize, Debug, Clone, Hash, Eq, PartialEq)]
pub struct PriceRequest {
    pub ticker: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl PriceRequest {
    /// Normalises the ticker typed by the user (trimmed, upper-cased) and
    /// rejects blank tickers and inverted ranges.
    pub fn new(ticker_input: &str, start: NaiveDate, end: NaiveDate) -> Result<Self, AppError> {
        let ticker = Self::normalise_ticker(ticker_input).ok_or(AppError::EmptyTicker)?;
        if start > end {
            return Err(AppError::InvalidRange);
        }
        Ok(Self { ticker, start, end })
    }

    pub fn normalise_ticker(input: &str) -> Option<String> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_uppercase())
        }
    }
}

impl std::fmt::Display for PriceRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} [{} .. {})", self.ticker, self.start, self.end)
    }
}
