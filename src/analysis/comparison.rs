//! Date-range comparison: validate the text fields, then keep the fetched
//! rows that fall inside the inclusive range.

use chrono::NaiveDate;

use crate::domain::{PriceRequest, PriceSeries};
use crate::error::AppError;
use crate::utils::time_utils::parse_date;

/// Builds the provider request from the raw ticker and date fields.
pub fn comparison_request(
    ticker_input: &str,
    start_text: &str,
    end_text: &str,
) -> Result<PriceRequest, AppError> {
    // Ticker first so a blank field reports the same prompt as the other triggers
    if PriceRequest::normalise_ticker(ticker_input).is_none() {
        return Err(AppError::EmptyTicker);
    }
    let start = parse_date(start_text).map_err(|_| AppError::InvalidDate(start_text.trim().to_string()))?;
    let end = parse_date(end_text).map_err(|_| AppError::InvalidDate(end_text.trim().to_string()))?;
    PriceRequest::new(ticker_input, start, end)
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonSeries {
    pub ticker: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub points: Vec<(NaiveDate, f64)>,
}

/// Closing prices with `start <= date <= end`.
pub fn compare_range(series: &PriceSeries, start: NaiveDate, end: NaiveDate) -> Result<ComparisonSeries, AppError> {
    let filtered = series.between(start, end);
    if filtered.is_empty() {
        return Err(AppError::NoData {
            ticker: series.ticker().to_string(),
        });
    }
    Ok(ComparisonSeries {
        ticker: series.ticker().to_string(),
        start,
        end,
        points: filtered.bars().iter().map(|bar| (bar.date, bar.close)).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn request_validation_order() {
        assert_eq!(comparison_request(" ", "nonsense", "2020-01-01"), Err(AppError::EmptyTicker));
        assert_eq!(
            comparison_request("aapl", "2020-13-01", "2020-01-01"),
            Err(AppError::InvalidDate("2020-13-01".into()))
        );
        assert_eq!(
            comparison_request("aapl", "2021-01-01", "2020-01-01"),
            Err(AppError::InvalidRange)
        );

        let req = comparison_request("aapl", "2020-01-01", "2020-06-30").unwrap();
        assert_eq!(req.ticker, "AAPL");
        assert_eq!(req.end, date(2020, 6, 30));
    }

    #[test]
    fn range_is_inclusive_on_both_ends() {
        let series = PriceSeries::from_closes("TEST", date(2020, 1, 1), &[1.0, 2.0, 3.0, 4.0, 5.0]);
        let cmp = compare_range(&series, date(2020, 1, 2), date(2020, 1, 4)).unwrap();
        assert_eq!(
            cmp.points,
            vec![(date(2020, 1, 2), 2.0), (date(2020, 1, 3), 3.0), (date(2020, 1, 4), 4.0)]
        );
    }

    #[test]
    fn empty_range_reports_no_data() {
        let series = PriceSeries::from_closes("TEST", date(2020, 1, 1), &[1.0, 2.0]);
        assert_eq!(
            compare_range(&series, date(2021, 1, 1), date(2021, 2, 1)),
            Err(AppError::NoData { ticker: "TEST".into() })
        );
    }
}
