use anyhow::{Result, anyhow};
use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeZone, Utc};

pub struct TimeUtils;

impl TimeUtils {
    pub const SECS_IN_D: i64 = 60 * 60 * 24;
    pub const STANDARD_TIME_FORMAT: &str = "%Y-%m-%d";
}

/// Parse a `YYYY-MM-DD` string (surrounding whitespace allowed).
pub fn parse_date(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), TimeUtils::STANDARD_TIME_FORMAT)
        .map_err(|e| anyhow!("'{}' is not a YYYY-MM-DD date: {}", text.trim(), e))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(TimeUtils::STANDARD_TIME_FORMAT).to_string()
}

/// Midnight UTC of `date` as epoch seconds.
pub fn date_to_epoch_sec(date: NaiveDate) -> i64 {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)).timestamp()
}

/// Calendar date of an epoch timestamp as seen from a fixed UTC offset
/// (e.g. an exchange's `gmtoffset`).
pub fn epoch_sec_to_date(epoch_sec: i64, utc_offset_sec: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp(epoch_sec + utc_offset_sec, 0).map(|dt| dt.date_naive())
}

/// Days since the Unix epoch, used as the plot x coordinate for dates.
pub fn date_to_plot_x(date: NaiveDate) -> f64 {
    (date_to_epoch_sec(date) / TimeUtils::SECS_IN_D) as f64
}

pub fn plot_x_to_date(x: f64) -> Option<NaiveDate> {
    let secs = (x.round() as i64).checked_mul(TimeUtils::SECS_IN_D)?;
    epoch_sec_to_date(secs, 0)
}

pub fn today_local() -> NaiveDate {
    Local::now().date_naive()
}

pub fn local_now_as_timestamp_ms() -> i64 {
    Local::now().timestamp_millis()
}

pub fn how_many_seconds_ago(past_timestamp_ms: i64) -> i64 {
    // How many seconds ago was the event described by `past_timestamp_ms` ?
    let now_timestamp_ms = local_now_as_timestamp_ms();
    (now_timestamp_ms - past_timestamp_ms) / 1000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_padded_iso_dates() {
        let date = parse_date(" 2023-02-28 ").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2023, 2, 28).unwrap());
        assert!(parse_date("28/02/2023").is_err());
        assert!(parse_date("2023-02-30").is_err());
    }

    #[test]
    fn exchange_offset_shifts_calendar_day() {
        // 2024-01-02 03:00 UTC is still 2024-01-01 in New York (UTC-5)
        let ts = date_to_epoch_sec(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()) + 3 * 3600;
        assert_eq!(
            epoch_sec_to_date(ts, -5 * 3600),
            NaiveDate::from_ymd_opt(2024, 1, 1)
        );
        assert_eq!(epoch_sec_to_date(ts, 0), NaiveDate::from_ymd_opt(2024, 1, 2));
    }

    #[test]
    fn plot_x_round_trips_dates() {
        let date = NaiveDate::from_ymd_opt(2015, 6, 30).unwrap();
        assert_eq!(plot_x_to_date(date_to_plot_x(date)), Some(date));
    }
}
