//! File locations and serialization versions

use chrono::NaiveDate;

use crate::utils::TimeUtils;

pub struct PriceCacheSettings {
    /// Directory path for storing downloaded price series
    pub directory: &'static str,
    /// Base filename for cache files (without extension)
    pub filename_prefix: &'static str,
    /// Bump whenever `CacheFile` changes shape
    pub version: f64,
    /// Cache entries older than this are ignored (seconds)
    pub max_age_secs: i64,
}

pub struct PersistenceConfig {
    pub price_cache: PriceCacheSettings,
    /// Default location of the pre-trained forecast artifact
    pub model_path: &'static str,
    /// Default location of the headline / ticker directory fixtures
    pub fixtures_path: &'static str,
}

pub const PERSISTENCE: PersistenceConfig = PersistenceConfig {
    price_cache: PriceCacheSettings {
        directory: "price_data",
        filename_prefix: "prices",
        version: 1.0,
        // 12 hours (60 * 60 * 12)
        max_age_secs: 43_200,
    },
    model_path: "models/forecast_model.json",
    fixtures_path: "assets/fixtures.json",
};

/// Generate a request-specific cache filename
/// Example: "prices_AAPL_2010-01-01_2024-05-01_v1.bin"
pub fn price_cache_filename(ticker: &str, start: NaiveDate, end: NaiveDate) -> String {
    format!(
        "{}_{}_{}_{}_v{}.bin",
        PERSISTENCE.price_cache.filename_prefix,
        ticker.replace(['/', '\\', '.'], "-"),
        start.format(TimeUtils::STANDARD_TIME_FORMAT),
        end.format(TimeUtils::STANDARD_TIME_FORMAT),
        PERSISTENCE.price_cache.version
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_filename_is_path_safe() {
        let start = NaiveDate::from_ymd_opt(2010, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert_eq!(
            price_cache_filename("BRK.A", start, end),
            "prices_BRK-A_2010-01-01_2024-05-01_v1.bin"
        );
    }
}
