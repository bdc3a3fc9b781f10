// Provider selection and the per-request fetch used by every view

use std::path::PathBuf;

use crate::Cli;
#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::config::PERSISTENCE;
use crate::data::prices::serde_version::{SerdeVersion, check_local_data_validity, write_price_data_async};
use crate::data::prices::yahoo_version::YahooChartApi;
use crate::data::prices::{PriceProvider, get_price_series_async};
use crate::domain::{PriceRequest, PriceSeries};
use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Read and write the on-disk price cache; off unless `--price-cache`
    pub use_cache: bool,
    pub prefer_api: bool,
    pub cache_dir: PathBuf,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            use_cache: false,
            prefer_api: false,
            cache_dir: PathBuf::from(PERSISTENCE.price_cache.directory),
        }
    }
}

impl From<&Cli> for FetchOptions {
    fn from(args: &Cli) -> Self {
        Self {
            use_cache: args.price_cache,
            prefer_api: args.prefer_api,
            ..Self::default()
        }
    }
}

/// Provider order: without the cache, or if the cache entry is invalid, the
/// API is the only choice. Otherwise both are available and `prefer_api`
/// picks which goes first.
pub fn select_providers(request: &PriceRequest, options: &FetchOptions) -> Vec<Box<dyn PriceProvider>> {
    let api: Option<Box<dyn PriceProvider>> = match YahooChartApi::new() {
        Ok(api) => Some(Box::new(api)),
        Err(e) => {
            log::warn!("HTTP client unavailable: {:#}", e);
            None
        }
    };
    if !options.use_cache {
        return api.into_iter().collect();
    }
    let cache: Box<dyn PriceProvider> = Box::new(SerdeVersion {
        directory: options.cache_dir.clone(),
    });

    let validity = check_local_data_validity(
        &options.cache_dir,
        request,
        PERSISTENCE.price_cache.max_age_secs,
        PERSISTENCE.price_cache.version,
    );

    match (options.prefer_api, validity) {
        (false, Ok(_)) => std::iter::once(cache).chain(api).collect(), // local first
        (true, Ok(_)) => api.into_iter().chain(std::iter::once(cache)).collect(), // API first
        (_, Err(e)) => {
            log::debug!("No usable cache for {}: {:#}", request, e);
            api.into_iter().collect() // API only
        }
    }
}

/// Fetches one request through the provider chain and maps the outcome to a
/// user-facing result. With the cache enabled, a fresh API answer is written
/// back to it.
pub async fn fetch_price_series(request: &PriceRequest, options: &FetchOptions) -> Result<PriceSeries, AppError> {
    let providers = select_providers(request, options);
    let (series, signature) = get_price_series_async(&providers, request)
        .await
        .map_err(|e| AppError::FetchFailed(format!("{:#}", e)))?;

    #[cfg(debug_assertions)]
    if DEBUG_FLAGS.print_fetch {
        log::info!("{}: {} bars via {}", request, series.len(), signature);
    }

    if series.is_empty() {
        return Err(AppError::NoData {
            ticker: request.ticker.clone(),
        });
    }

    if options.use_cache
        && signature == YahooChartApi::SIGNATURE
        && let Err(e) = write_price_data_async(options.cache_dir.clone(), request.clone(), series.clone()).await
    {
        log::warn!("Could not cache {}: {:#}", request, e);
    }

    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::prices::serde_version::write_price_data_locally;
    use chrono::NaiveDate;
    use clap::Parser;

    fn request() -> PriceRequest {
        PriceRequest::new(
            "ibm",
            NaiveDate::from_ymd_opt(2019, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2019, 2, 1).unwrap(),
        )
        .unwrap()
    }

    fn options(prefer_api: bool, tag: &str) -> FetchOptions {
        FetchOptions {
            use_cache: true,
            prefer_api,
            cache_dir: std::env::temp_dir().join(format!("stock-trend-fetch-{}-{}", tag, std::process::id())),
        }
    }

    #[test]
    fn provider_order_follows_cache_validity_and_preference() {
        let req = request();
        let local = options(false, "local");
        let api_only: Vec<&str> = select_providers(&req, &local).iter().map(|p| p.signature()).collect();
        assert_eq!(api_only, [YahooChartApi::SIGNATURE]);

        let series = PriceSeries::from_closes("IBM", req.start, &[120.0, 121.0]);
        write_price_data_locally(&local.cache_dir, &req, &series).unwrap();

        let local_first: Vec<&str> = select_providers(&req, &local).iter().map(|p| p.signature()).collect();
        assert_eq!(local_first, [SerdeVersion::SIGNATURE, YahooChartApi::SIGNATURE]);

        let api_pref = FetchOptions {
            prefer_api: true,
            ..local.clone()
        };
        let api_first: Vec<&str> = select_providers(&req, &api_pref).iter().map(|p| p.signature()).collect();
        assert_eq!(api_first, [YahooChartApi::SIGNATURE, SerdeVersion::SIGNATURE]);

        let _ = std::fs::remove_dir_all(&local.cache_dir);
    }

    #[test]
    fn cache_is_ignored_unless_enabled() {
        assert!(!FetchOptions::default().use_cache);

        let req = request();
        let cached = options(false, "off");
        let series = PriceSeries::from_closes("IBM", req.start, &[1.0, 2.0]);
        write_price_data_locally(&cached.cache_dir, &req, &series).unwrap();

        let disabled = FetchOptions {
            use_cache: false,
            ..cached.clone()
        };
        let signatures: Vec<&str> = select_providers(&req, &disabled).iter().map(|p| p.signature()).collect();
        assert_eq!(signatures, [YahooChartApi::SIGNATURE]);

        let _ = std::fs::remove_dir_all(&cached.cache_dir);
    }

    #[test]
    fn cli_enables_cache_only_on_request() {
        let plain = FetchOptions::from(&Cli::parse_from(["stock-trend"]));
        assert!(!plain.use_cache);
        let cached = FetchOptions::from(&Cli::parse_from(["stock-trend", "--price-cache"]));
        assert!(cached.use_cache);
    }

    #[tokio::test]
    async fn valid_cache_answers_without_network() {
        let req = request();
        let opts = options(false, "hit");
        let series = PriceSeries::from_closes("IBM", req.start, &[120.0, 121.0, 119.5]);
        write_price_data_locally(&opts.cache_dir, &req, &series).unwrap();

        assert_eq!(fetch_price_series(&req, &opts).await.unwrap(), series);
        let _ = std::fs::remove_dir_all(&opts.cache_dir);
    }
}
