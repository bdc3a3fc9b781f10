#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::config::PERSISTENCE;
use crate::utils::time_utils::how_many_seconds_ago;
use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::data::prices::{PriceProvider, cache_file::CacheFile};
use crate::domain::{PriceRequest, PriceSeries};

pub fn check_local_data_validity(
    directory: &Path,
    request: &PriceRequest,
    recency_required_secs: i64,
    version_required: f64,
) -> Result<()> {
    let full_path = CacheFile::cache_path(directory, request);

    #[cfg(debug_assertions)]
    if DEBUG_FLAGS.print_cache {
        log::info!("Checking validity of local cache at {:?}...", full_path);
    }
    let cache = CacheFile::load_from_path(&full_path)?;

    // Check version
    if cache.version != version_required {
        bail!(
            "Cache version mismatch: file v{} vs required v{}",
            cache.version,
            version_required
        );
    }

    // Check the file answers this exact request
    if cache.request != *request {
        bail!("Cache holds {} but {} was requested", cache.request, request);
    }

    // Check recency
    let seconds_ago = how_many_seconds_ago(cache.timestamp_ms);
    if seconds_ago > recency_required_secs {
        bail!(
            "Cache too old: created {} seconds ago (limit: {} seconds)",
            seconds_ago,
            recency_required_secs
        );
    }

    #[cfg(debug_assertions)]
    if DEBUG_FLAGS.print_cache {
        log::info!(
            "Cache valid: v{}, {}s old (limit {}s), {} bars",
            cache.version,
            seconds_ago,
            recency_required_secs,
            cache.data.len()
        );
    }

    Ok(())
}

/// Write a fetched series to its binary cache file.
/// Empty series are never cached so a later request retries the provider.
pub fn write_price_data_locally(directory: &Path, request: &PriceRequest, series: &PriceSeries) -> Result<()> {
    if series.is_empty() {
        return Ok(());
    }

    let full_path = CacheFile::cache_path(directory, request);

    #[cfg(debug_assertions)]
    let start_time = DEBUG_FLAGS.print_cache.then(|| {
        log::info!("Writing cache to disk: {:?}...", full_path);
        std::time::Instant::now()
    });

    let cache = CacheFile::new(request.clone(), series.clone(), PERSISTENCE.price_cache.version);
    cache.save_to_path(&full_path)?;

    #[cfg(debug_assertions)]
    if let Some(start) = start_time {
        log::info!("Cache written: {:?} in {:.3}s", full_path, start.elapsed().as_secs_f64());
    }

    Ok(())
}

/// Async wrapper for write_price_data_locally
/// Spawns blocking task to avoid stalling the runtime
pub async fn write_price_data_async(directory: PathBuf, request: PriceRequest, series: PriceSeries) -> Result<()> {
    tokio::task::spawn_blocking(move || write_price_data_locally(&directory, &request, &series))
        .await
        .context("Cache write task panicked")?
}

pub struct SerdeVersion {
    pub directory: PathBuf,
}

impl SerdeVersion {
    pub const SIGNATURE: &'static str = "Local Cache";
}

#[async_trait]
impl PriceProvider for SerdeVersion {
    fn signature(&self) -> &'static str {
        Self::SIGNATURE
    }

    async fn fetch_prices(&self, request: &PriceRequest) -> Result<PriceSeries> {
        let full_path = CacheFile::cache_path(&self.directory, request);

        #[cfg(debug_assertions)]
        let start_time = DEBUG_FLAGS.print_cache.then(|| {
            log::info!("Reading cache from: {:?}...", full_path);
            std::time::Instant::now()
        });

        let cache = tokio::task::spawn_blocking(move || CacheFile::load_from_path(&full_path))
            .await
            .context("Deserialization task panicked")?
            .context("Failed to load cache file")?;

        #[cfg(debug_assertions)]
        if let Some(start) = start_time {
            log::info!(
                "Cache loaded: {} bars of {} in {:.3}s",
                cache.data.len(),
                cache.data.ticker(),
                start.elapsed().as_secs_f64()
            );
        }

        Ok(cache.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn temp_dir(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("stock-trend-{}-{}", tag, std::process::id()))
    }

    fn request(ticker: &str) -> PriceRequest {
        PriceRequest::new(
            ticker,
            NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2022, 3, 1).unwrap(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn written_series_is_valid_and_readable() {
        let dir = temp_dir("serde");
        let req = request("aapl");
        let series = PriceSeries::from_closes("AAPL", req.start, &[10.0, 11.0, 12.0]);

        write_price_data_async(dir.clone(), req.clone(), series.clone()).await.unwrap();
        check_local_data_validity(&dir, &req, 60, PERSISTENCE.price_cache.version).unwrap();
        assert!(check_local_data_validity(&dir, &req, 60, PERSISTENCE.price_cache.version + 1.0).is_err());

        let provider = SerdeVersion { directory: dir.clone() };
        assert_eq!(provider.fetch_prices(&req).await.unwrap(), series);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn empty_series_are_not_cached() {
        let dir = temp_dir("serde-empty");
        let req = request("zzzz");
        write_price_data_locally(&dir, &req, &PriceSeries::empty("ZZZZ")).unwrap();
        assert!(check_local_data_validity(&dir, &req, 60, PERSISTENCE.price_cache.version).is_err());
    }
}
