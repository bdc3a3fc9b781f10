pub mod cache_file;
pub mod serde_version;
pub mod yahoo_version;

use anyhow::{Result, anyhow};
use async_trait::async_trait;

use crate::domain::{PriceRequest, PriceSeries};

#[async_trait]
pub trait PriceProvider: Send + Sync {
    // Either return a (possibly empty) series OR an anyhow::error if the call could not complete
    async fn fetch_prices(&self, request: &PriceRequest) -> Result<PriceSeries>;

    /// A unique identifier for this implementation (so that afterwards we know which one we used).
    fn signature(&self) -> &'static str;
}

/// Tries each provider in order; the first `Ok` wins.
pub async fn get_price_series_async(
    providers: &[Box<dyn PriceProvider>],
    request: &PriceRequest,
) -> Result<(PriceSeries, &'static str)> {
    let mut last_error = None;
    for provider in providers {
        match provider.fetch_prices(request).await {
            Ok(series) => return Ok((series, provider.signature())),
            Err(e) => {
                log::info!("{} failed for {}: {:#}", provider.signature(), request, e);
                last_error = Some(e);
            }
        }
    }
    Err(last_error.unwrap_or_else(|| anyhow!("No price providers configured")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use chrono::NaiveDate;

    struct Failing;
    struct Fixed(usize);

    #[async_trait]
    impl PriceProvider for Failing {
        async fn fetch_prices(&self, _request: &PriceRequest) -> Result<PriceSeries> {
            bail!("offline")
        }
        fn signature(&self) -> &'static str {
            "Failing"
        }
    }

    #[async_trait]
    impl PriceProvider for Fixed {
        async fn fetch_prices(&self, request: &PriceRequest) -> Result<PriceSeries> {
            Ok(PriceSeries::from_closes(&request.ticker, request.start, &vec![1.0; self.0]))
        }
        fn signature(&self) -> &'static str {
            "Fixed"
        }
    }

    fn request() -> PriceRequest {
        let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        PriceRequest::new("test", start, NaiveDate::from_ymd_opt(2020, 2, 1).unwrap()).unwrap()
    }

    #[tokio::test]
    async fn falls_through_to_first_success() {
        let providers: Vec<Box<dyn PriceProvider>> = vec![Box::new(Failing), Box::new(Fixed(3)), Box::new(Fixed(9))];
        let (series, signature) = get_price_series_async(&providers, &request()).await.unwrap();
        assert_eq!(signature, "Fixed");
        assert_eq!(series.len(), 3);
        assert_eq!(series.ticker(), "TEST");
    }

    #[tokio::test]
    async fn all_failures_surface_the_last_error() {
        let providers: Vec<Box<dyn PriceProvider>> = vec![Box::new(Failing)];
        let err = get_price_series_async(&providers, &request()).await.unwrap_err();
        assert!(err.to_string().contains("offline"));
        assert!(get_price_series_async(&[], &request()).await.is_err());
    }
}
