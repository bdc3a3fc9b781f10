//! Daily bars from Yahoo's v8 chart endpoint.

use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};
use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use tokio::time::Instant;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::config::PROVIDER;
use crate::data::prices::PriceProvider;
use crate::domain::{DailyBar, PriceRequest, PriceSeries};
use crate::utils::time_utils::{date_to_epoch_sec, epoch_sec_to_date};

// Raw payload. Every column is nullable: Yahoo emits `null` for halted days.

#[derive(Deserialize, Debug)]
struct ChartEnvelope {
    chart: ChartBody,
}

#[derive(Deserialize, Debug)]
struct ChartBody {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Deserialize, Debug)]
struct ChartError {
    code: String,
    description: Option<String>,
}

#[derive(Deserialize, Debug)]
struct ChartResult {
    meta: ChartMeta,
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Deserialize, Debug, Default)]
struct ChartMeta {
    #[serde(default)]
    gmtoffset: i64,
}

#[derive(Deserialize, Debug)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteColumns>,
    #[serde(default)]
    adjclose: Vec<AdjCloseColumn>,
}

#[derive(Deserialize, Debug, Default)]
struct QuoteColumns {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

#[derive(Deserialize, Debug, Default)]
struct AdjCloseColumn {
    #[serde(default)]
    adjclose: Vec<Option<f64>>,
}

fn column(values: &[Option<f64>], idx: usize) -> Option<f64> {
    values.get(idx).copied().flatten()
}

/// Turns a chart payload into a series for `request`.
///
/// "Not Found" and results without timestamps are a valid empty answer; any
/// other chart error is a failure. Rows without a close are dropped, rows
/// outside `[start, end)` are dropped, and a repeated date keeps its last row.
pub fn parse_chart_payload(request: &PriceRequest, body: &str) -> Result<PriceSeries> {
    let envelope: ChartEnvelope = serde_json::from_str(body).context("Failed to decode chart payload")?;

    if let Some(error) = envelope.chart.error {
        if error.code == "Not Found" {
            return Ok(PriceSeries::empty(&request.ticker));
        }
        bail!(
            "Chart error {}: {}",
            error.code,
            error.description.unwrap_or_default()
        );
    }

    let Some(result) = envelope.chart.result.and_then(|r| r.into_iter().next()) else {
        return Ok(PriceSeries::empty(&request.ticker));
    };
    let Some(timestamps) = result.timestamp else {
        return Ok(PriceSeries::empty(&request.ticker));
    };

    let quote = result.indicators.quote.into_iter().next().unwrap_or_default();
    let adj = result.indicators.adjclose.into_iter().next().unwrap_or_default();
    let offset = result.meta.gmtoffset;

    let bars: Vec<DailyBar> = timestamps
        .iter()
        .enumerate()
        .filter_map(|(i, &ts)| {
            let close = column(&quote.close, i)?;
            let date = epoch_sec_to_date(ts, offset)?;
            Some(DailyBar {
                date,
                open: column(&quote.open, i).unwrap_or(close),
                high: column(&quote.high, i).unwrap_or(close),
                low: column(&quote.low, i).unwrap_or(close),
                close,
                adj_close: column(&adj.adjclose, i).unwrap_or(close),
                volume: column(&quote.volume, i).unwrap_or(0.0),
            })
        })
        .filter(|bar| bar.date >= request.start && bar.date < request.end)
        .collect();

    Ok(PriceSeries::from_unordered(&request.ticker, bars))
}

pub struct YahooChartApi {
    client: reqwest::Client,
}

impl YahooChartApi {
    pub const SIGNATURE: &'static str = "Yahoo Chart API";

    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(PROVIDER.yahoo.user_agent)
            .timeout(Duration::from_millis(PROVIDER.client.timeout_ms))
            .connect_timeout(Duration::from_millis(PROVIDER.client.connect_timeout_ms))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }

    /// The ticker always lands in a single percent-encoded path segment.
    pub fn chart_url(ticker: &str) -> Result<Url> {
        let mut url = Url::parse(PROVIDER.yahoo.base_url).context("Invalid chart API base URL")?;
        url.path_segments_mut()
            .map_err(|_| anyhow!("Chart API base URL cannot take a path"))?
            .pop_if_empty()
            .extend(["v8", "finance", "chart", ticker]);
        Ok(url)
    }
}

#[async_trait]
impl PriceProvider for YahooChartApi {
    fn signature(&self) -> &'static str {
        Self::SIGNATURE
    }

    async fn fetch_prices(&self, request: &PriceRequest) -> Result<PriceSeries> {
        let start_time = Instant::now();
        let url = Self::chart_url(&request.ticker)?;
        let period1 = date_to_epoch_sec(request.start).to_string();
        let period2 = date_to_epoch_sec(request.end).to_string();

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_fetch {
            log::info!("GET {} ({} .. {})", url, request.start, request.end);
        }

        let response = self
            .client
            .get(url.clone())
            .query(&[
                ("period1", period1.as_str()),
                ("period2", period2.as_str()),
                ("interval", PROVIDER.yahoo.interval),
                ("events", "history"),
            ])
            .send()
            .await
            .with_context(|| format!("Request to {} failed", url))?;

        // Unknown symbols come back as 404 with a chart error body, so decode before judging status
        let status = response.status();
        let body = response.text().await.context("Failed to read chart response body")?;
        let series = match parse_chart_payload(request, &body) {
            Ok(series) => series,
            Err(e) if !status.is_success() => bail!("HTTP {} from {}: {:#}", status, url, e),
            Err(e) => return Err(e),
        };

        log::info!(
            "Fetched {} bars for {} in {:?}",
            series.len(),
            request.ticker,
            start_time.elapsed()
        );
        Ok(series)
    }
}
