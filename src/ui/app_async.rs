use std::sync::Arc;
use std::time::{Duration, Instant};

use eframe::egui;
use poll_promise::Promise;
use tokio::runtime::Handle;

use crate::analysis::{ComparisonSeries, DataSummary, GraphReport, build_graph_report, compare_range, describe};
#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::config::RescaleMode;
use crate::data::{FetchOptions, fetch_price_series};
use crate::domain::PriceRequest;
use crate::error::AppError;
use crate::models::ModelSlot;
use crate::ui::app::StockTrendApp;

/// One user action, already validated
#[derive(Debug, Clone, PartialEq)]
pub(super) enum FetchJob {
    Graph(PriceRequest),
    Data(PriceRequest),
    Comparison(PriceRequest),
}

pub(super) enum ViewOutcome {
    Graph(Result<GraphReport, AppError>),
    Data(Result<DataSummary, AppError>),
    Comparison(Result<ComparisonSeries, AppError>),
}

pub(super) struct AsyncFetchResult {
    pub(super) outcome: ViewOutcome,
    elapsed_time: Duration,
}

impl AsyncFetchResult {
    pub(super) fn elapsed_time(&self) -> Duration {
        self.elapsed_time
    }
}

impl StockTrendApp {
    pub(super) fn start_async_fetch(&mut self, job: FetchJob) {
        if self.fetch_promise.is_some() {
            return;
        }

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_fetch {
            log::info!("Starting {:?}", job);
        }

        let runtime = self.services.runtime.clone();
        let options = self.services.fetch_options.clone();
        let model_slot = Arc::clone(&self.services.model_slot);
        let mode = self.services.rescale_mode;

        let promise = Promise::spawn_thread("price_fetch", move || {
            run_fetch_job(job, runtime, options, model_slot, mode)
        });
        self.fetch_promise = Some(promise);
    }

    pub(super) fn poll_async_fetch(&mut self, ctx: &egui::Context) {
        let finished = self
            .fetch_promise
            .as_ref()
            .is_some_and(|promise| promise.ready().is_some());

        if finished {
            let Some(promise) = self.fetch_promise.take() else {
                return;
            };
            let Ok(result) = promise.try_take() else {
                return;
            };

            if result.elapsed_time().as_millis() > 100 {
                log::info!("Request completed in {:.2}s", result.elapsed_time().as_secs_f32());
            }

            match result.outcome {
                ViewOutcome::Graph(report) => {
                    self.plot_view.clear_cache();
                    self.results.graph = Some(report);
                }
                ViewOutcome::Data(summary) => self.results.data = Some(summary),
                ViewOutcome::Comparison(series) => self.results.comparison = Some(series),
            }
        } else if self.fetch_promise.is_some() {
            ctx.request_repaint();
        }
    }

    pub(super) fn is_fetching(&self) -> bool {
        self.fetch_promise.is_some()
    }
}

fn run_fetch_job(
    job: FetchJob,
    runtime: Handle,
    options: FetchOptions,
    model_slot: Arc<ModelSlot>,
    mode: RescaleMode,
) -> AsyncFetchResult {
    let start_time = Instant::now();

    let outcome = match job {
        FetchJob::Graph(request) => ViewOutcome::Graph(
            runtime
                .block_on(fetch_price_series(&request, &options))
                .and_then(|series| build_graph_report(&series, &model_slot, mode)),
        ),
        FetchJob::Data(request) => ViewOutcome::Data(
            runtime
                .block_on(fetch_price_series(&request, &options))
                .map(|series| describe(&series)),
        ),
        FetchJob::Comparison(request) => ViewOutcome::Comparison(
            runtime
                .block_on(fetch_price_series(&request, &options))
                .and_then(|series| compare_range(&series, request.start, request.end)),
        ),
    };

    AsyncFetchResult {
        outcome,
        elapsed_time: start_time.elapsed(),
    }
}
