use std::sync::Arc;

use chrono::NaiveDate;
use eframe::{Frame, egui};
use poll_promise::Promise;
use tokio::runtime::Handle;

use crate::analysis::{ComparisonSeries, DataSummary, GraphReport};
use crate::config::{FORECAST, RescaleMode};
use crate::data::{FetchOptions, Fixtures};
use crate::domain::PriceRequest;
use crate::error::AppError;
use crate::models::ModelSlot;
use crate::ui::app_async::AsyncFetchResult;
use crate::ui::ui_plot_view::PlotView;
use crate::ui::utils::setup_custom_visuals;
use crate::utils::time_utils::{format_date, parse_date, today_local};

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;

/// Side navigation entries, in display order
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, strum_macros::EnumIter, strum_macros::Display)]
pub enum NavView {
    #[default]
    Graph,
    Data,
    Comparison,
    #[strum(to_string = "Stock News")]
    StockNews,
    #[strum(to_string = "List of Stock Tickers")]
    TickerList,
}

/// Long-lived collaborators built in `main`
pub struct AppServices {
    pub runtime: Handle,
    pub model_slot: Arc<ModelSlot>,
    pub fetch_options: FetchOptions,
    pub rescale_mode: RescaleMode,
    pub fixtures: Fixtures,
}

/// Text typed into each view. Every view keeps its own fields.
#[derive(Debug, Clone, Default)]
pub struct ViewInputs {
    pub graph_ticker: String,
    pub data_ticker: String,
    pub comparison_ticker: String,
    pub comparison_start: String,
    pub comparison_end: String,
    pub company_search: String,
}

impl ViewInputs {
    pub fn with_today(today: NaiveDate) -> Self {
        Self {
            comparison_start: format_date(today),
            comparison_end: format_date(today),
            ..Self::default()
        }
    }
}

/// History request behind the Graph and Data views: 2010-01-01 up to (not including) today.
pub fn history_request(ticker_input: &str, today: NaiveDate) -> Result<PriceRequest, AppError> {
    let start = parse_date(FORECAST.history_start)
        .map_err(|_| AppError::InvalidDate(FORECAST.history_start.to_string()))?;
    PriceRequest::new(ticker_input, start, today)
}

/// Latest result of each view; `None` until its button is first pressed.
#[derive(Default)]
pub struct ViewResults {
    pub graph: Option<Result<GraphReport, AppError>>,
    pub data: Option<Result<DataSummary, AppError>>,
    pub comparison: Option<Result<ComparisonSeries, AppError>>,
}

pub struct StockTrendApp {
    pub(super) nav: NavView,
    pub(super) inputs: ViewInputs,
    pub(super) results: ViewResults,
    pub(super) services: AppServices,
    pub(super) plot_view: PlotView,

    // At most one request in flight
    pub(super) fetch_promise: Option<Promise<AsyncFetchResult>>,
}

impl StockTrendApp {
    pub fn new(cc: &eframe::CreationContext<'_>, services: AppServices) -> Self {
        setup_custom_visuals(&cc.egui_ctx);

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_ui_interactions {
            log::info!(
                "Starting UI with {} headlines and {} listed companies",
                services.fixtures.headlines.len(),
                services.fixtures.tickers.len()
            );
        }

        Self {
            nav: NavView::default(),
            inputs: ViewInputs::with_today(today_local()),
            results: ViewResults::default(),
            services,
            plot_view: PlotView::new(),
            fetch_promise: None,
        }
    }
}

impl eframe::App for StockTrendApp {
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        // Drop the promise before the runtime goes away
        self.fetch_promise = None;

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_shutdown {
            log::info!("Application shutdown complete.");
        }
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        self.poll_async_fetch(ctx);

        self.render_side_panel(ctx);
        self.render_status_panel(ctx);
        self.render_central_panel(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn navigation_order_and_labels() {
        let labels: Vec<String> = NavView::iter().map(|v| v.to_string()).collect();
        assert_eq!(
            labels,
            ["Graph", "Data", "Comparison", "Stock News", "List of Stock Tickers"]
        );
        assert_eq!(NavView::default(), NavView::Graph);
    }

    #[test]
    fn history_request_spans_2010_to_today() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let req = history_request(" tsla ", today).unwrap();
        assert_eq!(req.ticker, "TSLA");
        assert_eq!(req.start, NaiveDate::from_ymd_opt(2010, 1, 1).unwrap());
        assert_eq!(req.end, today);
        assert_eq!(history_request("", today), Err(AppError::EmptyTicker));
    }

    #[test]
    fn comparison_fields_default_to_today() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let inputs = ViewInputs::with_today(today);
        assert_eq!(inputs.comparison_start, "2024-05-01");
        assert_eq!(inputs.comparison_end, "2024-05-01");
        assert!(inputs.graph_ticker.is_empty());
    }
}
