use eframe::egui::{CentralPanel, Context, Frame, Grid, Margin, ScrollArea, SidePanel, Spinner, TextEdit, TopBottomPanel, Ui};

use crate::analysis::{STAT_LABELS, comparison_request};
use crate::ui::app::{NavView, history_request};
use crate::ui::app_async::FetchJob;
use crate::ui::config::{UI_CONFIG, UI_TEXT};
use crate::ui::plot_layers::{ClosePriceLayer, ForecastLayer, LayerContext, MovingAverageLayer, PlotLayer};
use crate::ui::styles::UiStyleExt;
use crate::ui::ui_panels::{NavigationPanel, Panel, QueryPanel};
use crate::ui::ui_plot_view::PlotView;
use crate::ui::utils::{format_stat, spaced_separator};
use crate::config::plot::PLOT_CONFIG;
use crate::utils::time_utils::{date_to_plot_x, today_local};

use super::app::StockTrendApp;

impl StockTrendApp {
    pub(super) fn render_side_panel(&mut self, ctx: &Context) {
        let side_panel_frame = Frame::new()
            .fill(UI_CONFIG.colors.side_panel)
            .inner_margin(Margin::same(8));
        SidePanel::left("left_panel")
            .min_width(UI_CONFIG.side_panel_min_width)
            .frame(side_panel_frame)
            .show(ctx, |ui| {
                ui.label_header(UI_TEXT.app_title);
                spaced_separator(ui);
                for view in NavigationPanel::new(self.nav).render(ui) {
                    self.nav = view;
                }
            });
    }

    pub(super) fn render_status_panel(&mut self, ctx: &Context) {
        let status_frame = Frame::new()
            .fill(UI_CONFIG.colors.side_panel)
            .inner_margin(Margin::symmetric(8, 4));
        TopBottomPanel::bottom("status_panel")
            .frame(status_frame)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    if self.is_fetching() {
                        ui.add(Spinner::new());
                        ui.label_subdued(UI_TEXT.status_fetching);
                    } else {
                        ui.label_subdued(UI_TEXT.status_idle);
                    }
                    ui.separator();

                    let slot = &self.services.model_slot;
                    if !slot.is_loaded() {
                        ui.metric("Model", UI_TEXT.status_model_pending, UI_CONFIG.colors.label);
                    } else if slot.get().is_ok() {
                        ui.metric("Model", UI_TEXT.status_model_ready, UI_CONFIG.colors.ready);
                    } else {
                        ui.metric("Model", UI_TEXT.status_model_missing, UI_CONFIG.colors.warning);
                    }
                    ui.separator();

                    let mode = format!("{:?}", self.services.rescale_mode);
                    ui.metric(UI_TEXT.status_rescale, &mode, UI_CONFIG.colors.label);
                });
            });
    }

    pub(super) fn render_central_panel(&mut self, ctx: &Context) {
        let central_panel_frame = Frame::new()
            .fill(UI_CONFIG.colors.central_panel)
            .inner_margin(Margin::same(12));
        CentralPanel::default()
            .frame(central_panel_frame)
            .show(ctx, |ui| {
                ui.label_header(self.nav.to_string());
                ui.add_space(10.0);
                match self.nav {
                    NavView::Graph => self.render_graph_view(ui),
                    NavView::Data => self.render_data_view(ui),
                    NavView::Comparison => self.render_comparison_view(ui),
                    NavView::StockNews => self.render_news_view(ui),
                    NavView::TickerList => self.render_ticker_list_view(ui),
                }
            });
    }

    fn render_graph_view(&mut self, ui: &mut Ui) {
        let enabled = !self.is_fetching();
        let events = QueryPanel::new(&mut self.inputs.graph_ticker, UI_TEXT.show_graphs, enabled).render(ui);
        if !events.is_empty() {
            match history_request(&self.inputs.graph_ticker, today_local()) {
                Ok(request) => self.start_async_fetch(FetchJob::Graph(request)),
                Err(e) => self.results.graph = Some(Err(e)),
            }
        }
        spaced_separator(ui);

        let Some(result) = &self.results.graph else { return };
        let report = match result {
            Ok(report) => report,
            Err(e) => {
                ui.app_error(e);
                return;
            }
        };

        let xs = self.plot_view.xs_for(&report.ticker, &report.dates);
        let layer_ctx = LayerContext {
            xs,
            closes: &report.closes,
            ma_short: &report.ma_short,
            ma_long: &report.ma_long,
            forecast: report.forecast.as_ref().ok(),
        };

        let close = ClosePriceLayer::default();
        let charts: [(&str, Vec<&dyn PlotLayer>); 3] = [
            (UI_TEXT.chart_close, vec![&close as &dyn PlotLayer]),
            (UI_TEXT.chart_close_ma100, vec![&close as &dyn PlotLayer, &MovingAverageLayer::Short]),
            (
                UI_TEXT.chart_close_ma100_ma200,
                vec![&close as &dyn PlotLayer, &MovingAverageLayer::Short, &MovingAverageLayer::Long],
            ),
        ];

        ScrollArea::vertical().id_salt("graph_view").show(ui, |ui| {
            for (title, layers) in &charts {
                ui.label_subheader(*title);
                PlotView::show_chart(ui, title, UI_TEXT.plot_y_axis, layers, &layer_ctx);
                ui.add_space(10.0);
            }

            ui.label_subheader(UI_TEXT.chart_forecast);
            match &report.forecast {
                Ok(_) => {
                    PlotView::show_chart(ui, UI_TEXT.chart_forecast, UI_TEXT.plot_y_axis, &[&ForecastLayer], &layer_ctx)
                }
                Err(e) => ui.app_error(e),
            }
        });
    }

    fn render_data_view(&mut self, ui: &mut Ui) {
        let enabled = !self.is_fetching();
        let events = QueryPanel::new(&mut self.inputs.data_ticker, UI_TEXT.show_data, enabled).render(ui);
        if !events.is_empty() {
            match history_request(&self.inputs.data_ticker, today_local()) {
                Ok(request) => self.start_async_fetch(FetchJob::Data(request)),
                Err(e) => self.results.data = Some(Err(e)),
            }
        }
        spaced_separator(ui);

        let Some(result) = &self.results.data else { return };
        let summary = match result {
            Ok(summary) => summary,
            Err(e) => {
                ui.app_error(e);
                return;
            }
        };

        ui.label_subheader(format!("{}: {}", summary.ticker, UI_TEXT.data_subheader));
        ui.add_space(5.0);
        ScrollArea::horizontal().id_salt("data_view").show(ui, |ui| {
            Grid::new("summary_table").striped(true).num_columns(summary.columns.len() + 1).show(ui, |ui| {
                ui.label("");
                for (field, _) in &summary.columns {
                    ui.strong(field.to_string());
                }
                ui.end_row();

                for (row, label) in STAT_LABELS.iter().enumerate() {
                    ui.strong(*label);
                    for (_, stats) in &summary.columns {
                        ui.monospace(format_stat(stats.as_row()[row]));
                    }
                    ui.end_row();
                }
            });
        });
    }

    fn render_comparison_view(&mut self, ui: &mut Ui) {
        let enabled = !self.is_fetching();
        let inputs = &mut self.inputs;
        let events = QueryPanel::new(&mut inputs.comparison_ticker, UI_TEXT.compare_dates, enabled)
            .with_dates(&mut inputs.comparison_start, &mut inputs.comparison_end)
            .render(ui);
        if !events.is_empty() {
            match comparison_request(
                &self.inputs.comparison_ticker,
                &self.inputs.comparison_start,
                &self.inputs.comparison_end,
            ) {
                Ok(request) => self.start_async_fetch(FetchJob::Comparison(request)),
                Err(e) => self.results.comparison = Some(Err(e)),
            }
        }
        spaced_separator(ui);

        let Some(result) = &self.results.comparison else { return };
        let comparison = match result {
            Ok(comparison) => comparison,
            Err(e) => {
                ui.app_error(e);
                return;
            }
        };

        let xs: Vec<f64> = comparison.points.iter().map(|(d, _)| date_to_plot_x(*d)).collect();
        let closes: Vec<f64> = comparison.points.iter().map(|(_, c)| *c).collect();
        let layer_ctx = LayerContext {
            xs: &xs,
            closes: &closes,
            ma_short: &[],
            ma_long: &[],
            forecast: None,
        };
        let layer = ClosePriceLayer {
            color: PLOT_CONFIG.comparison_color,
            ..ClosePriceLayer::default()
        };

        let title = format!(
            "{} {} ({} to {})",
            comparison.ticker, UI_TEXT.chart_comparison_prefix, comparison.start, comparison.end
        );
        ui.label_subheader(&title);
        PlotView::show_chart(ui, "comparison", UI_TEXT.plot_y_axis, &[&layer], &layer_ctx);
    }

    fn render_news_view(&mut self, ui: &mut Ui) {
        for headline in &self.services.fixtures.headlines {
            ui.label(format!("- {}", headline));
        }
    }

    fn render_ticker_list_view(&mut self, ui: &mut Ui) {
        ui.label(UI_TEXT.company_search_prompt);
        ui.add(TextEdit::singleline(&mut self.inputs.company_search));
        ui.add_space(8.0);

        let rows = self.services.fixtures.search(&self.inputs.company_search);
        ScrollArea::vertical()
            .max_height(UI_CONFIG.table_max_height)
            .id_salt("ticker_table")
            .show(ui, |ui| {
                Grid::new("ticker_grid").striped(true).num_columns(3).show(ui, |ui| {
                    ui.label("");
                    ui.strong(UI_TEXT.column_company);
                    ui.strong(UI_TEXT.column_symbol);
                    ui.end_row();
                    for (idx, row) in rows.iter().enumerate() {
                        ui.label_subdued(idx.to_string());
                        ui.label(&row.company);
                        ui.monospace(&row.symbol);
                        ui.end_row();
                    }
                });
            });
    }
}
