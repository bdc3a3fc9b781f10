use chrono::NaiveDate;
use eframe::egui::Ui;
use egui_plot::{AxisHints, Corner, HPlacement, Legend, Plot};

use crate::config::plot::PLOT_CONFIG;
use crate::ui::plot_layers::{LayerContext, PlotLayer};
use crate::ui::ui_text::UI_TEXT;
use crate::ui::utils::format_price;
use crate::utils::time_utils::{date_to_plot_x, format_date, plot_x_to_date};

/// X coordinates for the series currently on screen.
#[derive(Clone)]
pub struct PlotCache {
    key: (String, usize, Option<NaiveDate>),
    pub xs: Vec<f64>,
}

/// Owns the date-to-x conversion so it runs once per fetched series, not per frame.
#[derive(Default)]
pub struct PlotView {
    cache: Option<PlotCache>,
}

impl PlotView {
    pub fn new() -> Self {
        Self { cache: None }
    }

    pub fn clear_cache(&mut self) {
        self.cache = None;
    }

    /// X coordinates for `dates`, recomputed only when the series changes.
    pub fn xs_for(&mut self, ticker: &str, dates: &[NaiveDate]) -> &[f64] {
        let key = (ticker.to_string(), dates.len(), dates.last().copied());
        let stale = self.cache.as_ref().is_none_or(|cache| cache.key != key);
        if stale {
            self.cache = Some(PlotCache {
                key,
                xs: dates.iter().map(|&d| date_to_plot_x(d)).collect(),
            });
        }
        self.cache.as_ref().map(|cache| cache.xs.as_slice()).unwrap_or_default()
    }

    /// One line chart: layers render back to front over a date x axis.
    pub fn show_chart(ui: &mut Ui, id: &str, y_label: &str, layers: &[&dyn PlotLayer], ctx: &LayerContext) {
        Plot::new(id)
            .height(PLOT_CONFIG.chart_height)
            .legend(Legend::default().position(Corner::LeftTop))
            .custom_x_axes(vec![create_x_axis()])
            .custom_y_axes(vec![create_y_axis(y_label)])
            .label_formatter(|name, value| {
                let date = plot_x_to_date(value.x).map(format_date).unwrap_or_default();
                if name.is_empty() {
                    format!("{}\n{}", date, format_price(value.y))
                } else {
                    format!("{}\n{}\n{}", name, date, format_price(value.y))
                }
            })
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                for layer in layers {
                    layer.render(plot_ui, ctx);
                }
            });
    }
}

fn create_x_axis() -> AxisHints<'static> {
    AxisHints::new_x()
        .label(UI_TEXT.plot_x_axis)
        .formatter(|grid_mark, _range| plot_x_to_date(grid_mark.value).map(format_date).unwrap_or_default())
}

fn create_y_axis(y_label: &str) -> AxisHints<'static> {
    AxisHints::new_y()
        .label(y_label.to_string())
        .formatter(|grid_mark, _range| format_price(grid_mark.value))
        .placement(HPlacement::Left)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn x_coordinates_are_cached_per_series() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let dates: Vec<NaiveDate> = (0..3).map(|i| start + chrono::Days::new(i)).collect();
        let mut view = PlotView::new();

        let xs = view.xs_for("AAPL", &dates).to_vec();
        assert_eq!(xs.len(), 3);
        assert_eq!(xs[1] - xs[0], 1.0);

        let shorter = view.xs_for("AAPL", &dates[..2]).to_vec();
        assert_eq!(shorter.len(), 2);

        view.clear_cache();
        assert_eq!(view.xs_for("MSFT", &dates), xs.as_slice());
    }
}
