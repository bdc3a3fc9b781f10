use eframe::egui::Color32;
use egui_plot::{Line, PlotPoints, PlotUi};

use crate::analysis::ForecastReport;
use crate::config::plot::PLOT_CONFIG;
use crate::ui::ui_text::UI_TEXT;
use crate::utils::time_utils::date_to_plot_x;

/// Context passed to every layer during rendering.
/// This prevents argument explosion.
pub struct LayerContext<'a> {
    /// Plot x coordinate of each close
    pub xs: &'a [f64],
    pub closes: &'a [f64],
    pub ma_short: &'a [Option<f64>],
    pub ma_long: &'a [Option<f64>],
    pub forecast: Option<&'a ForecastReport>,
}

/// A standardized layer in the plot stack.
pub trait PlotLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext);
}

// ============================================================================
// 1. CLOSING PRICE
// ============================================================================
pub struct ClosePriceLayer {
    pub label: &'static str,
    pub color: Color32,
}

impl Default for ClosePriceLayer {
    fn default() -> Self {
        Self {
            label: UI_TEXT.legend_close,
            color: PLOT_CONFIG.close_color,
        }
    }
}

impl PlotLayer for ClosePriceLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext) {
        let points: Vec<[f64; 2]> = ctx.xs.iter().zip(ctx.closes).map(|(&x, &y)| [x, y]).collect();
        plot_ui.line(
            Line::new(self.label, PlotPoints::new(points))
                .color(self.color)
                .width(PLOT_CONFIG.price_line_width),
        );
    }
}

// ============================================================================
// 2. MOVING AVERAGE OVERLAYS
// ============================================================================
pub enum MovingAverageLayer {
    Short,
    Long,
}

impl PlotLayer for MovingAverageLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext) {
        let (label, color, values) = match self {
            MovingAverageLayer::Short => (UI_TEXT.legend_ma_short, PLOT_CONFIG.ma_short_color, ctx.ma_short),
            MovingAverageLayer::Long => (UI_TEXT.legend_ma_long, PLOT_CONFIG.ma_long_color, ctx.ma_long),
        };

        // Leading positions without a full window are skipped, not drawn at zero
        let points: Vec<[f64; 2]> = ctx
            .xs
            .iter()
            .zip(values)
            .filter_map(|(&x, v)| v.map(|y| [x, y]))
            .collect();
        if points.is_empty() {
            return;
        }

        plot_ui.line(
            Line::new(label, PlotPoints::new(points))
                .color(color)
                .width(PLOT_CONFIG.overlay_line_width),
        );
    }
}

// ============================================================================
// 3. FORECAST (original vs predicted)
// ============================================================================
pub struct ForecastLayer;

impl PlotLayer for ForecastLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext) {
        let Some(report) = ctx.forecast else { return };
        let xs: Vec<f64> = report.dates.iter().map(|&d| date_to_plot_x(d)).collect();

        let series = [
            (UI_TEXT.legend_actual, PLOT_CONFIG.actual_color, &report.actual),
            (UI_TEXT.legend_predicted, PLOT_CONFIG.predicted_color, &report.predicted),
        ];
        for (label, color, values) in series {
            let points: Vec<[f64; 2]> = xs.iter().zip(values.iter()).map(|(&x, &y)| [x, y]).collect();
            plot_ui.line(
                Line::new(label, PlotPoints::new(points))
                    .color(color)
                    .width(PLOT_CONFIG.price_line_width),
            );
        }
    }
}
