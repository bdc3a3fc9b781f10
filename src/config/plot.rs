//! Plot visualization configuration

use eframe::egui::Color32;

pub struct PlotConfig {
    pub close_color: Color32,
    pub ma_short_color: Color32,
    pub ma_long_color: Color32,
    /// "Original price" line in the forecast chart
    pub actual_color: Color32,
    /// "Predicted price" line in the forecast chart
    pub predicted_color: Color32,
    pub comparison_color: Color32,
    pub price_line_width: f32,
    pub overlay_line_width: f32,
    /// Height of each chart in the Graph view (points)
    pub chart_height: f32,
}

pub const PLOT_CONFIG: PlotConfig = PlotConfig {
    close_color: Color32::from_rgb(31, 119, 180),     // Blue
    ma_short_color: Color32::from_rgb(255, 127, 14),  // Orange
    ma_long_color: Color32::from_rgb(44, 160, 44),    // Green
    actual_color: Color32::from_rgb(0, 0, 255),       // Blue
    predicted_color: Color32::from_rgb(255, 0, 0),    // Red
    comparison_color: Color32::from_rgb(31, 119, 180),
    price_line_width: 1.5,
    overlay_line_width: 1.5,
    chart_height: 320.0,
};
