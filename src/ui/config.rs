use eframe::egui::Color32;

pub use crate::ui::ui_text::{UI_TEXT, UiText};

/// UI Colors for consistent theming
#[derive(Clone, Copy, Default)]
pub struct UiColors {
    pub label: Color32,
    pub heading: Color32,
    pub subsection_heading: Color32,
    pub central_panel: Color32,
    pub side_panel: Color32,
    pub warning: Color32,
    pub error: Color32,
    pub ready: Color32,
}

/// Main UI configuration struct that holds all UI-related settings
#[derive(Default, Clone, Copy)]
pub struct UiConfig {
    pub colors: UiColors,
    pub side_panel_min_width: f32,
    /// Height of the scrollable ticker directory table
    pub table_max_height: f32,
    /// Width of the YYYY-MM-DD text fields
    pub date_field_width: f32,
}

/// Global UI configuration instance
pub static UI_CONFIG: UiConfig = UiConfig {
    colors: UiColors {
        label: Color32::GRAY,
        heading: Color32::YELLOW,
        subsection_heading: Color32::ORANGE,
        central_panel: Color32::from_rgb(30, 30, 36),
        side_panel: Color32::from_rgb(25, 25, 25),
        warning: Color32::from_rgb(255, 215, 0),
        error: Color32::from_rgb(255, 100, 100),
        ready: Color32::from_rgb(100, 200, 100),
    },
    side_panel_min_width: 180.0,
    table_max_height: 520.0,
    date_field_width: 110.0,
};
