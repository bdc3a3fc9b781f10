use eframe::egui::{Button, TextEdit, Ui};
use strum::IntoEnumIterator;

use crate::ui::app::NavView;
use crate::ui::config::{UI_CONFIG, UI_TEXT};
use crate::ui::styles::UiStyleExt;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;

/// Trait for UI panels that can be rendered
pub trait Panel {
    type Event;
    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event>;
}

/// Side navigation radio list
pub struct NavigationPanel {
    current: NavView,
}

impl NavigationPanel {
    pub fn new(current: NavView) -> Self {
        Self { current }
    }
}

impl Panel for NavigationPanel {
    type Event = NavView;

    fn render(&mut self, ui: &mut Ui) -> Vec<NavView> {
        let mut events = Vec::new();
        ui.label_subheader(UI_TEXT.nav_heading);
        ui.add_space(5.0);
        for view in NavView::iter() {
            if ui.radio(self.current == view, view.to_string()).clicked() && self.current != view {
                #[cfg(debug_assertions)]
                if DEBUG_FLAGS.print_ui_interactions {
                    log::info!("Navigation: {} -> {}", self.current, view);
                }
                self.current = view;
                events.push(view);
            }
        }
        events
    }
}

/// What a query form asks the app to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryEvent {
    Submit,
}

/// Ticker field, optional start/end date fields and one trigger button.
/// The button is disabled while a request is running.
pub struct QueryPanel<'a> {
    ticker: &'a mut String,
    dates: Option<(&'a mut String, &'a mut String)>,
    button_label: &'static str,
    enabled: bool,
}

impl<'a> QueryPanel<'a> {
    pub fn new(ticker: &'a mut String, button_label: &'static str, enabled: bool) -> Self {
        Self {
            ticker,
            dates: None,
            button_label,
            enabled,
        }
    }

    pub fn with_dates(mut self, start: &'a mut String, end: &'a mut String) -> Self {
        self.dates = Some((start, end));
        self
    }
}

impl Panel for QueryPanel<'_> {
    type Event = QueryEvent;

    fn render(&mut self, ui: &mut Ui) -> Vec<QueryEvent> {
        let mut events = Vec::new();

        ui.label(UI_TEXT.ticker_prompt);
        let ticker_response = ui.add(TextEdit::singleline(&mut *self.ticker).hint_text("AAPL"));

        if let Some((start, end)) = self.dates.as_mut() {
            ui.horizontal(|ui| {
                ui.label(UI_TEXT.start_date_prompt);
                ui.add(TextEdit::singleline(&mut **start).desired_width(UI_CONFIG.date_field_width).hint_text("YYYY-MM-DD"));
                ui.label(UI_TEXT.end_date_prompt);
                ui.add(TextEdit::singleline(&mut **end).desired_width(UI_CONFIG.date_field_width).hint_text("YYYY-MM-DD"));
            });
        }

        ui.add_space(5.0);
        let clicked = ui.add_enabled(self.enabled, Button::new(self.button_label)).clicked();
        let submitted_with_enter =
            self.enabled && ticker_response.lost_focus() && ui.input(|i| i.key_pressed(eframe::egui::Key::Enter));

        if clicked || submitted_with_enter {
            #[cfg(debug_assertions)]
            if DEBUG_FLAGS.print_ui_interactions {
                log::info!("{} pressed for '{}'", self.button_label, self.ticker);
            }
            events.push(QueryEvent::Submit);
        }
        events
    }
}
