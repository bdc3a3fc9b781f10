//! User-facing strings.

pub struct UiText {
    pub app_title: &'static str,
    pub nav_heading: &'static str,
    pub ticker_prompt: &'static str,
    pub show_graphs: &'static str,
    pub show_data: &'static str,
    pub compare_dates: &'static str,
    pub start_date_prompt: &'static str,
    pub end_date_prompt: &'static str,
    pub company_search_prompt: &'static str,
    pub chart_close: &'static str,
    pub chart_close_ma100: &'static str,
    pub chart_close_ma100_ma200: &'static str,
    pub chart_forecast: &'static str,
    pub chart_comparison_prefix: &'static str,
    pub data_subheader: &'static str,
    pub legend_close: &'static str,
    pub legend_ma_short: &'static str,
    pub legend_ma_long: &'static str,
    pub legend_actual: &'static str,
    pub legend_predicted: &'static str,
    pub plot_x_axis: &'static str,
    pub plot_y_axis: &'static str,
    pub column_company: &'static str,
    pub column_symbol: &'static str,
    pub status_fetching: &'static str,
    pub status_idle: &'static str,
    pub status_model_ready: &'static str,
    pub status_model_missing: &'static str,
    pub status_model_pending: &'static str,
    pub status_rescale: &'static str,
}

pub const UI_TEXT: UiText = UiText {
    app_title: "Stock Trend Prediction",
    nav_heading: "Navigation",
    ticker_prompt: "Enter Stock Ticker",
    show_graphs: "Show Graphs",
    show_data: "Show Data",
    compare_dates: "Compare Dates",
    start_date_prompt: "Enter Start Date",
    end_date_prompt: "Enter End Date",
    company_search_prompt: "Search for a company:",
    chart_close: "Closing Price vs Time Chart",
    chart_close_ma100: "Closing Price vs Time Chart with 100MA",
    chart_close_ma100_ma200: "Closing Price vs Time Chart with 100MA & 200MA",
    chart_forecast: "Predictions vs Original",
    chart_comparison_prefix: "Closing Price",
    data_subheader: "Daily data since 2010",
    legend_close: "Close",
    legend_ma_short: "100MA",
    legend_ma_long: "200MA",
    legend_actual: "Original Price",
    legend_predicted: "Predicted Price",
    plot_x_axis: "Time",
    plot_y_axis: "Price",
    column_company: "Company",
    column_symbol: "Symbol",
    status_fetching: "Fetching...",
    status_idle: "Idle",
    status_model_ready: "Model ready",
    status_model_missing: "Model unavailable",
    status_model_pending: "Model not loaded yet",
    status_rescale: "Rescale",
};
