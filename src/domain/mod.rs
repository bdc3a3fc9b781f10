// Domain types and value objects
pub mod daily_bar;
pub mod price_request;
pub mod price_series;

// Re-export commonly used types
pub use daily_bar::{BarField, DailyBar};
pub use price_request::PriceRequest;
pub use price_series::PriceSeries;
