// Price data loading and caching, plus the static fixtures
pub mod fetch_prices;
pub mod fixtures;
pub mod prices;

// Re-export commonly used types
pub use fetch_prices::{FetchOptions, fetch_price_series};
pub use fixtures::{CompanyListing, Fixtures};
pub use prices::PriceProvider;
