//! Configuration module for the stock trend dashboard.

pub mod forecast;
pub mod provider;

mod debug; // Private: use crate::config::DEBUG_FLAGS rather than crate::config::debug::DEBUG_FLAGS
pub use debug::DEBUG_FLAGS;

pub mod persistence;
pub mod plot;

// Re-export commonly used items
pub use forecast::{FORECAST, ForecastConfig, RescaleMode};
pub use persistence::{PERSISTENCE, price_cache_filename};
pub use provider::{PROVIDER, ProviderConfig};
