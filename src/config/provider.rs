//! Market-data provider configuration.

/// Configuration for the Yahoo chart REST endpoint
pub struct YahooConfig {
    pub base_url: &'static str,
    /// Yahoo rejects requests without a browser-ish agent
    pub user_agent: &'static str,
    pub interval: &'static str,
}

/// Default values for the HTTP client
pub struct ClientDefaults {
    pub timeout_ms: u64,
    pub connect_timeout_ms: u64,
}

/// The Master Provider Configuration
pub struct ProviderConfig {
    pub yahoo: YahooConfig,
    pub client: ClientDefaults,
}

pub const PROVIDER: ProviderConfig = ProviderConfig {
    yahoo: YahooConfig {
        base_url: "https://query1.finance.yahoo.com",
        user_agent: "Mozilla/5.0 (X11; Linux x86_64) stock-trend/0.1",
        interval: "1d",
    },
    client: ClientDefaults {
        timeout_ms: 15_000,
        connect_timeout_ms: 5_000,
    },
};
