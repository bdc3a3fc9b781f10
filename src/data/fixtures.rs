//! Static headlines and the company/symbol directory.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const EMBEDDED_FIXTURES: &str = include_str!("../../assets/fixtures.json");

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CompanyListing {
    pub company: String,
    pub symbol: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Fixtures {
    pub headlines: Vec<String>,
    /// Display order; duplicates are intentional and preserved
    pub tickers: Vec<CompanyListing>,
}

impl Fixtures {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("Failed to decode fixtures")
    }

    pub fn embedded() -> Result<Self> {
        Self::from_json(EMBEDDED_FIXTURES)
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).context(format!("Failed to read fixtures: {}", path.display()))?;
        Self::from_json(&text)
    }

    /// File at `path`, else the copy compiled into the binary.
    pub fn load_or_embedded(path: &Path) -> Result<Self> {
        Self::load_from_path(path).or_else(|e| {
            log::warn!("{:#}; using embedded fixtures", e);
            Self::embedded()
        })
    }

    /// Rows whose company name contains `query`, ignoring case. A blank query matches everything.
    pub fn search(&self, query: &str) -> Vec<&CompanyListing> {
        let needle = query.to_lowercase();
        self.tickers
            .iter()
            .filter(|row| row.company.to_lowercase().contains(&needle))
            .collect()
    }
}
