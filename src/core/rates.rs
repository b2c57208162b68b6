//! Rate service abstractions and core types

use crate::core::catalog::CurrencyCatalog;
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of a single convert call against the rate service.
///
/// Held only as the "current result" until the next request is issued or the
/// selected pair changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversion {
    pub result: f64,
    pub rate: f64,
    pub fetched_at: DateTime<Utc>,
}

#[async_trait]
pub trait RateService: Send + Sync {
    /// Fetches the catalog of supported currencies.
    async fn currencies(&self) -> Result<CurrencyCatalog>;

    /// Converts `amount` between two currencies at the live rate.
    async fn convert(&self, from: &str, to: &str, amount: f64) -> Result<Conversion>;
}
