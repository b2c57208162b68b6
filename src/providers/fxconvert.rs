use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::core::catalog::CurrencyCatalog;
use crate::core::rates::{Conversion, RateService};

// FxConvertProvider implementation for RateService
pub struct FxConvertProvider {
    base_url: String,
}

impl FxConvertProvider {
    pub fn new(base_url: &str) -> Self {
        FxConvertProvider {
            base_url: base_url.to_string(),
        }
    }
}

#[derive(Deserialize, Debug)]
struct CurrenciesResponse {
    data: CurrencyCatalog,
}

#[derive(Deserialize, Debug)]
struct ConvertResponse {
    result: f64,
    rate: f64,
    #[serde(alias = "fetchedAt")]
    fetched_at: DateTime<Utc>,
}

#[async_trait]
impl RateService for FxConvertProvider {
    #[instrument(name = "CatalogFetch", skip(self))]
    async fn currencies(&self) -> Result<CurrencyCatalog> {
        let url = format!("{}/currencies", self.base_url);
        debug!("Requesting currency catalog from {}", url);

        let client = reqwest::Client::builder().user_agent("fxc/1.0").build()?;
        let response = client
            .get(&url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for currency catalog URL: {}", e, url))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} for currency catalog",
                response.status()
            ));
        }

        let text = response.text().await?;

        let data: CurrenciesResponse = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse currency catalog response: {}", e))?;

        Ok(data.data)
    }

    #[instrument(
        name = "ConvertFetch",
        skip(self),
        fields(from = %from, to = %to)
    )]
    async fn convert(&self, from: &str, to: &str, amount: f64) -> Result<Conversion> {
        let url = format!(
            "{}/convert?from={from}&to={to}&amount={amount}",
            self.base_url
        );
        debug!("Requesting conversion from {}", url);

        let client = reqwest::Client::builder().user_agent("fxc/1.0").build()?;
        let response = client
            .get(&url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for pair: {}/{}", e, from, to))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} for pair: {}/{}",
                response.status(),
                from,
                to
            ));
        }

        let text = response.text().await?;

        let data: ConvertResponse = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse conversion response for {}/{}: {}", from, to, e))?;

        Ok(Conversion {
            result: data.result,
            rate: data.rate,
            fetched_at: data.fetched_at,
        })
    }
}
