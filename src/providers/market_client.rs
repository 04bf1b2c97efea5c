use async_trait::async_trait;
use reqwest::Client;
use tracing::{info, instrument};

use super::fetch_json;
use crate::errors::AppResult;
use crate::models::HistoricalResponse;

#[async_trait]
pub trait MarketDataSource: Send + Sync {
    async fn historical(&self) -> AppResult<HistoricalResponse>;
}

/// Financial Modeling Prep historical-price endpoint. The configured URL is
/// complete (symbol and API key included).
#[derive(Clone)]
pub struct FmpClient {
    http: Client,
    url: String,
}

impl FmpClient {
    pub fn new(http: Client, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
        }
    }
}

#[async_trait]
impl MarketDataSource for FmpClient {
    #[instrument(skip(self))]
    async fn historical(&self) -> AppResult<HistoricalResponse> {
        let response: HistoricalResponse =
            fetch_json("market data", self.http.get(&self.url)).await?;
        info!(
            symbol = response.symbol.as_deref().unwrap_or("?"),
            points = response.historical.len(),
            "historical prices fetched"
        );
        Ok(response)
    }
}
