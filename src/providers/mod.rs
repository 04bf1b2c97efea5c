pub mod calendar_client;
pub mod market_client;

pub use calendar_client::{CalendarSource, EconomicCalendarClient};
pub use market_client::{FmpClient, MarketDataSource};

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::errors::{AppError, AppResult};

/// Sends a prepared request and decodes a JSON body. Non-2xx statuses and
/// undecodable bodies are errors for the caller's run, never panics.
pub(crate) async fn fetch_json<T: DeserializeOwned>(
    service: &'static str,
    request: reqwest::RequestBuilder,
) -> AppResult<T> {
    let response = request.send().await?;
    let status = response.status();
    debug!(service, status = %status, "provider responded");

    let body = response.text().await?;
    if !status.is_success() {
        return Err(AppError::Upstream {
            service,
            status: status.as_u16(),
            body,
        });
    }

    serde_json::from_str(&body)
        .map_err(|e| AppError::Provider(format!("{service}: undecodable response: {e}")))
}
