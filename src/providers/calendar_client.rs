use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use tracing::{info, instrument};

use super::fetch_json;
use crate::errors::AppResult;
use crate::models::CalendarEvent;
use crate::utils::time::ISO_DATE;

#[async_trait]
pub trait CalendarSource: Send + Sync {
    /// Events scheduled between `from` and `to`, both inclusive.
    async fn events_between(&self, from: NaiveDate, to: NaiveDate)
    -> AppResult<Vec<CalendarEvent>>;
}

#[derive(Clone)]
pub struct EconomicCalendarClient {
    http: Client,
    url: String,
    api_key: String,
}

impl EconomicCalendarClient {
    pub fn new(http: Client, url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
            api_key: api_key.into(),
        }
    }

    fn query(&self, from: NaiveDate, to: NaiveDate) -> [(&'static str, String); 3] {
        [
            ("from", from.format(ISO_DATE).to_string()),
            ("to", to.format(ISO_DATE).to_string()),
            ("apikey", self.api_key.clone()),
        ]
    }
}

#[async_trait]
impl CalendarSource for EconomicCalendarClient {
    #[instrument(skip(self))]
    async fn events_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<CalendarEvent>> {
        info!(url = %self.url, "calling economic calendar");
        let request = self.http.get(&self.url).query(&self.query(from, to));
        let events: Vec<CalendarEvent> = fetch_json("economic calendar", request).await?;
        info!(count = events.len(), "economic calendar fetched");
        Ok(events)
    }
}
