use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use tracing::{info, warn};

use super::{Job, JobContext};
use crate::errors::AppResult;
use crate::messages::calendar_message;
use crate::models::{CalendarEvent, Recipient};
use crate::notify::{Notifier, broadcast};
use crate::providers::CalendarSource;
use crate::utils::time::tomorrow;

/// Evening digest of tomorrow's high-impact events for the major currencies.
pub struct CalendarNewsJob {
    calendar: Arc<dyn CalendarSource>,
    notifier: Arc<dyn Notifier>,
    recipients: Arc<Vec<Recipient>>,
}

impl CalendarNewsJob {
    pub const ID: &'static str = "calendar_news";

    pub fn new(ctx: &JobContext) -> Self {
        Self {
            calendar: ctx.calendar.clone(),
            notifier: ctx.notifier.clone(),
            recipients: ctx.recipients.clone(),
        }
    }
}

/// Keeps high-impact events in a major currency that fall on `day`, in
/// their original order.
pub fn relevant_events(events: Vec<CalendarEvent>, day: NaiveDate) -> Vec<CalendarEvent> {
    events
        .into_iter()
        .filter(|e| e.is_major_currency() && e.is_high_impact())
        .filter(|e| match e.day() {
            Some(event_day) => event_day == day,
            None => {
                warn!(date = %e.date, event = %e.event, "unparseable event date");
                false
            }
        })
        .collect()
}

#[async_trait]
impl Job for CalendarNewsJob {
    fn id(&self) -> &'static str {
        Self::ID
    }

    async fn run(&self, now: DateTime<Utc>) -> AppResult<()> {
        let day = tomorrow(now);
        let events = self.calendar.events_between(now.date_naive(), day).await?;
        let total = events.len();
        let relevant = relevant_events(events, day);
        info!(total, relevant = relevant.len(), %day, "calendar filtered");

        let message = calendar_message(day, &relevant);
        let report = broadcast(self.notifier.as_ref(), &self.recipients, &message).await;
        info!(delivered = report.delivered, failed = report.failed, "economic calendar distributed");
        Ok(())
    }
}
