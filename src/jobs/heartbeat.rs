use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::info;

use super::{Job, JobContext};
use crate::errors::AppResult;
use crate::messages::HEARTBEAT;
use crate::models::Recipient;
use crate::notify::{Notifier, broadcast};

/// Daily "still alive" ping to every recipient.
pub struct HeartbeatJob {
    notifier: Arc<dyn Notifier>,
    recipients: Arc<Vec<Recipient>>,
}

impl HeartbeatJob {
    pub const ID: &'static str = "heartbeat";

    pub fn new(ctx: &JobContext) -> Self {
        Self {
            notifier: ctx.notifier.clone(),
            recipients: ctx.recipients.clone(),
        }
    }
}

#[async_trait]
impl Job for HeartbeatJob {
    fn id(&self) -> &'static str {
        Self::ID
    }

    async fn run(&self, _now: DateTime<Utc>) -> AppResult<()> {
        let report = broadcast(self.notifier.as_ref(), &self.recipients, HEARTBEAT).await;
        info!(delivered = report.delivered, failed = report.failed, "heartbeat distributed");
        Ok(())
    }
}
