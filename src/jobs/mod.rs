mod context;
pub mod calendar_news;
pub mod heartbeat;
pub mod registry;
pub mod xau_sheet;
pub mod xau_stats;

pub use context::JobContext;
pub use registry::{build as build_job, plan as plan_jobs};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::AppResult;
use crate::scheduler::SchedulePolicy;

/// A unit of daily work. Each call recomputes everything from scratch; an
/// `Err` aborts only the current run.
#[async_trait]
pub trait Job: Send + Sync {
    fn id(&self) -> &'static str;

    fn policy(&self) -> SchedulePolicy {
        SchedulePolicy::Always
    }

    async fn run(&self, now: DateTime<Utc>) -> AppResult<()>;
}
