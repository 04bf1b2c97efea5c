use std::sync::Arc;

use tracing::info;

use super::calendar_news::CalendarNewsJob;
use super::heartbeat::HeartbeatJob;
use super::xau_sheet::XauSheetJob;
use super::xau_stats::XauStatsJob;
use super::{Job, JobContext};
use crate::config::JobConfig;
use crate::errors::{AppError, AppResult};
use crate::scheduler::Cadence;

pub fn build(id: &str, ctx: &JobContext) -> AppResult<Arc<dyn Job>> {
    let job: Arc<dyn Job> = match id {
        HeartbeatJob::ID => Arc::new(HeartbeatJob::new(ctx)),
        CalendarNewsJob::ID => Arc::new(CalendarNewsJob::new(ctx)),
        XauStatsJob::ID => Arc::new(XauStatsJob::new(ctx)),
        XauSheetJob::ID => Arc::new(XauSheetJob::new(ctx)),
        other => return Err(AppError::Config(format!("job {other} not registered"))),
    };
    Ok(job)
}

/// Resolves every enabled job and its cadence without starting anything, so
/// an unknown id or a malformed time fails before any task exists.
pub fn plan(configs: &[JobConfig], ctx: &JobContext) -> AppResult<Vec<(Arc<dyn Job>, Cadence)>> {
    let mut planned = Vec::with_capacity(configs.len());
    for job_cfg in configs {
        if !job_cfg.enabled {
            info!(job = %job_cfg.id, "job disabled");
            continue;
        }
        let cadence = Cadence::from_time(job_cfg.fire_time()?);
        planned.push((build(&job_cfg.id, ctx)?, cadence));
    }
    Ok(planned)
}
