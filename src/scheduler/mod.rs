pub mod policy;

pub use policy::{Cadence, SchedulePolicy};

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{Instrument, error, info, info_span, instrument, warn};
use uuid::Uuid;

use crate::jobs::Job;
use crate::utils::time;

/// Owns one background task per scheduled job and the stop signal they share.
pub struct Scheduler {
    stop_tx: watch::Sender<bool>,
    tasks: Vec<JoinHandle<()>>,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    pub fn new() -> Self {
        let (stop_tx, _) = watch::channel(false);
        Self {
            stop_tx,
            tasks: Vec::new(),
        }
    }

    pub fn schedule(&mut self, job: Arc<dyn Job>, cadence: Cadence) {
        let stop = self.stop_tx.subscribe();
        info!(job = job.id(), ?cadence, "job scheduled");
        self.tasks.push(tokio::spawn(run_task(job, cadence, stop)));
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Flips the stop signal and waits for every task to return. A run
    /// already in progress completes first.
    pub async fn shutdown(self) {
        let _ = self.stop_tx.send(true);
        for result in join_all(self.tasks).await {
            if let Err(e) = result {
                warn!(error = %e, "job task ended abnormally");
            }
        }
        info!("scheduler stopped");
    }
}

#[instrument(skip_all, fields(job = job.id()))]
async fn run_task(job: Arc<dyn Job>, cadence: Cadence, mut stop: watch::Receiver<bool>) {
    let policy = job.policy();
    let mut last = None;

    loop {
        if *stop.borrow() {
            break;
        }

        let now = time::now();
        let next = cadence.next_fire(now, last);
        let wait = (next - now).to_std().unwrap_or(Duration::ZERO);
        info!(next_run = %next, "next run scheduled");

        tokio::select! {
            _ = tokio::time::sleep(wait) => {}
            changed = stop.changed() => {
                if changed.is_err() {
                    break;
                }
                continue;
            }
        }

        if *stop.borrow() {
            break;
        }
        last = Some(next);

        let fired_at = time::now();
        if !policy.allows(fired_at) {
            info!(?policy, "run skipped by schedule policy");
            continue;
        }

        let run_id = Uuid::new_v4();
        let span = info_span!("run", %run_id);
        match job.run(fired_at).instrument(span).await {
            Ok(()) => info!(%run_id, "run completed"),
            Err(e) => error!(%run_id, error = %e, "run failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{AppError, AppResult};
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counting {
        runs: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl Job for Counting {
        fn id(&self) -> &'static str {
            "counting"
        }

        async fn run(&self, _now: DateTime<Utc>) -> AppResult<()> {
            self.runs.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(AppError::Other("boom".into()))
            } else {
                Ok(())
            }
        }
    }

    async fn wait_for_runs(job: &Counting, expected: usize) {
        tokio::time::timeout(Duration::from_secs(5), async {
            while job.runs.load(Ordering::SeqCst) < expected {
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("job did not run in time");
    }

    #[tokio::test]
    async fn daily_job_runs_once_then_stops_on_signal() {
        let job = Arc::new(Counting {
            runs: AtomicUsize::new(0),
            fail: false,
        });
        let mut scheduler = Scheduler::new();
        scheduler.schedule(job.clone(), Cadence::Daily);
        assert_eq!(scheduler.len(), 1);

        wait_for_runs(&job, 1).await;
        tokio::time::timeout(Duration::from_secs(5), scheduler.shutdown())
            .await
            .expect("scheduler did not stop");
        assert_eq!(job.runs.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failing_run_keeps_the_task_alive() {
        let job = Arc::new(Counting {
            runs: AtomicUsize::new(0),
            fail: true,
        });
        let mut scheduler = Scheduler::new();
        scheduler.schedule(job.clone(), Cadence::Daily);

        wait_for_runs(&job, 1).await;
        tokio::time::sleep(Duration::from_millis(20)).await;
        // The task is still parked waiting for tomorrow's run, so shutdown
        // has a live task to stop.
        tokio::time::timeout(Duration::from_secs(5), scheduler.shutdown())
            .await
            .expect("scheduler did not stop");
    }
}
