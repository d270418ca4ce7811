//! Repeating-timer scheduler built on the tokio runtime.
//!
//! Provides:
//! - The `Scheduler` capability consumed by the job registry
//! - `TokioScheduler`, which runs every job in its own task on a fixed-rate
//!   `tokio::time::Interval` anchored at registration time
//! - Cancellation via `CancellationToken`, checked before every firing

use std::panic::AssertUnwindSafe;
use std::time::Duration;

use focusbot_types::chat::ChatId;
use focusbot_types::error::SchedulerError;
use futures_util::FutureExt;
use tokio::runtime::Handle;
use tokio::time::{Instant, MissedTickBehavior};

use super::job::{JobCallback, JobHandle};

// ---------------------------------------------------------------------------
// Scheduler trait
// ---------------------------------------------------------------------------

/// Capability to run a callback repeatedly on a fixed interval.
///
/// Both methods are synchronous and must not block: the registry calls them
/// while holding a per-chat lock.
pub trait Scheduler: Send + Sync {
    /// Run `callback` once after `first_delay`, then every `interval`.
    fn schedule_repeating(
        &self,
        tag: ChatId,
        interval: Duration,
        first_delay: Duration,
        callback: JobCallback,
    ) -> Result<JobHandle, SchedulerError>;

    /// Stop all future firings of `handle`.
    fn cancel(&self, handle: &JobHandle) {
        handle.cancel();
    }
}

// ---------------------------------------------------------------------------
// TokioScheduler
// ---------------------------------------------------------------------------

/// Scheduler that spawns one task per job onto a tokio runtime.
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    runtime: Handle,
}

impl TokioScheduler {
    /// Bind to the runtime of the calling context.
    ///
    /// Fails with [`SchedulerError::Unavailable`] outside a tokio runtime.
    pub fn new() -> Result<Self, SchedulerError> {
        let runtime =
            Handle::try_current().map_err(|e| SchedulerError::Unavailable(e.to_string()))?;
        Ok(Self { runtime })
    }
}

impl Scheduler for TokioScheduler {
    fn schedule_repeating(
        &self,
        tag: ChatId,
        interval: Duration,
        first_delay: Duration,
        callback: JobCallback,
    ) -> Result<JobHandle, SchedulerError> {
        if interval.is_zero() {
            return Err(SchedulerError::InvalidSchedule(
                "interval must be > 0".to_string(),
            ));
        }

        let start = Instant::now()
            .checked_add(first_delay)
            .filter(|start| start.checked_add(interval).is_some())
            .ok_or_else(|| {
                SchedulerError::InvalidSchedule(format!(
                    "first delay {first_delay:?} with interval {interval:?} overflows the timer"
                ))
            })?;

        let handle = JobHandle::new(tag, interval, first_delay);
        self.runtime.spawn(run_job(handle.clone(), start, callback));

        tracing::debug!(chat_id = %tag, job_id = %handle.id(), ?interval, ?first_delay, "job scheduled");
        Ok(handle)
    }
}

/// Drive one job until its token is cancelled.
///
/// Ticks are anchored at `start`, so a slow callback does not shift later
/// firings. Ticks missed while a callback overran are skipped, not bunched.
async fn run_job(job: JobHandle, start: Instant, callback: JobCallback) {
    let token = job.cancellation_token();
    let mut ticker = tokio::time::interval_at(start, job.interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            biased;
            _ = token.cancelled() => break,
            _ = ticker.tick() => {}
        }

        job.record_fire();
        let chat_id = job.tag();
        match AssertUnwindSafe(callback(chat_id)).catch_unwind().await {
            Ok(Ok(())) => {
                tracing::debug!(%chat_id, job_id = %job.id(), "job fired");
            }
            Ok(Err(err)) => {
                job.record_failure();
                tracing::warn!(%chat_id, job_id = %job.id(), error = %err, "job firing failed");
            }
            Err(_) => {
                job.record_failure();
                tracing::error!(%chat_id, job_id = %job.id(), "job callback panicked");
            }
        }
    }

    tracing::debug!(chat_id = %job.tag(), job_id = %job.id(), fires = job.fire_count(), "job stopped");
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
