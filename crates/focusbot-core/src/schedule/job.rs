//! Recurring job handles.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use focusbot_types::chat::ChatId;
use futures_util::future::BoxFuture;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// Outcome of a single firing. Errors are logged by the scheduler and never
/// stop the job.
pub type JobResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Callback invoked on every firing with the chat the job is tagged with.
pub type JobCallback = Arc<dyn Fn(ChatId) -> BoxFuture<'static, JobResult> + Send + Sync>;

/// Ownership token for one scheduled recurring callback.
///
/// Clones share the cancellation token and counters, so cancelling any clone
/// stops the job.
#[derive(Debug, Clone)]
pub struct JobHandle {
    id: Uuid,
    tag: ChatId,
    interval: Duration,
    first_delay: Duration,
    cancel: CancellationToken,
    fires: Arc<AtomicU64>,
    failures: Arc<AtomicU64>,
}

impl JobHandle {
    /// Create a handle for a job that has not been started yet.
    pub fn new(tag: ChatId, interval: Duration, first_delay: Duration) -> Self {
        Self {
            id: Uuid::now_v7(),
            tag,
            interval,
            first_delay,
            cancel: CancellationToken::new(),
            fires: Arc::new(AtomicU64::new(0)),
            failures: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The chat this job belongs to.
    pub fn tag(&self) -> ChatId {
        self.tag
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn first_delay(&self) -> Duration {
        self.first_delay
    }

    /// Prevent every future firing. A firing already running completes.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Token the running job watches for cancellation.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Number of times the callback has been started.
    pub fn fire_count(&self) -> u64 {
        self.fires.load(Ordering::Relaxed)
    }

    /// Number of firings whose callback returned an error or panicked.
    pub fn failure_count(&self) -> u64 {
        self.failures.load(Ordering::Relaxed)
    }

    pub fn record_fire(&self) {
        self.fires.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failure(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }
}
