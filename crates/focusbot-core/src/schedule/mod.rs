//! Per-chat recurring job scheduling.
//!
//! - `job` -- job handles and the callback type fired on every tick
//! - `scheduler` -- the scheduling capability and its tokio implementation
//! - `registry` -- chat id -> job handle map with atomic per-chat replace

pub mod job;
pub mod registry;
pub mod scheduler;

pub use job::{JobCallback, JobHandle, JobResult};
pub use registry::JobRegistry;
pub use scheduler::{Scheduler, TokioScheduler};
