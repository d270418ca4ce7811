use thiserror::Error;

use crate::config::MAX_SCHEDULE_SECS;

/// Startup configuration errors. Always fatal.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no bot token found; set TELEGRAM_TOKEN")]
    MissingToken,

    #[error("bot token is malformed (expected '<bot id>:<secret>')")]
    InvalidToken,

    #[error("reminder interval must be greater than zero")]
    InvalidInterval,

    #[error("{0} must be at most {} seconds", MAX_SCHEDULE_SECS)]
    ScheduleOutOfRange(&'static str),
}

/// Errors reported by the messaging gateway. Never fatal to a session.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("send failed: {0}")]
    SendFailed(String),

    #[error("edit failed: {0}")]
    EditFailed(String),

    #[error("acknowledge failed: {0}")]
    AcknowledgeFailed(String),
}

/// Errors from the scheduling capability.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// No timer facility is available (no async runtime).
    #[error("scheduler unavailable: {0}")]
    Unavailable(String),

    #[error("invalid schedule: {0}")]
    InvalidSchedule(String),
}

/// Errors surfaced by session commands.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Scheduler(#[from] SchedulerError),
}

/// A payload outside the closed action set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized action: '{0}'")]
pub struct UnknownAction(pub String);
