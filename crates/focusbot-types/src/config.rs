//! Reminder schedule configuration.
//!
//! `ReminderConfig` represents the optional `focusbot.toml` that controls how
//! often reminders fire. All fields have sensible defaults.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Upper bound for both schedule fields: one week.
pub const MAX_SCHEDULE_SECS: u64 = 7 * 24 * 60 * 60;

/// Schedule applied to every chat session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderConfig {
    /// Seconds between reminders.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,

    /// Seconds from `/start` until the first reminder.
    #[serde(default = "default_first_delay_secs")]
    pub first_delay_secs: u64,
}

fn default_interval_secs() -> u64 {
    30 * 60
}

fn default_first_delay_secs() -> u64 {
    1
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            first_delay_secs: default_first_delay_secs(),
        }
    }
}

impl ReminderConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn first_delay(&self) -> Duration {
        Duration::from_secs(self.first_delay_secs)
    }

    /// Reject schedules that can never produce a repeating timer, and
    /// values too large to add to a timer deadline.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.interval_secs == 0 {
            return Err(ConfigError::InvalidInterval);
        }
        if self.interval_secs > MAX_SCHEDULE_SECS {
            return Err(ConfigError::ScheduleOutOfRange("interval_secs"));
        }
        if self.first_delay_secs > MAX_SCHEDULE_SECS {
            return Err(ConfigError::ScheduleOutOfRange("first_delay_secs"));
        }
        Ok(())
    }
}
