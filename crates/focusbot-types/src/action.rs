//! Reminder response actions.
//!
//! Every reminder prompt offers the same closed set of actions. The action
//! code travels as the inline button payload and comes back verbatim on
//! selection; anything outside the set is treated as unrecognized.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnknownAction;

/// A user's response to a reminder prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderAction {
    Stand,
    Contain,
    Continue,
}

impl ReminderAction {
    /// All actions, in the order they are laid out on the prompt.
    pub const ALL: [ReminderAction; 3] = [
        ReminderAction::Stand,
        ReminderAction::Contain,
        ReminderAction::Continue,
    ];

    /// Payload carried by the action's button.
    pub fn code(self) -> &'static str {
        match self {
            ReminderAction::Stand => "stand",
            ReminderAction::Contain => "contain",
            ReminderAction::Continue => "continue",
        }
    }

    /// Button label.
    pub fn label(self) -> &'static str {
        match self {
            ReminderAction::Stand => "🧍 Stand",
            ReminderAction::Contain => "📦 Contain",
            ReminderAction::Continue => "✅ Continue",
        }
    }

    /// Parse an untrusted payload. `None` for anything outside the closed set.
    pub fn from_payload(payload: Option<&str>) -> Option<Self> {
        payload.and_then(|p| p.parse().ok())
    }
}

impl fmt::Display for ReminderAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ReminderAction {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stand" => Ok(ReminderAction::Stand),
            "contain" => Ok(ReminderAction::Contain),
            "continue" => Ok(ReminderAction::Continue),
            other => Err(UnknownAction(other.to_string())),
        }
    }
}
