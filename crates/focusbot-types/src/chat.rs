//! Chat-level identifiers and message shapes exchanged with the gateway.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier of a chat. The sole key for job lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatId(pub i64);

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reference to a message previously sent by the bot, usable for editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageRef {
    pub chat_id: ChatId,
    pub message_id: i32,
}

/// A single selectable button carrying an opaque payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionButton {
    /// Text shown on the button.
    pub label: String,
    /// Payload delivered back on selection.
    pub payload: String,
}

impl ActionButton {
    pub fn new(label: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            payload: payload.into(),
        }
    }
}

/// Rows of buttons attached to an outgoing message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionKeyboard {
    pub rows: Vec<Vec<ActionButton>>,
}

impl ActionKeyboard {
    pub fn new(rows: Vec<Vec<ActionButton>>) -> Self {
        Self { rows }
    }

    /// Iterate every button in row order.
    pub fn buttons(&self) -> impl Iterator<Item = &ActionButton> {
        self.rows.iter().flatten()
    }
}

/// An inbound action selection (a pressed inline button).
///
/// `message` is `None` when the platform no longer exposes the message the
/// button was attached to. `payload` is whatever the client sent back and is
/// not trusted to be a known action code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionSelection {
    pub chat_id: ChatId,
    /// Identifier used to acknowledge the interaction to the client.
    pub interaction_id: String,
    pub message: Option<MessageRef>,
    pub payload: Option<String>,
}
