//! Handling of reminder button presses.
//!
//! One handler serves every chat. The acknowledgment always goes out first
//! so the client stops showing a pending state, then the payload decides
//! whether the prompt is edited in place.

use std::sync::Arc;
use std::time::Duration;

use focusbot_types::action::ReminderAction;
use focusbot_types::chat::ActionSelection;
use focusbot_types::error::GatewayError;

use super::text::acknowledgment_text;
use crate::gateway::MessagingGateway;

/// What happened to an action selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionOutcome {
    /// The prompt was replaced with the action's acknowledgment.
    Applied(ReminderAction),
    /// Known action, but the prompt message is no longer accessible.
    MessageUnavailable(ReminderAction),
    /// Payload outside the action set; acknowledged only.
    Unrecognized,
}

pub struct InteractionHandler<G> {
    gateway: Arc<G>,
    interval: Duration,
}

impl<G: MessagingGateway> InteractionHandler<G> {
    /// `interval` is the reminder schedule quoted back in the Continue
    /// acknowledgment.
    pub fn new(gateway: Arc<G>, interval: Duration) -> Self {
        Self { gateway, interval }
    }

    /// Acknowledge the selection, then edit the prompt for known actions.
    ///
    /// An acknowledgment failure is logged and does not stop the edit. Only
    /// a failed edit is returned as an error.
    pub async fn handle(
        &self,
        selection: &ActionSelection,
    ) -> Result<InteractionOutcome, GatewayError> {
        let chat_id = selection.chat_id;

        if let Err(err) = self.gateway.acknowledge(&selection.interaction_id).await {
            tracing::warn!(%chat_id, error = %err, "failed to acknowledge action selection");
        }

        let Some(action) = ReminderAction::from_payload(selection.payload.as_deref()) else {
            tracing::debug!(%chat_id, payload = ?selection.payload, "ignoring unrecognized action");
            return Ok(InteractionOutcome::Unrecognized);
        };

        let Some(message) = selection.message else {
            tracing::debug!(%chat_id, %action, "prompt no longer accessible, skipping edit");
            return Ok(InteractionOutcome::MessageUnavailable(action));
        };

        self.gateway
            .edit(&message, &acknowledgment_text(action, self.interval))
            .await?;

        tracing::info!(%chat_id, %action, message_id = message.message_id, "action applied");
        Ok(InteractionOutcome::Applied(action))
    }
}
