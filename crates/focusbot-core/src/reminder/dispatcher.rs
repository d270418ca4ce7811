//! Timer-fired reminder delivery.

use std::sync::Arc;
use std::time::Duration;

use focusbot_types::chat::{ActionKeyboard, ChatId, MessageRef};
use focusbot_types::error::GatewayError;

use super::text::{prompt_text, reminder_keyboard};
use crate::gateway::MessagingGateway;
use crate::schedule::job::{JobCallback, JobResult};

/// Sends the reminder prompt with its action keyboard.
pub struct ReminderDispatcher<G> {
    gateway: Arc<G>,
    prompt: String,
    keyboard: ActionKeyboard,
}

impl<G: MessagingGateway> ReminderDispatcher<G> {
    /// `interval` is the schedule the prompts are sent on; the prompt text
    /// refers to it.
    pub fn new(gateway: Arc<G>, interval: Duration) -> Self {
        Self {
            gateway,
            prompt: prompt_text(interval),
            keyboard: reminder_keyboard(),
        }
    }

    /// Send one prompt to `chat_id`.
    pub async fn dispatch(&self, chat_id: ChatId) -> Result<MessageRef, GatewayError> {
        self.gateway
            .send(chat_id, &self.prompt, Some(&self.keyboard))
            .await
    }

    /// Wrap this dispatcher as a scheduler callback.
    ///
    /// The chat id is supplied by the job on each firing, not captured here.
    pub fn job_callback(self: Arc<Self>) -> JobCallback {
        Arc::new(move |chat_id| Box::pin(fire(Arc::clone(&self), chat_id)))
    }
}

async fn fire<G: MessagingGateway>(dispatcher: Arc<ReminderDispatcher<G>>, chat_id: ChatId) -> JobResult {
    let message = dispatcher.dispatch(chat_id).await?;
    tracing::debug!(%chat_id, message_id = message.message_id, "reminder sent");
    Ok(())
}
