//! Telegram Gateway
//!
//! Outbound half of the Telegram transport. Sends prompts with inline
//! keyboards, edits them in place, and answers callback queries.

use focusbot_core::gateway::MessagingGateway;
use focusbot_types::chat::{ActionKeyboard, ChatId, MessageRef};
use focusbot_types::error::GatewayError;
use secrecy::{ExposeSecret, SecretString};
use teloxide::payloads::SendMessageSetters;
use teloxide::prelude::*;
use teloxide::types::{CallbackQueryId, InlineKeyboardButton, InlineKeyboardMarkup, MessageId};

/// Telegram Bot API client implementing [`MessagingGateway`].
#[derive(Clone)]
pub struct TelegramGateway {
    bot: Bot,
}

impl TelegramGateway {
    /// Create a gateway for the given bot token. No network call is made.
    pub fn new(token: &SecretString) -> Self {
        Self {
            bot: Bot::new(token.expose_secret()),
        }
    }

    /// The underlying client, shared with the update dispatcher.
    pub fn bot(&self) -> &Bot {
        &self.bot
    }
}

/// Convert an action keyboard to Telegram's inline keyboard markup.
pub fn inline_markup(keyboard: &ActionKeyboard) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(keyboard.rows.iter().map(|row| {
        row.iter()
            .map(|button| InlineKeyboardButton::callback(button.label.clone(), button.payload.clone()))
            .collect::<Vec<_>>()
    }))
}

impl MessagingGateway for TelegramGateway {
    async fn send(
        &self,
        chat_id: ChatId,
        text: &str,
        keyboard: Option<&ActionKeyboard>,
    ) -> Result<MessageRef, GatewayError> {
        let mut request = self.bot.send_message(teloxide::types::ChatId(chat_id.0), text);
        if let Some(keyboard) = keyboard {
            request = request.reply_markup(inline_markup(keyboard));
        }

        let message = request
            .await
            .map_err(|e| GatewayError::SendFailed(e.to_string()))?;
        Ok(MessageRef {
            chat_id,
            message_id: message.id.0,
        })
    }

    async fn edit(&self, message: &MessageRef, text: &str) -> Result<(), GatewayError> {
        self.bot
            .edit_message_text(
                teloxide::types::ChatId(message.chat_id.0),
                MessageId(message.message_id),
                text,
            )
            .await
            .map_err(|e| GatewayError::EditFailed(e.to_string()))?;
        Ok(())
    }

    async fn acknowledge(&self, interaction_id: &str) -> Result<(), GatewayError> {
        self.bot
            .answer_callback_query(CallbackQueryId(interaction_id.to_string()))
            .await
            .map_err(|e| GatewayError::AcknowledgeFailed(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use focusbot_core::reminder::text::reminder_keyboard;
    use teloxide::types::InlineKeyboardButtonKind;

    #[test]
    fn test_inline_markup_preserves_layout_and_payloads() {
        let markup = inline_markup(&reminder_keyboard());

        assert_eq!(markup.inline_keyboard.len(), 2);
        assert_eq!(markup.inline_keyboard[0].len(), 2);
        assert_eq!(markup.inline_keyboard[1].len(), 1);

        let payloads: Vec<String> = markup
            .inline_keyboard
            .iter()
            .flatten()
            .map(|button| match &button.kind {
                InlineKeyboardButtonKind::CallbackData(data) => data.clone(),
                other => panic!("expected callback button, got {other:?}"),
            })
            .collect();
        assert_eq!(payloads, vec!["stand", "contain", "continue"]);
        assert!(markup.inline_keyboard[0][0].text.contains("Stand"));
    }

    #[test]
    fn test_gateway_new_makes_no_request() {
        let token = SecretString::from("123456:TEST-token".to_string());
        let gateway = TelegramGateway::new(&token);
        assert_eq!(gateway.bot().token(), "123456:TEST-token");
    }
}
