//! Messaging gateway trait definition.

use focusbot_types::chat::{ActionKeyboard, ChatId, MessageRef};
use focusbot_types::error::GatewayError;

/// Outbound side of the chat platform.
///
/// Implementations live in focusbot-infra (e.g., TelegramGateway).
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
pub trait MessagingGateway: Send + Sync + 'static {
    /// Send a message, optionally with selectable actions attached.
    fn send(
        &self,
        chat_id: ChatId,
        text: &str,
        keyboard: Option<&ActionKeyboard>,
    ) -> impl std::future::Future<Output = Result<MessageRef, GatewayError>> + Send;

    /// Replace the content of a previously sent message.
    fn edit(
        &self,
        message: &MessageRef,
        text: &str,
    ) -> impl std::future::Future<Output = Result<(), GatewayError>> + Send;

    /// Signal receipt of an action selection to the originating client.
    fn acknowledge(
        &self,
        interaction_id: &str,
    ) -> impl std::future::Future<Output = Result<(), GatewayError>> + Send;
}
