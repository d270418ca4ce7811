//! Telegram transport built on teloxide.
//!
//! - `gateway` -- [`TelegramGateway`], the outbound `MessagingGateway`
//! - `dispatch` -- command/callback-query routing into the session handlers

pub mod dispatch;
pub mod gateway;

pub use dispatch::{BotHandlers, Command, run_dispatcher};
pub use gateway::TelegramGateway;
