//! Infrastructure layer for focusbot.
//!
//! Contains implementations of the ports defined in `focusbot-core`:
//! the Telegram messaging gateway and update dispatcher (teloxide), plus
//! startup configuration loading (bot token, reminder schedule file).

pub mod config;
pub mod telegram;
