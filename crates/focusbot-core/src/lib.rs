//! Reminder scheduling and session logic for focusbot.
//!
//! This crate defines the "ports" (gateway and scheduler traits) that the
//! infrastructure layer implements, plus the per-chat job registry and the
//! command/interaction handlers built on them. It depends only on
//! `focusbot-types` -- never on `focusbot-infra` or any transport crate.

pub mod gateway;
pub mod reminder;
pub mod schedule;

#[cfg(test)]
pub(crate) mod test_support;
