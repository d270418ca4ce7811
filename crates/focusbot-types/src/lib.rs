//! Shared domain types for focusbot.
//!
//! This crate contains the domain types used across the reminder service:
//! chat identifiers, message references, reminder actions, configuration,
//! and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod action;
pub mod chat;
pub mod config;
pub mod error;
