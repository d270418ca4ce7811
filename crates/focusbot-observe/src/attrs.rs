//! Span names and attribute values shared across the focusbot crates.
//!
//! Span names are string constants usable directly in `tracing::info_span!`.
//! Operation values are recorded in the `op` field of the command span.

/// Service name reported to OpenTelemetry.
pub const SERVICE_NAME: &str = "focusbot";

// --- Span names ---

/// One inbound bot command (`/start`, `/stop`, ...).
pub const SPAN_COMMAND: &str = "telegram.command";

/// One inbound callback query (a pressed reminder button).
pub const SPAN_CALLBACK_QUERY: &str = "telegram.callback_query";

// --- Operation values ---

pub const OP_START: &str = "start";

pub const OP_STOP: &str = "stop";

pub const OP_STATUS: &str = "status";

pub const OP_HELP: &str = "help";
