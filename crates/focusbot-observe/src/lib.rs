//! Observability setup for focusbot: tracing subscriber initialization and
//! shared span/field names.

pub mod attrs;
pub mod tracing_setup;
