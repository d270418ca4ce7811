//! Reminder sessions: the `/start` lifecycle, the timer-fired prompt, and the
//! handling of the user's response to it.

pub mod dispatcher;
pub mod interaction;
pub mod session;
pub mod text;

pub use dispatcher::ReminderDispatcher;
pub use interaction::{InteractionHandler, InteractionOutcome};
pub use session::{SessionController, SessionStatus};
