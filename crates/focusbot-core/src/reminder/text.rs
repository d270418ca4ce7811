//! User-facing message text and the reminder keyboard layout.

use std::time::Duration;

use focusbot_types::action::ReminderAction;
use focusbot_types::chat::{ActionButton, ActionKeyboard};

/// Body of every reminder prompt for a schedule firing every `interval`.
pub fn prompt_text(interval: Duration) -> String {
    format!(
        "🚀 Goal 2026 Reminder\n\n\
         You have a goal to achieve this year 2026! 🏆\n\
         Stop procrastinating. Focus on success by having a positive mindset.\n\n\
         Choose your action for the next {}:",
        describe_interval(interval)
    )
}

/// Text that replaces the prompt once `action` is chosen.
pub fn acknowledgment_text(action: ReminderAction, interval: Duration) -> String {
    match action {
        ReminderAction::Stand => {
            "Good choice! Stand up, stretch, and reset your mind for success. 🧘‍♂️".to_string()
        }
        ReminderAction::Contain => {
            "Discipline is key. Stay contained and focused on the task at hand. 🛡️".to_string()
        }
        ReminderAction::Continue => format!(
            "Keep going! Your focus is sharp. See you in {} for the next check-in. 🎯",
            describe_interval(interval)
        ),
    }
}

pub const STOPPED_TEXT: &str = "Reminders stopped. Send /start whenever you want them back.";

pub const NOT_RUNNING_TEXT: &str = "No reminders are running. Send /start to begin.";

pub const HELP_TEXT: &str = "/start - start (or restart) your reminders\n\
    /stop - stop your reminders\n\
    /status - show whether reminders are running\n\
    /help - show this message";

/// Reply to `/start`.
pub fn welcome_text(interval: Duration) -> String {
    format!(
        "Welcome! Your 2026 Focus Bot is active. I will notify you every {} to keep you on track.",
        describe_interval(interval)
    )
}

/// Reply to `/status` for a chat with an active job.
pub fn status_text(interval: Duration, reminders_sent: u64) -> String {
    let noun = if reminders_sent == 1 { "reminder" } else { "reminders" };
    format!(
        "Reminders are active: every {}. {reminders_sent} {noun} sent so far.",
        describe_interval(interval)
    )
}

/// Render an interval in the largest whole unit ("30 minutes", "1 hour").
pub fn describe_interval(interval: Duration) -> String {
    let secs = interval.as_secs();
    let (n, unit) = if secs >= 3600 && secs % 3600 == 0 {
        (secs / 3600, "hour")
    } else if secs >= 60 && secs % 60 == 0 {
        (secs / 60, "minute")
    } else {
        (secs, "second")
    };
    if n == 1 {
        format!("1 {unit}")
    } else {
        format!("{n} {unit}s")
    }
}

/// Keyboard attached to every prompt: Stand and Contain on the first row,
/// Continue on its own below.
pub fn reminder_keyboard() -> ActionKeyboard {
    let button = |action: ReminderAction| ActionButton::new(action.label(), action.code());
    ActionKeyboard::new(vec![
        vec![
            button(ReminderAction::Stand),
            button(ReminderAction::Contain),
        ],
        vec![button(ReminderAction::Continue)],
    ])
}
