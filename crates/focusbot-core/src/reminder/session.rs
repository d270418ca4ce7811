//! Session commands: `/start`, `/stop`, `/status`, `/help`.
//!
//! `start` is the only path that installs jobs, and it always goes through
//! [`JobRegistry::replace`], so a chat never holds more than one reminder job
//! no matter how often `/start` is sent.

use std::sync::Arc;
use std::time::Duration;

use focusbot_types::chat::ChatId;
use focusbot_types::config::ReminderConfig;
use focusbot_types::error::SessionError;

use super::dispatcher::ReminderDispatcher;
use super::text::{HELP_TEXT, NOT_RUNNING_TEXT, STOPPED_TEXT, status_text, welcome_text};
use crate::gateway::MessagingGateway;
use crate::schedule::{JobHandle, JobRegistry, Scheduler};

/// Snapshot of a chat's reminder session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionStatus {
    pub active: bool,
    pub interval: Option<Duration>,
    pub reminders_sent: u64,
}

/// Handles session commands for every chat.
pub struct SessionController<G, S: Scheduler> {
    gateway: Arc<G>,
    registry: Arc<JobRegistry<S>>,
    dispatcher: Arc<ReminderDispatcher<G>>,
    config: ReminderConfig,
}

impl<G: MessagingGateway, S: Scheduler> SessionController<G, S> {
    pub fn new(gateway: Arc<G>, registry: Arc<JobRegistry<S>>, config: ReminderConfig) -> Self {
        let dispatcher = Arc::new(ReminderDispatcher::new(
            Arc::clone(&gateway),
            config.interval(),
        ));
        Self {
            gateway,
            registry,
            dispatcher,
            config,
        }
    }

    pub fn registry(&self) -> &Arc<JobRegistry<S>> {
        &self.registry
    }

    /// Start (or restart) reminders for `chat_id`.
    ///
    /// Any existing job for the chat is cancelled before the new one is
    /// installed. A failed welcome message is logged; the session stays active.
    pub async fn start(&self, chat_id: ChatId) -> Result<JobHandle, SessionError> {
        let handle = self.registry.replace(
            chat_id,
            self.config.interval(),
            self.config.first_delay(),
            Arc::clone(&self.dispatcher).job_callback(),
        )?;
        tracing::info!(%chat_id, job_id = %handle.id(), "reminder session started");

        let welcome = welcome_text(self.config.interval());
        if let Err(err) = self.gateway.send(chat_id, &welcome, None).await {
            tracing::warn!(%chat_id, error = %err, "failed to send welcome message");
        }
        Ok(handle)
    }

    /// Stop reminders for `chat_id`. Returns the number of jobs cancelled.
    pub async fn stop(&self, chat_id: ChatId) -> usize {
        let cancelled = self.registry.cancel_all(chat_id);
        if cancelled > 0 {
            tracing::info!(%chat_id, cancelled, "reminder session stopped");
        }

        let reply = if cancelled > 0 {
            STOPPED_TEXT
        } else {
            NOT_RUNNING_TEXT
        };
        self.reply(chat_id, reply).await;
        cancelled
    }

    /// Report the chat's session state back to it.
    pub async fn status(&self, chat_id: ChatId) -> SessionStatus {
        let status = self.session_status(chat_id);
        let reply = match status.interval {
            Some(interval) if status.active => status_text(interval, status.reminders_sent),
            _ => NOT_RUNNING_TEXT.to_string(),
        };
        self.reply(chat_id, &reply).await;
        status
    }

    pub async fn help(&self, chat_id: ChatId) {
        self.reply(chat_id, HELP_TEXT).await;
    }

    /// Current state without replying.
    pub fn session_status(&self, chat_id: ChatId) -> SessionStatus {
        let jobs = self.registry.find_by_tag(chat_id);
        match jobs.iter().find(|job| !job.is_cancelled()) {
            Some(job) => SessionStatus {
                active: true,
                interval: Some(job.interval()),
                reminders_sent: job.fire_count().saturating_sub(job.failure_count()),
            },
            None => SessionStatus {
                active: false,
                interval: None,
                reminders_sent: 0,
            },
        }
    }

    async fn reply(&self, chat_id: ChatId, text: &str) {
        if let Err(err) = self.gateway.send(chat_id, text, None).await {
            tracing::warn!(%chat_id, error = %err, "failed to send reply");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reminder::text::prompt_text;
    use crate::schedule::TokioScheduler;
    use crate::test_support::{GatewayCall, RecordingGateway};

    const INTERVAL: Duration = Duration::from_secs(30 * 60);

    fn controller(
        gateway: &Arc<RecordingGateway>,
    ) -> SessionController<RecordingGateway, TokioScheduler> {
        let registry = Arc::new(JobRegistry::new(TokioScheduler::new().unwrap()));
        SessionController::new(Arc::clone(gateway), registry, ReminderConfig::default())
    }

    #[tokio::test(start_paused = true)]
    async fn start_sends_welcome_then_first_prompt() {
        let gateway = RecordingGateway::new();
        let sessions = controller(&gateway);

        sessions.start(ChatId(1)).await.unwrap();
        tokio::time::sleep(Duration::from_secs(2)).await;

        let calls = gateway.calls();
        assert_eq!(calls.len(), 2);
        assert!(
            matches!(&calls[0], GatewayCall::Send { text, keyboard: None, .. } if text.contains("every 30 minutes"))
        );
        assert!(
            matches!(&calls[1], GatewayCall::Send { text, keyboard: Some(_), .. } if *text == prompt_text(INTERVAL))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn texts_follow_configured_interval() {
        let gateway = RecordingGateway::new();
        let registry = Arc::new(JobRegistry::new(TokioScheduler::new().unwrap()));
        let config = ReminderConfig {
            interval_secs: 600,
            first_delay_secs: 1,
        };
        let sessions = SessionController::new(Arc::clone(&gateway), registry, config);

        sessions.start(ChatId(1)).await.unwrap();
        tokio::time::sleep(Duration::from_secs(600 + 2)).await;

        assert_eq!(gateway.prompts_sent_to(ChatId(1)), 2);
        let texts: Vec<String> = gateway
            .calls()
            .into_iter()
            .filter_map(|c| match c {
                GatewayCall::Send { text, .. } => Some(text),
                _ => None,
            })
            .collect();
        assert!(texts[0].contains("every 10 minutes"));
        assert!(texts[1].contains("for the next 10 minutes"));
        assert!(texts.iter().all(|t| !t.contains("30 minutes")));
    }

    #[tokio::test(start_paused = true)]
    async fn repeated_start_yields_one_prompt_per_interval() {
        let gateway = RecordingGateway::new();
        let sessions = controller(&gateway);

        for _ in 0..4 {
            sessions.start(ChatId(1)).await.unwrap();
        }
        assert_eq!(sessions.registry().find_by_tag(ChatId(1)).len(), 1);

        tokio::time::sleep(INTERVAL * 2 + Duration::from_secs(2)).await;
        assert_eq!(gateway.prompts_sent_to(ChatId(1)), 3);
        assert_eq!(gateway.replies_to(ChatId(1)).len(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn sessions_for_different_chats_are_independent() {
        let gateway = RecordingGateway::new();
        let sessions = controller(&gateway);

        let a = sessions.start(ChatId(1)).await.unwrap();
        let b = sessions.start(ChatId(2)).await.unwrap();
        tokio::time::sleep(Duration::from_secs(5)).await;

        let a2 = sessions.start(ChatId(1)).await.unwrap();
        assert!(a.is_cancelled());
        assert!(!a2.is_cancelled());
        assert!(!b.is_cancelled());

        tokio::time::sleep(INTERVAL).await;
        // B: t=1s and t=1801s. A: old job at t=1s, new job at t=6s; old t=1801s suppressed.
        assert_eq!(gateway.prompts_sent_to(ChatId(2)), 2);
        assert_eq!(gateway.prompts_sent_to(ChatId(1)), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_prompt_send_does_not_stop_next_firing() {
        let gateway = RecordingGateway::new();
        let sessions = controller(&gateway);

        sessions.start(ChatId(1)).await.unwrap();
        gateway.fail_next_sends(1);
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(gateway.prompts_sent_to(ChatId(1)), 0);

        tokio::time::sleep(INTERVAL).await;
        assert_eq!(gateway.prompts_sent_to(ChatId(1)), 1);
        assert!(sessions.session_status(ChatId(1)).active);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_welcome_keeps_session_active() {
        let gateway = RecordingGateway::new();
        let sessions = controller(&gateway);

        gateway.fail_next_sends(1);
        sessions.start(ChatId(1)).await.unwrap();
        assert!(gateway.replies_to(ChatId(1)).is_empty());

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(gateway.prompts_sent_to(ChatId(1)), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_cancels_and_replies() {
        let gateway = RecordingGateway::new();
        let sessions = controller(&gateway);

        sessions.start(ChatId(1)).await.unwrap();
        tokio::time::sleep(Duration::from_secs(2)).await;

        assert_eq!(sessions.stop(ChatId(1)).await, 1);
        tokio::time::sleep(INTERVAL * 3).await;

        assert_eq!(gateway.prompts_sent_to(ChatId(1)), 1);
        let replies = gateway.replies_to(ChatId(1));
        assert_eq!(replies.last().map(String::as_str), Some(STOPPED_TEXT));
    }

    #[tokio::test]
    async fn stop_without_session_is_noop() {
        let gateway = RecordingGateway::new();
        let sessions = controller(&gateway);

        assert_eq!(sessions.stop(ChatId(1)).await, 0);
        assert_eq!(gateway.replies_to(ChatId(1)), vec![NOT_RUNNING_TEXT.to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn status_reports_sent_reminders() {
        let gateway = RecordingGateway::new();
        let sessions = controller(&gateway);

        let idle = sessions.status(ChatId(1)).await;
        assert!(!idle.active);

        sessions.start(ChatId(1)).await.unwrap();
        tokio::time::sleep(INTERVAL + Duration::from_secs(2)).await;

        let status = sessions.status(ChatId(1)).await;
        assert_eq!(
            status,
            SessionStatus {
                active: true,
                interval: Some(INTERVAL),
                reminders_sent: 2,
            }
        );
        let replies = gateway.replies_to(ChatId(1));
        assert!(replies.last().unwrap().contains("2 reminders sent"));
    }

    #[tokio::test]
    async fn help_lists_commands() {
        let gateway = RecordingGateway::new();
        let sessions = controller(&gateway);

        sessions.help(ChatId(3)).await;
        let replies = gateway.replies_to(ChatId(3));
        assert_eq!(replies.len(), 1);
        for command in ["/start", "/stop", "/status", "/help"] {
            assert!(replies[0].contains(command));
        }
    }
}
