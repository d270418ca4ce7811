//! In-memory doubles shared by the unit tests in this crate.

use std::sync::atomic::{AtomicBool, AtomicI32, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use focusbot_types::chat::{ActionKeyboard, ChatId, MessageRef};
use focusbot_types::error::GatewayError;
use tokio::time::Instant;

use crate::gateway::MessagingGateway;
use crate::schedule::job::{JobCallback, JobResult};

/// Callback that only counts its firings.
pub(crate) fn counting_callback() -> (JobCallback, Arc<AtomicU64>) {
    let count = Arc::new(AtomicU64::new(0));
    let counter = Arc::clone(&count);
    let cb: JobCallback = Arc::new(move |_chat| {
        let counter = Arc::clone(&counter);
        Box::pin(async move {
            counter.fetch_add(1, Ordering::SeqCst);
            let result: JobResult = Ok(());
            result
        })
    });
    (cb, count)
}

/// Callback that records when each firing started (relative to `origin`),
/// then sleeps for `latency` to simulate a slow gateway.
pub(crate) fn recording_callback(
    origin: Instant,
    latency: Duration,
) -> (JobCallback, Arc<Mutex<Vec<Duration>>>) {
    let fired_at = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&fired_at);
    let cb: JobCallback = Arc::new(move |_chat| {
        let log = Arc::clone(&log);
        Box::pin(async move {
            log.lock().unwrap().push(origin.elapsed());
            if !latency.is_zero() {
                tokio::time::sleep(latency).await;
            }
            let result: JobResult = Ok(());
            result
        })
    });
    (cb, fired_at)
}

/// Callback that counts firings started and firings run to completion,
/// sleeping for `latency` in between.
pub(crate) fn slow_callback(latency: Duration) -> (JobCallback, Arc<AtomicU64>, Arc<AtomicU64>) {
    let started = Arc::new(AtomicU64::new(0));
    let finished = Arc::new(AtomicU64::new(0));
    let (start_count, finish_count) = (Arc::clone(&started), Arc::clone(&finished));
    let cb: JobCallback = Arc::new(move |_chat| {
        let start_count = Arc::clone(&start_count);
        let finish_count = Arc::clone(&finish_count);
        Box::pin(async move {
            start_count.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(latency).await;
            finish_count.fetch_add(1, Ordering::SeqCst);
            let result: JobResult = Ok(());
            result
        })
    });
    (cb, started, finished)
}

/// A call observed by [`RecordingGateway`].
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum GatewayCall {
    Send {
        chat_id: ChatId,
        text: String,
        keyboard: Option<ActionKeyboard>,
    },
    Edit {
        message: MessageRef,
        text: String,
    },
    Acknowledge {
        interaction_id: String,
    },
}

/// Gateway that records every call and can be told to fail.
#[derive(Debug, Default)]
pub(crate) struct RecordingGateway {
    calls: Mutex<Vec<GatewayCall>>,
    next_message_id: AtomicI32,
    failing_sends: AtomicUsize,
    failing_acks: AtomicBool,
}

impl RecordingGateway {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Make the next `n` sends fail.
    pub(crate) fn fail_next_sends(&self, n: usize) {
        self.failing_sends.store(n, Ordering::SeqCst);
    }

    pub(crate) fn fail_acks(&self, fail: bool) {
        self.failing_acks.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn calls(&self) -> Vec<GatewayCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Successful sends to `chat_id` carrying a keyboard (i.e. reminder prompts).
    pub(crate) fn prompts_sent_to(&self, chat_id: ChatId) -> usize {
        self.calls()
            .iter()
            .filter(|c| {
                matches!(c, GatewayCall::Send { chat_id: id, keyboard: Some(_), .. } if *id == chat_id)
            })
            .count()
    }

    /// Texts of plain (keyboard-less) messages sent to `chat_id`.
    pub(crate) fn replies_to(&self, chat_id: ChatId) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                GatewayCall::Send {
                    chat_id: id,
                    text,
                    keyboard: None,
                } if id == chat_id => Some(text),
                _ => None,
            })
            .collect()
    }
}

impl MessagingGateway for RecordingGateway {
    async fn send(
        &self,
        chat_id: ChatId,
        text: &str,
        keyboard: Option<&ActionKeyboard>,
    ) -> Result<MessageRef, GatewayError> {
        let fail = self
            .failing_sends
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if fail {
            return Err(GatewayError::SendFailed("simulated outage".to_string()));
        }

        self.calls.lock().unwrap().push(GatewayCall::Send {
            chat_id,
            text: text.to_string(),
            keyboard: keyboard.cloned(),
        });
        let message_id = self.next_message_id.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(MessageRef {
            chat_id,
            message_id,
        })
    }

    async fn edit(&self, message: &MessageRef, text: &str) -> Result<(), GatewayError> {
        self.calls.lock().unwrap().push(GatewayCall::Edit {
            message: *message,
            text: text.to_string(),
        });
        Ok(())
    }

    async fn acknowledge(&self, interaction_id: &str) -> Result<(), GatewayError> {
        if self.failing_acks.load(Ordering::SeqCst) {
            return Err(GatewayError::AcknowledgeFailed("query too old".to_string()));
        }
        self.calls.lock().unwrap().push(GatewayCall::Acknowledge {
            interaction_id: interaction_id.to_string(),
        });
        Ok(())
    }
}
