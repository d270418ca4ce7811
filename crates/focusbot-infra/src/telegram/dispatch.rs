//! Inbound update routing.
//!
//! Builds the teloxide `dptree` handler: bot commands go to the session
//! controller, callback queries go to the interaction handler. Every handler
//! contains its own failures so one chat's error never reaches the
//! dispatcher or another chat.

use std::sync::Arc;
use std::time::Duration;

use focusbot_core::reminder::{InteractionHandler, SessionController};
use focusbot_core::schedule::TokioScheduler;
use focusbot_observe::attrs::{
    OP_HELP, OP_START, OP_STATUS, OP_STOP, SPAN_CALLBACK_QUERY, SPAN_COMMAND,
};
use focusbot_types::chat::{ActionSelection, ChatId, MessageRef};
use teloxide::dispatching::{HandlerExt, UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;
use teloxide::types::MaybeInaccessibleMessage;
use teloxide::utils::command::BotCommands;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

use super::gateway::TelegramGateway;

/// How often a shutdown request is retried while the dispatcher is idle.
const SHUTDOWN_RETRY: Duration = Duration::from_millis(100);

type HandlerError = Box<dyn std::error::Error + Send + Sync>;
type HandlerResult = Result<(), HandlerError>;

/// Commands understood by the bot.
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "These commands are supported:")]
pub enum Command {
    #[command(description = "start (or restart) your reminders")]
    Start,
    #[command(description = "stop your reminders")]
    Stop,
    #[command(description = "show whether reminders are running")]
    Status,
    #[command(description = "show available commands")]
    Help,
}

impl Command {
    fn op(&self) -> &'static str {
        match self {
            Command::Start => OP_START,
            Command::Stop => OP_STOP,
            Command::Status => OP_STATUS,
            Command::Help => OP_HELP,
        }
    }
}

/// Handlers injected into the dispatcher.
pub struct BotHandlers {
    pub sessions: Arc<SessionController<TelegramGateway, TokioScheduler>>,
    pub interactions: Arc<InteractionHandler<TelegramGateway>>,
}

/// Build the update handler tree.
pub fn schema() -> UpdateHandler<HandlerError> {
    let commands = Update::filter_message()
        .filter_command::<Command>()
        .endpoint(handle_command);

    let callbacks = Update::filter_callback_query().endpoint(handle_callback_query);

    dptree::entry().branch(commands).branch(callbacks)
}

/// Run long-polling until `shutdown` is cancelled.
pub async fn run_dispatcher(bot: Bot, handlers: Arc<BotHandlers>, shutdown: CancellationToken) {
    let mut dispatcher = Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![handlers])
        .default_handler(|update| async move {
            tracing::trace!(update_id = ?update.id, "ignoring unhandled update");
        })
        .build();

    let shutdown_token = dispatcher.shutdown_token();
    let watcher = tokio::spawn(async move {
        shutdown.cancelled().await;
        retry_until_accepted(SHUTDOWN_RETRY, || shutdown_token.shutdown().is_ok()).await;
    });

    tracing::info!("telegram dispatcher started");
    dispatcher.dispatch().await;
    watcher.abort();
    tracing::info!("telegram dispatcher stopped");
}

/// Call `request` until it reports the request was accepted.
///
/// A shutdown requested before the dispatcher starts polling is refused as
/// idle; retrying lets it land once `dispatch` is running.
async fn retry_until_accepted(every: Duration, mut request: impl FnMut() -> bool) {
    while !request() {
        tracing::debug!("dispatcher idle, retrying shutdown");
        tokio::time::sleep(every).await;
    }
}

async fn handle_command(msg: Message, cmd: Command, handlers: Arc<BotHandlers>) -> HandlerResult {
    let chat_id = ChatId(msg.chat.id.0);
    let span = tracing::info_span!(SPAN_COMMAND, %chat_id, op = cmd.op());

    async move {
        match cmd {
            Command::Start => {
                if let Err(err) = handlers.sessions.start(chat_id).await {
                    tracing::error!(%chat_id, error = %err, "failed to start reminder session");
                }
            }
            Command::Stop => {
                handlers.sessions.stop(chat_id).await;
            }
            Command::Status => {
                handlers.sessions.status(chat_id).await;
            }
            Command::Help => {
                handlers.sessions.help(chat_id).await;
            }
        }
    }
    .instrument(span)
    .await;

    Ok(())
}

async fn handle_callback_query(q: CallbackQuery, handlers: Arc<BotHandlers>) -> HandlerResult {
    let message = match &q.message {
        Some(MaybeInaccessibleMessage::Regular(m)) => Some((m.chat.id.0, m.id.0)),
        _ => None,
    };
    let selection = action_selection(q.id.0.clone(), q.from.id.0, message, q.data.clone());
    let span = tracing::info_span!(SPAN_CALLBACK_QUERY, chat_id = %selection.chat_id);

    async move {
        if let Err(err) = handlers.interactions.handle(&selection).await {
            tracing::warn!(chat_id = %selection.chat_id, error = %err, "failed to apply action");
        }
    }
    .instrument(span)
    .await;

    Ok(())
}

/// Build an [`ActionSelection`] from the parts of a callback query.
///
/// The chat comes from the prompt message when it is still accessible;
/// otherwise the sender's user id is used, which equals the chat id for
/// private chats.
pub fn action_selection(
    interaction_id: String,
    from_user_id: u64,
    message: Option<(i64, i32)>,
    payload: Option<String>,
) -> ActionSelection {
    let message = message.map(|(chat_id, message_id)| MessageRef {
        chat_id: ChatId(chat_id),
        message_id,
    });
    let chat_id = message
        .map(|m| m.chat_id)
        .unwrap_or(ChatId(from_user_id as i64));

    ActionSelection {
        chat_id,
        interaction_id,
        message,
        payload,
    }
}
