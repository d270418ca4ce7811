//! Application state wiring all services together.
//!
//! AppState pins the generic session and interaction services to the
//! Telegram gateway and the tokio scheduler.

use std::sync::Arc;

use focusbot_core::reminder::{InteractionHandler, SessionController};
use focusbot_core::schedule::{JobRegistry, TokioScheduler};
use focusbot_infra::telegram::{BotHandlers, TelegramGateway};
use focusbot_types::config::ReminderConfig;
use secrecy::SecretString;

pub type ConcreteSessions = SessionController<TelegramGateway, TokioScheduler>;
pub type ConcreteRegistry = JobRegistry<TokioScheduler>;

/// Shared application state holding all services.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<TelegramGateway>,
    pub registry: Arc<ConcreteRegistry>,
    pub sessions: Arc<ConcreteSessions>,
    pub interactions: Arc<InteractionHandler<TelegramGateway>>,
}

impl AppState {
    /// Wire the gateway, job registry and handlers.
    ///
    /// Must be called from inside the tokio runtime.
    pub fn init(token: &SecretString, config: ReminderConfig) -> anyhow::Result<Self> {
        let gateway = Arc::new(TelegramGateway::new(token));
        let registry = Arc::new(JobRegistry::new(TokioScheduler::new()?));

        let interactions = Arc::new(InteractionHandler::new(
            Arc::clone(&gateway),
            config.interval(),
        ));
        let sessions = Arc::new(SessionController::new(
            Arc::clone(&gateway),
            Arc::clone(&registry),
            config,
        ));

        Ok(Self {
            gateway,
            registry,
            sessions,
            interactions,
        })
    }

    /// Handlers injected into the update dispatcher.
    pub fn bot_handlers(&self) -> Arc<BotHandlers> {
        Arc::new(BotHandlers {
            sessions: Arc::clone(&self.sessions),
            interactions: Arc::clone(&self.interactions),
        })
    }
}
