//! focusbot entry point.
//!
//! Binary name: `focusbot`
//!
//! Parses CLI arguments, validates the bot token, loads the reminder
//! schedule, then long-polls Telegram until Ctrl+C or SIGTERM.

mod cli;
mod state;

use clap::Parser;
use focusbot_infra::config::{apply_overrides, load_reminder_config, resolve_token};
use focusbot_infra::telegram::run_dispatcher;
use focusbot_observe::tracing_setup::{
    TracingOptions, filter_for_verbosity, init_tracing, shutdown_tracing,
};
use tokio_util::sync::CancellationToken;

use cli::Cli;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(&TracingOptions {
        default_filter: filter_for_verbosity(cli.verbose, cli.quiet).to_string(),
        enable_otel: cli.otel,
    })
    .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let token = match resolve_token(cli.token.as_deref()) {
        Ok(token) => token,
        Err(err) => {
            eprintln!("  {} {err}", console::style("✗").red().bold());
            std::process::exit(1);
        }
    };

    let config = load_reminder_config(cli.config.as_deref()).await;
    let config = apply_overrides(config, cli.interval_secs, cli.first_delay_secs)?;

    let state = AppState::init(&token, config.clone())?;

    tracing::info!(
        interval_secs = config.interval_secs,
        first_delay_secs = config.first_delay_secs,
        "focusbot starting"
    );

    let shutdown = CancellationToken::new();
    let dispatcher = tokio::spawn(run_dispatcher(
        state.gateway.bot().clone(),
        state.bot_handlers(),
        shutdown.clone(),
    ));

    shutdown_signal().await;
    tracing::info!("shutdown requested");
    shutdown.cancel();

    if let Err(err) = dispatcher.await {
        tracing::error!(error = %err, "dispatcher task failed");
    }

    let cancelled = state.registry.shutdown();
    tracing::info!(cancelled, "reminder jobs cancelled");

    shutdown_tracing();
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
