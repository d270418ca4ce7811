//! Command-line arguments for the `focusbot` binary.
//!
//! Every option can also be supplied through the environment, so the bot can
//! run from a plain `TELEGRAM_TOKEN=... focusbot` invocation.

use std::path::PathBuf;

use clap::Parser;

/// Telegram bot that nudges you to take a break at a fixed interval.
#[derive(Parser, Debug)]
#[command(name = "focusbot", version, about, long_about = None)]
pub struct Cli {
    /// Telegram bot token issued by @BotFather.
    #[arg(long, env = "TELEGRAM_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Path to a TOML file with the reminder schedule.
    #[arg(long, env = "FOCUSBOT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Seconds between reminders (overrides the config file).
    #[arg(long, env = "FOCUSBOT_INTERVAL_SECS")]
    pub interval_secs: Option<u64>,

    /// Seconds before the first reminder after /start (overrides the config file).
    #[arg(long, env = "FOCUSBOT_FIRST_DELAY_SECS")]
    pub first_delay_secs: Option<u64>,

    /// Suppress all output except errors.
    #[arg(long)]
    pub quiet: bool,

    /// Detailed output (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Export spans through OpenTelemetry to stdout.
    #[arg(long, env = "FOCUSBOT_OTEL")]
    pub otel: bool,
}
