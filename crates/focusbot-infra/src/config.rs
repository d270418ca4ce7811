//! Startup configuration for focusbot.
//!
//! - The bot token arrives from the environment (via the CLI layer) and is
//!   validated and wrapped in a [`SecretString`] here.
//! - The reminder schedule is read from an optional TOML file and falls back
//!   to [`ReminderConfig::default()`] when the file is missing or malformed.

use std::path::Path;

use focusbot_types::config::ReminderConfig;
use focusbot_types::error::ConfigError;
use secrecy::SecretString;

/// Validate a raw bot token and wrap it as a secret.
///
/// A token looks like `<numeric bot id>:<secret>`. Surrounding whitespace is
/// ignored; a blank value counts as missing.
pub fn resolve_token(raw: Option<&str>) -> Result<SecretString, ConfigError> {
    let token = raw.map(str::trim).unwrap_or_default();
    if token.is_empty() {
        return Err(ConfigError::MissingToken);
    }

    let (bot_id, secret) = token.split_once(':').ok_or(ConfigError::InvalidToken)?;
    let bot_id_ok = !bot_id.is_empty() && bot_id.chars().all(|c| c.is_ascii_digit());
    if !bot_id_ok || secret.is_empty() || secret.chars().any(char::is_whitespace) {
        return Err(ConfigError::InvalidToken);
    }

    Ok(SecretString::from(token.to_string()))
}

/// Load the reminder schedule from `path`.
///
/// - If no path is given, returns [`ReminderConfig::default()`].
/// - If the file does not exist or fails to parse, logs and returns the default.
/// - Otherwise returns the parsed config.
pub async fn load_reminder_config(path: Option<&Path>) -> ReminderConfig {
    let Some(config_path) = path else {
        return ReminderConfig::default();
    };

    let content = match tokio::fs::read_to_string(config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config found at {}, using defaults", config_path.display());
            return ReminderConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return ReminderConfig::default();
        }
    };

    match toml::from_str::<ReminderConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            ReminderConfig::default()
        }
    }
}

/// Apply command-line overrides on top of a loaded config and validate it.
pub fn apply_overrides(
    mut config: ReminderConfig,
    interval_secs: Option<u64>,
    first_delay_secs: Option<u64>,
) -> Result<ReminderConfig, ConfigError> {
    if let Some(secs) = interval_secs {
        config.interval_secs = secs;
    }
    if let Some(secs) = first_delay_secs {
        config.first_delay_secs = secs;
    }
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use tempfile::TempDir;

    #[test]
    fn resolve_token_missing() {
        assert!(matches!(resolve_token(None), Err(ConfigError::MissingToken)));
        assert!(matches!(resolve_token(Some("   ")), Err(ConfigError::MissingToken)));
    }

    #[test]
    fn resolve_token_valid_is_trimmed() {
        let token = resolve_token(Some(" 123456:ABC-def_ghi \n")).unwrap();
        assert_eq!(token.expose_secret(), "123456:ABC-def_ghi");
    }

    #[test]
    fn resolve_token_malformed() {
        for raw in ["no-colon", ":secret", "abc:secret", "123:", "123:has space"] {
            assert!(
                matches!(resolve_token(Some(raw)), Err(ConfigError::InvalidToken)),
                "expected '{raw}' to be rejected"
            );
        }
    }

    #[tokio::test]
    async fn load_reminder_config_no_path_returns_default() {
        let config = load_reminder_config(None).await;
        assert_eq!(config, ReminderConfig::default());
    }

    #[tokio::test]
    async fn load_reminder_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_reminder_config(Some(&tmp.path().join("focusbot.toml"))).await;
        assert_eq!(config, ReminderConfig::default());
    }

    #[tokio::test]
    async fn load_reminder_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("focusbot.toml");
        tokio::fs::write(&config_path, "interval_secs = 900\nfirst_delay_secs = 5\n")
            .await
            .unwrap();

        let config = load_reminder_config(Some(&config_path)).await;
        assert_eq!(config.interval_secs, 900);
        assert_eq!(config.first_delay_secs, 5);
    }

    #[tokio::test]
    async fn load_reminder_config_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("focusbot.toml");
        tokio::fs::write(&config_path, "this is not { valid toml !!!")
            .await
            .unwrap();

        let config = load_reminder_config(Some(&config_path)).await;
        assert_eq!(config, ReminderConfig::default());
    }

    #[test]
    fn apply_overrides_wins_over_file() {
        let base = ReminderConfig {
            interval_secs: 900,
            first_delay_secs: 5,
        };
        let config = apply_overrides(base, Some(60), None).unwrap();
        assert_eq!(config.interval_secs, 60);
        assert_eq!(config.first_delay_secs, 5);
    }

    #[test]
    fn apply_overrides_rejects_zero_interval() {
        let result = apply_overrides(ReminderConfig::default(), Some(0), None);
        assert!(matches!(result, Err(ConfigError::InvalidInterval)));
    }

    #[test]
    fn apply_overrides_rejects_oversized_first_delay() {
        let result = apply_overrides(ReminderConfig::default(), None, Some(u64::MAX));
        assert!(matches!(
            result,
            Err(ConfigError::ScheduleOutOfRange("first_delay_secs"))
        ));
    }
}
