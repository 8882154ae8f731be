//! Configuration for the Discord channel.

use serde::Deserialize;

/// Environment variable consulted when no webhook is configured explicitly.
pub const ENV_DISCORD_WEBHOOK: &str = "KW_DISCORD_WEBHOOK";

/// Discord handler section of the process configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DiscordConfig {
    /// Webhook URL, usually supplied with `--webhook/-w`
    pub webhook: String,
}

impl DiscordConfig {
    #[must_use]
    pub fn new(webhook: impl Into<String>) -> Self {
        Self {
            webhook: webhook.into(),
        }
    }

    /// Config with no explicit webhook, so only the environment applies.
    #[must_use]
    pub fn from_env() -> Self {
        Self::default()
    }

    /// The webhook to use: the explicit value when non-empty, otherwise
    /// `KW_DISCORD_WEBHOOK`, otherwise empty. Surrounding whitespace is
    /// stripped from either source.
    #[must_use]
    pub fn effective_webhook(&self) -> String {
        let explicit = self.webhook.trim();
        if !explicit.is_empty() {
            return explicit.to_string();
        }
        std::env::var(ENV_DISCORD_WEBHOOK)
            .map(|value| value.trim().to_string())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const EXPLICIT: &str = "https://discord.com/api/webhooks/1/explicit";
    const FROM_ENV: &str = "https://discord.com/api/webhooks/2/from-env";

    #[test]
    #[serial]
    fn test_explicit_webhook_wins_over_env() {
        // SAFETY: This test runs serially via #[serial] to avoid env var races
        unsafe {
            std::env::set_var(ENV_DISCORD_WEBHOOK, FROM_ENV);
        }

        assert_eq!(DiscordConfig::new(EXPLICIT).effective_webhook(), EXPLICIT);

        unsafe {
            std::env::remove_var(ENV_DISCORD_WEBHOOK);
        }
    }

    #[test]
    #[serial]
    fn test_env_fallback_when_empty() {
        // SAFETY: This test runs serially via #[serial] to avoid env var races
        unsafe {
            std::env::set_var(ENV_DISCORD_WEBHOOK, FROM_ENV);
        }

        assert_eq!(DiscordConfig::from_env().effective_webhook(), FROM_ENV);

        unsafe {
            std::env::remove_var(ENV_DISCORD_WEBHOOK);
        }
    }

    #[test]
    #[serial]
    fn test_no_webhook_anywhere() {
        // SAFETY: This test runs serially via #[serial] to avoid env var races
        unsafe {
            std::env::remove_var(ENV_DISCORD_WEBHOOK);
        }

        assert!(DiscordConfig::default().effective_webhook().is_empty());
    }

    #[test]
    #[serial]
    fn test_env_webhook_trailing_newline_trimmed() {
        // SAFETY: This test runs serially via #[serial] to avoid env var races
        unsafe {
            std::env::set_var(ENV_DISCORD_WEBHOOK, format!("{FROM_ENV}\n"));
        }

        assert_eq!(DiscordConfig::from_env().effective_webhook(), FROM_ENV);

        unsafe {
            std::env::remove_var(ENV_DISCORD_WEBHOOK);
        }
    }

    #[test]
    #[serial]
    fn test_blank_explicit_webhook_falls_back_to_env() {
        // SAFETY: This test runs serially via #[serial] to avoid env var races
        unsafe {
            std::env::set_var(ENV_DISCORD_WEBHOOK, FROM_ENV);
        }

        assert_eq!(DiscordConfig::new("  ").effective_webhook(), FROM_ENV);
        assert_eq!(
            DiscordConfig::new(format!(" {EXPLICIT}\t")).effective_webhook(),
            EXPLICIT
        );

        unsafe {
            std::env::remove_var(ENV_DISCORD_WEBHOOK);
        }
    }

    #[test]
    fn test_deserialize_missing_webhook() {
        let config: DiscordConfig = serde_json::from_str("{}").unwrap();
        assert!(config.webhook.is_empty());
    }
}
