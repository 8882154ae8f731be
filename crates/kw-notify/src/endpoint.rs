//! Webhook URL resolution.
//!
//! Turns a raw Discord webhook URL into the `(id, token)` pair that addresses
//! it. Resolution is pure: no network access, no environment lookups.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::ValidationError;

/// Accepted webhook URL grammar. Fields are read back by group name.
static DISCORD_HOOK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^https?://(?:(?:canary|ptb)\.)?discord(?:app)?\.com/api/webhooks/(?P<id>[0-9]+)/(?P<token>.*)$",
    )
    .expect("webhook grammar compiles")
});

/// A Discord snowflake identifier.
///
/// Stored as its canonical decimal digits so ids wider than 64 bits still
/// round-trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Snowflake(String);

impl Snowflake {
    /// Build a snowflake from ASCII digits. Returns `None` for anything else.
    #[must_use]
    pub fn from_digits(digits: &str) -> Option<Self> {
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let trimmed = digits.trim_start_matches('0');
        let canonical = if trimmed.is_empty() { "0" } else { trimmed };
        Some(Self(canonical.to_string()))
    }

    /// Numeric value when it fits in 64 bits.
    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        self.0.parse().ok()
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u64> for Snowflake {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for Snowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The `(id, token)` pair addressing one webhook. The token is never empty.
#[derive(Clone, PartialEq, Eq)]
pub struct EndpointIdentity {
    id: Snowflake,
    token: String,
}

impl EndpointIdentity {
    #[must_use]
    pub fn id(&self) -> &Snowflake {
        &self.id
    }

    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }
}

// Keep the secret out of logs and panic messages.
impl fmt::Debug for EndpointIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EndpointIdentity")
            .field("id", &self.id)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Resolve a raw webhook URL into its endpoint identity.
///
/// The whole string must match the webhook grammar. The token is everything
/// after the id segment, slashes and query characters included.
///
/// # Errors
///
/// Returns [`ValidationError`] when the URL does not match the grammar or the
/// token segment is empty.
pub fn resolve(raw_webhook: &str) -> Result<EndpointIdentity, ValidationError> {
    let caps = DISCORD_HOOK
        .captures(raw_webhook)
        .ok_or_else(ValidationError::invalid_url)?;

    let id = caps
        .name("id")
        .and_then(|m| Snowflake::from_digits(m.as_str()))
        .ok_or_else(ValidationError::invalid_url)?;
    let token = caps.name("token").map_or("", |m| m.as_str());

    if token.is_empty() {
        return Err(ValidationError::invalid_url());
    }

    Ok(EndpointIdentity {
        id,
        token: token.to_string(),
    })
}
