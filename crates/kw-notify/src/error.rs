//! Error types for the notification system.

use thiserror::Error;

/// Remediation hint appended to webhook configuration errors.
pub const WEBHOOK_HINT: &str = "You need to set a Discord webhook using \"--webhook/-w\" \
or using environment variables:\n\nexport KW_DISCORD_WEBHOOK=discord_webhook\n\n\
Command line flags will override environment variables";

/// A webhook string that does not describe a usable Discord endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct ValidationError {
    pub reason: String,
}

impl ValidationError {
    pub(crate) fn invalid_url() -> Self {
        Self {
            reason: "invalid URL".to_string(),
        }
    }
}

/// Errors raised while setting up a channel.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The webhook is empty, malformed, or carries no token
    #[error("Invalid Discord webhook URL\n\n{hint}", hint = WEBHOOK_HINT)]
    InvalidWebhook(#[source] ValidationError),
}

/// Failure to build the transport client for a resolved endpoint.
///
/// A channel that passed `init` can always build its client, so hitting one
/// of these is a programming error rather than a delivery failure.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The execute URL could not be assembled
    #[error("invalid webhook endpoint {endpoint}: {source}")]
    Endpoint {
        endpoint: String,
        #[source]
        source: url::ParseError,
    },

    /// The API base cannot carry path segments
    #[error("webhook endpoint {endpoint} cannot carry a path")]
    NotABase { endpoint: String },

    /// The HTTP client could not be built
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),
}

/// Errors that can occur when sending notifications.
#[derive(Debug, Error)]
pub enum ChannelError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The webhook answered with a non-success status
    #[error("Discord returned {status}: {body}")]
    Rejected {
        status: reqwest::StatusCode,
        body: String,
    },
}
