//! Discord webhook notification channel.

use std::fmt;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Url;
use serde::Serialize;
use tracing::{debug, error, info};

use crate::config::DiscordConfig;
use crate::endpoint::{resolve, EndpointIdentity};
use crate::error::{ChannelError, ClientError, ConfigError};
use crate::events::ClusterEvent;
use crate::render::{render, RenderedNotification};
use crate::NotifyChannel;

/// Base of the public Discord REST API.
pub const DEFAULT_API_BASE: &str = "https://discord.com/api";

/// Discord webhook notification channel.
///
/// Holds only immutable state, so one instance can serve concurrent
/// dispatches without locking.
#[derive(Clone)]
pub struct DiscordChannel {
    identity: EndpointIdentity,
    api_base: String,
    on_fatal: FatalHandler,
}

impl fmt::Debug for DiscordChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiscordChannel")
            .field("identity", &self.identity)
            .field("api_base", &self.api_base)
            .finish_non_exhaustive()
    }
}

/// Called when an initialized channel cannot build its transport client.
pub type FatalHandler = fn(&ClientError) -> !;

/// Default [`FatalHandler`]: the process stops, whichever task dispatched.
fn abort_process(_err: &ClientError) -> ! {
    std::process::abort()
}

impl DiscordChannel {
    /// Create a channel from configuration, falling back to
    /// `KW_DISCORD_WEBHOOK` when no webhook is set explicitly.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidWebhook`] when the webhook is empty,
    /// malformed, or has no token.
    pub fn init(config: &DiscordConfig) -> Result<Self, ConfigError> {
        let webhook = config.effective_webhook();
        let identity = resolve(&webhook).map_err(ConfigError::InvalidWebhook)?;

        debug!(channel = "discord", webhook_id = %identity.id(), "Discord channel ready");

        Ok(Self {
            identity,
            api_base: DEFAULT_API_BASE.to_string(),
            on_fatal: abort_process,
        })
    }

    /// Create a channel from environment variables only.
    ///
    /// # Errors
    ///
    /// Same as [`DiscordChannel::init`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::init(&DiscordConfig::from_env())
    }

    /// Point the channel at a different API base (self-hosted proxies, tests).
    #[must_use]
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Replace what happens on a broken client invariant. Defaults to
    /// aborting the process.
    #[must_use]
    pub fn with_fatal_handler(mut self, on_fatal: FatalHandler) -> Self {
        self.on_fatal = on_fatal;
        self
    }

    #[must_use]
    pub fn identity(&self) -> &EndpointIdentity {
        &self.identity
    }

    /// Build the transient client for one dispatch.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the endpoint URL or HTTP client cannot be
    /// built.
    pub fn client(&self) -> Result<WebhookClient, ClientError> {
        WebhookClient::new(&self.identity, &self.api_base)
    }
}

#[async_trait]
impl NotifyChannel for DiscordChannel {
    fn name(&self) -> &'static str {
        "discord"
    }

    /// Render and send one event, exactly once.
    ///
    /// An initialized channel always yields a usable client. If it does not,
    /// the fatal handler runs (process abort by default) so a broken channel
    /// never produces a silent or partial dispatch.
    async fn handle(&self, event: &ClusterEvent) {
        let webhook_id = self.identity.id();

        let client = match self.client() {
            Ok(client) => client,
            Err(e) => {
                error!(
                    channel = "discord",
                    webhook_id = %webhook_id,
                    error = %e,
                    "Discord hook cannot build its client, halting"
                );
                (self.on_fatal)(&e)
            }
        };

        let notification = render(event);

        debug!(
            channel = "discord",
            webhook_id = %webhook_id,
            status = %event.status,
            "Sending notification"
        );

        match client.execute(&notification).await {
            Ok(()) => {
                info!(
                    channel = "discord",
                    webhook_id = %webhook_id,
                    "Message successfully sent to Discord hook"
                );
            }
            Err(e) => {
                error!(
                    channel = "discord",
                    webhook_id = %webhook_id,
                    error = %e,
                    "Failed to send notification"
                );
            }
        }
    }
}

/// HTTP client bound to one webhook's execute URL.
pub struct WebhookClient {
    http: reqwest::Client,
    execute_url: Url,
}

// The execute URL embeds the webhook token.
impl fmt::Debug for WebhookClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebhookClient")
            .field("host", &self.execute_url.host_str())
            .finish_non_exhaustive()
    }
}

impl WebhookClient {
    /// Bind a client to `{api_base}/webhooks/{id}/{token}`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the URL does not parse or the HTTP client
    /// cannot be built.
    pub fn new(identity: &EndpointIdentity, api_base: &str) -> Result<Self, ClientError> {
        let endpoint = format!("{}/webhooks/{}", api_base.trim_end_matches('/'), identity.id());
        let mut execute_url = Url::parse(api_base).map_err(|source| ClientError::Endpoint {
            endpoint: endpoint.clone(),
            source,
        })?;

        // Everything before the first `?` is path, each `/` a separator.
        let (token_path, query) = match identity.token().split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (identity.token(), None),
        };
        let id = identity.id().to_string();

        execute_url
            .path_segments_mut()
            .map_err(|()| ClientError::NotABase { endpoint })?
            .pop_if_empty()
            .extend(["webhooks", id.as_str()])
            .extend(token_path.split('/'));
        execute_url.set_query(query);

        let http = reqwest::Client::builder()
            .build()
            .map_err(ClientError::Build)?;

        Ok(Self { http, execute_url })
    }

    /// Execute the webhook with a single embed. One attempt, no retry.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError`] on serialization or connection failure, or
    /// when Discord answers with a non-success status.
    pub async fn execute(&self, notification: &RenderedNotification) -> Result<(), ChannelError> {
        let body = serde_json::to_vec(&WebhookExecuteParams::from(notification))?;

        let response = self
            .http
            .post(self.execute_url.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ChannelError::Rejected { status, body })
        }
    }
}

// =============================================================================
// Discord API types
// =============================================================================

#[derive(Debug, Serialize)]
struct WebhookExecuteParams {
    embeds: Vec<Embed>,
}

#[derive(Debug, Serialize)]
struct Embed {
    title: String,
    description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<u32>,
}

impl From<&RenderedNotification> for WebhookExecuteParams {
    fn from(notification: &RenderedNotification) -> Self {
        Self {
            embeds: vec![Embed {
                title: notification.title.clone(),
                description: notification.body.clone(),
                color: notification.color,
            }],
        }
    }
}
