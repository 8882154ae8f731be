//! Discord notification sink for cluster watch events.
//!
//! A channel is built once from a webhook URL and then handles any number of
//! events. Each event is rendered into a single Discord embed and sent in one
//! fire-and-forget attempt: failures are logged, never retried, never
//! returned to the caller.
//!
//! # Usage
//!
//! ```no_run
//! use kw_notify::{ClusterEvent, DiscordChannel, DiscordConfig, NotifyChannel};
//!
//! # async fn run() -> Result<(), kw_notify::ConfigError> {
//! let channel = DiscordChannel::init(&DiscordConfig::new(
//!     "https://discord.com/api/webhooks/123456789012345678/token",
//! ))?;
//!
//! channel
//!     .handle(&ClusterEvent::with_message("Danger", "Pod X crashed"))
//!     .await;
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! - explicit webhook (`--webhook/-w` on the CLI, or [`DiscordConfig::webhook`])
//! - `KW_DISCORD_WEBHOOK`: used when no explicit webhook is set
//!
//! # Architecture
//!
//! - [`endpoint`] resolves a webhook URL into an [`EndpointIdentity`]
//! - [`render`] turns a [`ClusterEvent`] into a [`RenderedNotification`]
//! - [`DiscordChannel`] owns one identity and dispatches rendered events
//! - [`Notifier`] fans events out to every registered [`NotifyChannel`]

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod channels;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod events;
pub mod render;

pub use channels::discord::{DiscordChannel, WebhookClient};
pub use channels::NotifyChannel;
pub use config::DiscordConfig;
pub use endpoint::{resolve, EndpointIdentity, Snowflake};
pub use error::{ChannelError, ClientError, ConfigError, ValidationError};
pub use events::ClusterEvent;
pub use render::{render, RenderedNotification};

use std::sync::Arc;
use tracing::{debug, info, warn};

/// Dispatches events to every registered channel.
pub struct Notifier {
    channels: Vec<Arc<dyn NotifyChannel>>,
}

impl Notifier {
    /// Create a notifier from environment variables.
    ///
    /// Channels whose configuration is missing or invalid are skipped with a
    /// warning.
    #[must_use]
    pub fn from_env() -> Self {
        let mut channels: Vec<Arc<dyn NotifyChannel>> = vec![];

        match DiscordChannel::from_env() {
            Ok(discord) => {
                info!("Discord notifications enabled");
                channels.push(Arc::new(discord));
            }
            Err(e) => {
                warn!(channel = "discord", error = %e, "Discord channel not started");
            }
        }

        if channels.is_empty() {
            warn!("No notification channels configured");
        } else {
            info!(
                channel_count = channels.len(),
                "Notification system initialized"
            );
        }

        Self { channels }
    }

    /// Create a notifier with specific channels.
    #[must_use]
    pub fn with_channels(channels: Vec<Arc<dyn NotifyChannel>>) -> Self {
        Self { channels }
    }

    /// Check if any notification channels are registered.
    #[must_use]
    pub fn has_channels(&self) -> bool {
        !self.channels.is_empty()
    }

    /// Get the number of registered channels.
    #[must_use]
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Send an event to all channels (fire-and-forget).
    ///
    /// Spawns one task per channel and returns immediately. Must be called
    /// from within a Tokio runtime.
    pub fn notify(&self, event: ClusterEvent) {
        if self.channels.is_empty() {
            debug!("No channels configured, skipping event");
            return;
        }

        let event = Arc::new(event);

        for channel in &self.channels {
            let channel = Arc::clone(channel);
            let event = Arc::clone(&event);

            tokio::spawn(async move {
                debug!(channel = channel.name(), "Dispatching event");
                channel.handle(&event).await;
            });
        }
    }

    /// Send an event to all channels and wait until each has finished.
    pub async fn notify_and_wait(&self, event: &ClusterEvent) {
        for channel in &self.channels {
            debug!(channel = channel.name(), "Dispatching event");
            channel.handle(event).await;
        }
    }
}
