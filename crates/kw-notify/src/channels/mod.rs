//! Notification channel implementations.

pub mod discord;

use async_trait::async_trait;

use crate::events::ClusterEvent;

/// A sink registered against the cluster event stream.
#[async_trait]
pub trait NotifyChannel: Send + Sync {
    /// Get the name of this channel.
    fn name(&self) -> &'static str;

    /// Deliver one event. Failures are logged, never returned.
    async fn handle(&self, event: &ClusterEvent);
}
