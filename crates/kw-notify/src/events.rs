//! Cluster watch events consumed by notification channels.

use serde::{Deserialize, Serialize};

/// A resource change observed in the cluster.
///
/// `status` is a free-form classification such as `Normal`, `Warning` or
/// `Danger`. Channels only read events; they never mutate them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClusterEvent {
    /// Namespace of the resource, empty for cluster-scoped kinds
    pub namespace: String,
    /// Resource kind, e.g. `pod` or `deployment`
    pub kind: String,
    /// Resource name
    pub name: String,
    /// What happened, e.g. `created` or `deleted`
    pub reason: String,
    /// Severity classification
    pub status: String,
    /// Preformatted text that replaces the assembled message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ClusterEvent {
    /// Event carrying a preformatted message and nothing else.
    #[must_use]
    pub fn with_message(status: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            message: Some(message.into()),
            ..Self::default()
        }
    }

    /// Human readable text for this event.
    #[must_use]
    pub fn message(&self) -> String {
        if let Some(message) = &self.message {
            return message.clone();
        }

        if self.namespace.is_empty() {
            format!(
                "A `{}` `{}` has been `{}`",
                self.kind, self.name, self.reason
            )
        } else {
            format!(
                "A `{}` in namespace `{}` has been `{}`:\n`{}`",
                self.kind, self.namespace, self.reason, self.name
            )
        }
    }
}
