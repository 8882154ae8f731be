//! Rendering of cluster events into chat notifications.

use crate::events::ClusterEvent;

/// Title shown on every notification.
pub const NOTIFICATION_TITLE: &str = "Kubewatch";

/// Embed color for `Normal` events.
pub const COLOR_NORMAL: u32 = 0x0072_89da; // Blurple
/// Embed color for `Warning` events.
pub const COLOR_WARNING: u32 = 0x00d4_af37; // Gold
/// Embed color for `Danger` events.
pub const COLOR_DANGER: u32 = 0x00ef_5350; // Red

/// Channel-ready representation of one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedNotification {
    pub title: String,
    pub body: String,
    /// `None` leaves the color to the receiving client
    pub color: Option<u32>,
}

/// Embed color for a status, if the status is one we know.
#[must_use]
pub fn status_color(status: &str) -> Option<u32> {
    match status {
        "Normal" => Some(COLOR_NORMAL),
        "Warning" => Some(COLOR_WARNING),
        "Danger" => Some(COLOR_DANGER),
        _ => None,
    }
}

/// Render an event. Pure and infallible.
#[must_use]
pub fn render(event: &ClusterEvent) -> RenderedNotification {
    RenderedNotification {
        title: NOTIFICATION_TITLE.to_string(),
        body: event.message(),
        color: status_color(&event.status),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_danger_event() {
        let rendered = render(&ClusterEvent::with_message("Danger", "Pod X crashed"));
        assert_eq!(rendered.title, NOTIFICATION_TITLE);
        assert_eq!(rendered.body, "Pod X crashed");
        assert_eq!(rendered.color, Some(0x00ef_5350));
    }

    #[test]
    fn test_status_colors() {
        assert_eq!(status_color("Normal"), Some(0x0072_89da));
        assert_eq!(status_color("Warning"), Some(0x00d4_af37));
        assert_eq!(status_color("Danger"), Some(0x00ef_5350));
    }

    #[test]
    fn test_unknown_status_has_no_color() {
        for status in ["", "normal", "DANGER", "Critical", "Info"] {
            assert!(status_color(status).is_none(), "status: {status:?}");
        }
    }

    #[test]
    fn test_render_is_pure() {
        let event = ClusterEvent::with_message("Unknown", "");
        let first = render(&event);
        let second = render(&event);
        assert_eq!(first, second);
        assert!(first.body.is_empty());
        assert!(first.color.is_none());
    }
}
