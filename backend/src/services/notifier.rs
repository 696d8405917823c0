//! Broadcast bus pushing occupancy changes to realtime subscribers.
//!
//! Transport-agnostic: the WebSocket handler owns the sockets, this module
//! only fans events out. Subscribers that fall behind are allowed to lag;
//! only the latest state matters to a viewer, so a lagged receiver simply
//! resumes with newer events.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::models::status::StatusView;

const CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Status,
    Checkin,
    Checkout,
}

/// One realtime event. All kinds carry the same `StatusView` shape; the
/// kind only drives client-side messaging.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusEvent {
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub status: StatusView,
}

#[derive(Clone)]
pub struct StatusNotifier {
    tx: broadcast::Sender<StatusEvent>,
}

impl StatusNotifier {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    /// Registers a new subscriber. Dropping the receiver unsubscribes it.
    /// Catch-up delivery of the current status is the caller's job.
    pub fn subscribe(&self) -> broadcast::Receiver<StatusEvent> {
        self.tx.subscribe()
    }

    /// Delivers the view to every current subscriber. Sending with no
    /// subscribers is not an error.
    pub fn broadcast(&self, kind: EventKind, status: StatusView) {
        let _ = self.tx.send(StatusEvent { kind, status });
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for StatusNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::session::Session;

    #[tokio::test]
    async fn broadcast_reaches_every_subscriber_in_order() {
        let notifier = StatusNotifier::new();
        let mut first = notifier.subscribe();
        let mut second = notifier.subscribe();

        let occupied = StatusView::from_session(
            &Session {
                id: 3,
                username: Some("alice".to_string()),
                device_token: Some("tok".to_string()),
                check_in_time: 1_000,
                expires_at: 3_700,
                active: true,
            },
            1_000,
        );
        notifier.broadcast(EventKind::Checkin, occupied.clone());
        notifier.broadcast(EventKind::Status, StatusView::vacant());

        for rx in [&mut first, &mut second] {
            let event = rx.recv().await.expect("first event");
            assert_eq!(event.kind, EventKind::Checkin);
            assert_eq!(event.status, occupied);
            let event = rx.recv().await.expect("second event");
            assert_eq!(event.kind, EventKind::Status);
            assert_eq!(event.status, StatusView::vacant());
        }
    }

    #[tokio::test]
    async fn broadcast_without_subscribers_is_a_no_op() {
        let notifier = StatusNotifier::new();
        notifier.broadcast(EventKind::Status, StatusView::vacant());
        assert_eq!(notifier.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn late_subscriber_misses_earlier_events() {
        let notifier = StatusNotifier::new();
        notifier.broadcast(EventKind::Checkin, StatusView::vacant());

        let mut rx = notifier.subscribe();
        notifier.broadcast(EventKind::Checkout, StatusView::vacant());

        let event = rx.recv().await.expect("event after subscribe");
        assert_eq!(event.kind, EventKind::Checkout);
    }

    #[test]
    fn event_wire_format_uses_type_tag() {
        let event = StatusEvent {
            kind: EventKind::Checkout,
            status: StatusView::vacant(),
        };
        let json = serde_json::to_value(&event).expect("serialize");
        assert_eq!(json["type"], "checkout");
        assert_eq!(json["status"]["free"], true);
    }
}
