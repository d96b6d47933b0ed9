//! Broadcast channels for preference-changed and lifecycle events.
//!
//! [`EventBroadcaster`] wraps a `tokio::sync::broadcast` sender so any number
//! of observers can subscribe.  The store publishes
//! [`PreferenceChanged`] through it, and the host publishes
//! [`LifecycleEvent`](crate::application::lifecycle::LifecycleEvent)s through
//! a second instance.

use std::fmt::Debug;

use tokio::sync::broadcast;
use tracing::debug;

use crate::application::ports::{PreferenceChanged, PreferenceChangedSink};

/// Broadcast channel capacity
const CHANNEL_CAPACITY: usize = 64;

/// Fan-out channel for events of type `E`.
pub struct EventBroadcaster<E> {
    sender: broadcast::Sender<E>,
}

impl<E: Clone + Debug + Send + 'static> EventBroadcaster<E> {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    /// Sends `event` to every current subscriber.
    pub fn broadcast(&self, event: E) {
        // Without subscribers there is nobody to deliver to
        if self.sender.receiver_count() > 0 {
            debug!(?event, "broadcasting event");
            let _ = self.sender.send(event);
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<E> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl<E: Clone + Debug + Send + 'static> Default for EventBroadcaster<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl PreferenceChangedSink for EventBroadcaster<PreferenceChanged> {
    fn publish(&self, event: PreferenceChanged) {
        self.broadcast(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prefs_core::SortingOrientation;

    #[tokio::test]
    async fn test_subscribers_receive_published_event() {
        // Arrange
        let broadcaster = EventBroadcaster::<PreferenceChanged>::new();
        let mut first = broadcaster.subscribe();
        let mut second = broadcaster.subscribe();
        let event = PreferenceChanged::SortingOrientationChanged(SortingOrientation::Distance);

        // Act
        broadcaster.publish(event);

        // Assert
        assert_eq!(first.recv().await.expect("first"), event);
        assert_eq!(second.recv().await.expect("second"), event);
    }

    #[test]
    fn test_broadcast_without_subscribers_is_silent() {
        let broadcaster = EventBroadcaster::<PreferenceChanged>::new();
        broadcaster.publish(PreferenceChanged::SortingOrientationChanged(
            SortingOrientation::Name,
        ));
        assert_eq!(broadcaster.subscriber_count(), 0);
    }
}
