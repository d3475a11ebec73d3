//! Broadcast channel for board activity.
//!
//! [`ActivityBus`] wraps a [`tokio::sync::broadcast`] channel. Publishing
//! never blocks and never fails the caller; when no sink is subscribed the
//! activity is dropped.

use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use super::BoardActivity;

/// Broadcast bus for [`BoardActivity`].
#[derive(Debug, Clone)]
pub struct ActivityBus {
    sender: broadcast::Sender<BoardActivity>,
}

impl ActivityBus {
    /// Creates a new bus with the given channel capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publishes an activity, returning how many sinks received it.
    pub fn publish(&self, activity: BoardActivity) -> usize {
        self.sender.send(activity).unwrap_or(0)
    }

    /// Subscribes a new sink to all future activity.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<BoardActivity> {
        self.sender.subscribe()
    }

    /// Returns the current number of sinks.
    #[must_use]
    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

/// Spawns the default sink: writes every activity to the `analytics`
/// tracing target.
pub fn spawn_activity_logger(bus: &ActivityBus) -> JoinHandle<()> {
    let mut rx = bus.subscribe();
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(activity) => {
                    let payload = serde_json::to_string(&activity).unwrap_or_default();
                    tracing::info!(
                        target: "analytics",
                        kind = activity.kind(),
                        at = %activity.timestamp(),
                        %payload,
                        "board activity"
                    );
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(target: "analytics", lagged = n, "activity logger lagged");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    })
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn page_view(shown: usize) -> BoardActivity {
        BoardActivity::PageViewed {
            shown,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn publish_without_sinks_returns_zero() {
        let bus = ActivityBus::new(16);
        assert_eq!(bus.publish(page_view(3)), 0);
    }

    #[tokio::test]
    async fn sink_receives_activity() {
        let bus = ActivityBus::new(16);
        let mut rx = bus.subscribe();
        assert_eq!(bus.publish(page_view(5)), 1);

        let Ok(BoardActivity::PageViewed { shown, .. }) = rx.recv().await else {
            panic!("expected page view");
        };
        assert_eq!(shown, 5);
    }

    #[test]
    fn receiver_count_tracks_sinks() {
        let bus = ActivityBus::new(16);
        let rx1 = bus.subscribe();
        let _rx2 = bus.subscribe();
        assert_eq!(bus.receiver_count(), 2);
        drop(rx1);
        assert_eq!(bus.receiver_count(), 1);
    }

    #[tokio::test]
    async fn logger_stops_when_bus_is_dropped() {
        let bus = ActivityBus::new(16);
        let handle = spawn_activity_logger(&bus);
        bus.publish(page_view(1));
        drop(bus);
        tokio_test::assert_ok!(handle.await);
    }
}
