//! Fan-out of operator notifications, backed by `tokio::sync::broadcast`.

use tokio::sync::broadcast;

use heroslides_core::notification::Notification;

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 64;

/// Publishes [`Notification`]s to every subscriber (a toast renderer, a
/// log sink, tests).
pub struct Notifier {
    sender: broadcast::Sender<Notification>,
}

impl Notifier {
    /// Create a notifier with a specific channel capacity. Slow receivers
    /// past the capacity observe `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish to all current subscribers. Dropped when nobody listens.
    pub fn publish(&self, notification: Notification) {
        if notification.is_error() {
            tracing::warn!(title = %notification.title, "Error notification");
        } else {
            tracing::info!(title = %notification.title, "Notification");
        }
        // A SendError only means there are zero receivers.
        let _ = self.sender.send(notification);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.sender.subscribe()
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use heroslides_core::notification::FailureKind;

    use super::*;

    #[tokio::test]
    async fn subscribers_receive_published_notifications() {
        let notifier = Notifier::default();
        let mut rx1 = notifier.subscribe();
        let mut rx2 = notifier.subscribe();

        notifier.publish(Notification::success("ok"));

        assert_eq!(rx1.recv().await.unwrap().title, "ok");
        assert_eq!(rx2.recv().await.unwrap().title, "ok");
    }

    #[test]
    fn publish_without_subscribers_does_not_panic() {
        let notifier = Notifier::new(4);
        notifier.publish(Notification::error("x", FailureKind::Server, "boom"));
    }
}
