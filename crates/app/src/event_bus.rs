//! In-process event bus backed by a tokio broadcast channel.

use std::future::Future;

use tokio::sync::broadcast;

use relaydash_domain::dashboard::DashboardState;
use relaydash_domain::error::RelayDashError;

use crate::ports::EventPublisher;

/// In-process snapshot bus using a tokio [`broadcast`] channel.
///
/// Publishing succeeds even when there are no active subscribers
/// (the snapshot is simply dropped).
pub struct InProcessEventBus {
    sender: broadcast::Sender<DashboardState>,
}

impl InProcessEventBus {
    /// Create a new event bus with the given channel capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to snapshots on this bus.
    ///
    /// Returns a receiver that will get all snapshots published *after*
    /// the subscription is created.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<DashboardState> {
        self.sender.subscribe()
    }
}

impl EventPublisher for InProcessEventBus {
    fn publish(
        &self,
        snapshot: DashboardState,
    ) -> impl Future<Output = Result<(), RelayDashError>> + Send {
        // broadcast::send fails only when there are zero receivers.
        let _ = self.sender.send(snapshot);
        async { Ok(()) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relaydash_domain::dashboard::StateUpdate;
    use relaydash_domain::status::ServerStatus;

    fn running_snapshot() -> DashboardState {
        let mut state = DashboardState::default();
        state.apply(StateUpdate::ServerStatusObserved(ServerStatus::Running));
        state
    }

    #[tokio::test]
    async fn should_deliver_snapshot_to_subscriber() {
        let bus = InProcessEventBus::new(16);
        let mut rx = bus.subscribe();

        bus.publish(running_snapshot()).await.unwrap();

        let received = rx.recv().await.unwrap();
        assert_eq!(received.server_status, ServerStatus::Running);
        assert_eq!(received.version, 1);
    }

    #[tokio::test]
    async fn should_deliver_snapshot_to_multiple_subscribers() {
        let bus = InProcessEventBus::new(16);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish(running_snapshot()).await.unwrap();

        assert_eq!(rx1.recv().await.unwrap().version, 1);
        assert_eq!(rx2.recv().await.unwrap().version, 1);
    }

    #[tokio::test]
    async fn should_succeed_when_no_subscribers() {
        let bus = InProcessEventBus::new(16);
        let result = bus.publish(DashboardState::default()).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn should_not_deliver_snapshots_published_before_subscription() {
        let bus = InProcessEventBus::new(16);
        bus.publish(DashboardState::default()).await.unwrap();

        let mut rx = bus.subscribe();
        bus.publish(running_snapshot()).await.unwrap();

        let received = rx.recv().await.unwrap();
        assert_eq!(received.server_status, ServerStatus::Running);
    }
}
