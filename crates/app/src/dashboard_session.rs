//! Dashboard session — the one task that owns dashboard state.
//!
//! Writers (status poller, push listener, control service) never touch the
//! state directly: they send [`StateUpdate`]s through a [`DashboardHandle`].
//! The session applies them in arrival order, then publishes the new
//! snapshot on a `watch` channel (current value for readers) and on the
//! event bus (change stream for subscribers).

use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;

use relaydash_domain::dashboard::{DashboardState, StateUpdate};

use crate::ports::EventPublisher;

struct Command {
    update: StateUpdate,
    ack: Option<oneshot::Sender<DashboardState>>,
}

/// Cloneable handle to a running dashboard session.
#[derive(Clone)]
pub struct DashboardHandle {
    commands: mpsc::Sender<Command>,
    snapshots: watch::Receiver<DashboardState>,
}

impl DashboardHandle {
    /// Queue an update without waiting for it to be applied.
    ///
    /// Returns `false` when the session has stopped.
    pub async fn send(&self, update: StateUpdate) -> bool {
        self.commands
            .send(Command { update, ack: None })
            .await
            .is_ok()
    }

    /// Queue an update and wait until it has been applied.
    ///
    /// Returns the state right after the update. If the session has stopped
    /// the last known state is returned instead.
    pub async fn apply(&self, update: StateUpdate) -> DashboardState {
        let (ack, applied) = oneshot::channel();
        let command = Command {
            update,
            ack: Some(ack),
        };
        if self.commands.send(command).await.is_err() {
            tracing::warn!("dashboard session is closed, update dropped");
            return self.current();
        }
        applied.await.unwrap_or_else(|_| self.current())
    }

    /// The latest published state.
    #[must_use]
    pub fn current(&self) -> DashboardState {
        self.snapshots.borrow().clone()
    }
}

/// Spawns dashboard sessions.
pub struct DashboardSession;

impl DashboardSession {
    /// Spawn a session with an empty initial state.
    ///
    /// The task runs until every [`DashboardHandle`] has been dropped.
    pub fn spawn<P>(publisher: P, capacity: usize) -> (DashboardHandle, JoinHandle<()>)
    where
        P: EventPublisher + Send + Sync + 'static,
    {
        let (commands, receiver) = mpsc::channel(capacity);
        let (snapshot_tx, snapshots) = watch::channel(DashboardState::default());
        let task = tokio::spawn(run(receiver, snapshot_tx, publisher));
        (
            DashboardHandle {
                commands,
                snapshots,
            },
            task,
        )
    }
}

async fn run<P: EventPublisher>(
    mut commands: mpsc::Receiver<Command>,
    snapshots: watch::Sender<DashboardState>,
    publisher: P,
) {
    let mut state = DashboardState::default();
    while let Some(Command { update, ack }) = commands.recv().await {
        if state.apply(update) {
            tracing::debug!(
                version = state.version,
                server_status = %state.server_status,
                connection_status = %state.connection_status,
                "dashboard state changed"
            );
            snapshots.send_replace(state.clone());
            if let Err(err) = publisher.publish(state.clone()).await {
                tracing::warn!(error = %err, "failed to publish dashboard snapshot");
            }
        }
        if let Some(ack) = ack {
            let _ = ack.send(state.clone());
        }
    }
    tracing::debug!("dashboard session stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event_bus::InProcessEventBus;
    use relaydash_domain::status::{ConnectionStatus, ServerStatus};
    use std::sync::Arc;

    fn spawn() -> (DashboardHandle, Arc<InProcessEventBus>) {
        let bus = Arc::new(InProcessEventBus::new(16));
        let (handle, _task) = DashboardSession::spawn(Arc::clone(&bus), 16);
        (handle, bus)
    }

    #[tokio::test]
    async fn should_return_applied_state() {
        let (handle, _bus) = spawn();
        let state = handle
            .apply(StateUpdate::ControlApplied(ServerStatus::Running))
            .await;
        assert_eq!(state.server_status, ServerStatus::Running);
        assert_eq!(handle.current().server_status, ServerStatus::Running);
    }

    #[tokio::test]
    async fn should_publish_only_effective_changes() {
        let (handle, bus) = spawn();
        let mut rx = bus.subscribe();

        handle
            .apply(StateUpdate::ServerStatusObserved(ServerStatus::Stopped))
            .await;
        handle
            .apply(StateUpdate::ConnectionChanged(ConnectionStatus::Connected))
            .await;

        let published = rx.recv().await.unwrap();
        assert_eq!(published.connection_status, ConnectionStatus::Connected);
        assert_eq!(published.version, 1);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn should_apply_updates_in_send_order() {
        let (handle, _bus) = spawn();
        assert!(
            handle
                .send(StateUpdate::ControlApplied(ServerStatus::Running))
                .await
        );
        let state = handle
            .apply(StateUpdate::ServerStatusObserved(ServerStatus::Error))
            .await;
        assert_eq!(state.server_status, ServerStatus::Error);
        assert_eq!(state.version, 2);
    }
}
