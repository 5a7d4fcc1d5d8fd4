//! Push hub port — the persistent server-to-client event connection.
//!
//! An adapter opens the connection, completes whatever handshake its protocol
//! needs, and hands back a [`PushChannel`]: a stream of [`HubMessage`]s plus a
//! [`ConnectionGuard`] that releases the connection when dropped.

use std::future::Future;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use relaydash_domain::error::RelayDashError;

/// How long [`ConnectionGuard::close`] waits for the connection task.
const CLOSE_GRACE: Duration = Duration::from_secs(5);

/// A message delivered by the hub after the handshake.
#[derive(Debug, Clone, PartialEq)]
pub enum HubMessage {
    /// The hub invoked a client method.
    Invocation {
        target: String,
        arguments: Vec<serde_json::Value>,
    },
    /// The connection ended. `error` is set when the hub or transport
    /// reported one.
    Closed { error: Option<String> },
}

/// Opens push connections.
pub trait PushHub {
    /// Connect and complete the handshake.
    ///
    /// # Errors
    ///
    /// Returns [`RelayDashError::RemoteUnavailable`] when the hub cannot be
    /// reached or rejects the handshake.
    fn connect(&self) -> impl Future<Output = Result<PushChannel, RelayDashError>> + Send;
}

/// An established push connection.
#[derive(Debug)]
pub struct PushChannel {
    pub messages: mpsc::Receiver<HubMessage>,
    pub guard: ConnectionGuard,
}

/// Releases a push connection when dropped or closed.
///
/// Dropping the guard signals the connection task to close; [`close`](Self::close)
/// additionally waits for it to finish.
#[derive(Debug)]
pub struct ConnectionGuard {
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl ConnectionGuard {
    /// Guard a connection task that stops when `shutdown` fires.
    #[must_use]
    pub fn new(shutdown: oneshot::Sender<()>, task: Option<JoinHandle<()>>) -> Self {
        Self {
            shutdown: Some(shutdown),
            task,
        }
    }

    /// Signal the connection to close and wait for its task to finish.
    pub async fn close(mut self) {
        self.signal();
        if let Some(task) = self.task.take() {
            let abort = task.abort_handle();
            if tokio::time::timeout(CLOSE_GRACE, task).await.is_err() {
                tracing::warn!("push connection did not close in time, aborting");
                abort.abort();
            }
        }
    }

    fn signal(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            // The task may already be gone; nothing to release then.
            let _ = tx.send(());
        }
    }
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        self.signal();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn should_signal_shutdown_when_dropped() {
        let (tx, rx) = oneshot::channel();
        let guard = ConnectionGuard::new(tx, None);
        drop(guard);
        assert!(rx.await.is_ok());
    }

    #[tokio::test]
    async fn should_wait_for_task_when_closed() {
        let (tx, rx) = oneshot::channel::<()>();
        let (done_tx, done_rx) = oneshot::channel();
        let task = tokio::spawn(async move {
            let _ = rx.await;
            let _ = done_tx.send("closed");
        });
        ConnectionGuard::new(tx, Some(task)).close().await;
        assert_eq!(done_rx.await.unwrap(), "closed");
    }
}
