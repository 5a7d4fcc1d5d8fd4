//! Relay monitor — status poller and push listener.
//!
//! [`Monitor::start`] performs the initial status read, opens the push
//! connection, and optionally re-polls the status on an interval. Everything
//! it learns is forwarded to the dashboard session as [`StateUpdate`]s.
//! The returned [`MonitorHandle`] owns the background tasks: shutting it down
//! (or dropping it) releases the push connection.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use relaydash_domain::dashboard::{DashboardState, StateUpdate};
use relaydash_domain::error::RelayDashError;
use relaydash_domain::push::{PushDecode, PushEvent};
use relaydash_domain::status::ConnectionStatus;
use relaydash_domain::time::now;

use crate::dashboard_session::DashboardHandle;
use crate::ports::{HubMessage, PushHub, RelayControl};

/// How long [`MonitorHandle::shutdown`] waits for the listener to release
/// the push connection.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

/// Monitor tuning.
#[derive(Debug, Clone, Copy, Default)]
pub struct MonitorConfig {
    /// Re-poll the relay status at this interval. `None` polls once at start.
    pub status_refresh: Option<Duration>,
}

/// Wires the relay and the hub to a dashboard session.
pub struct Monitor<R, H> {
    relay: Arc<R>,
    hub: H,
    dashboard: DashboardHandle,
    config: MonitorConfig,
}

impl<R, H> Monitor<R, H>
where
    R: RelayControl + Send + Sync + 'static,
    H: PushHub + Send + Sync + 'static,
{
    pub fn new(relay: Arc<R>, hub: H, dashboard: DashboardHandle, config: MonitorConfig) -> Self {
        Self {
            relay,
            hub,
            dashboard,
            config,
        }
    }

    /// Spawn the poller and the push listener.
    #[must_use]
    pub fn start(self) -> MonitorHandle {
        let mut pollers = Vec::with_capacity(2);

        let relay = Arc::clone(&self.relay);
        let dashboard = self.dashboard.clone();
        pollers.push(tokio::spawn(async move {
            poll_status(relay.as_ref(), &dashboard).await;
        }));

        if let Some(period) = self.config.status_refresh {
            let relay = Arc::clone(&self.relay);
            let dashboard = self.dashboard.clone();
            pollers.push(tokio::spawn(async move {
                let mut interval = tokio::time::interval(period);
                interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
                // The first tick fires immediately and the initial poll already ran.
                interval.tick().await;
                loop {
                    interval.tick().await;
                    poll_status(relay.as_ref(), &dashboard).await;
                }
            }));
        }

        let (stop, stopped) = oneshot::channel();
        let dashboard = self.dashboard.clone();
        let hub = self.hub;
        let listener = tokio::spawn(async move {
            listen(&hub, &dashboard, stopped).await;
        });

        MonitorHandle {
            dashboard: self.dashboard,
            pollers,
            stop: Some(stop),
            listener: Some(listener),
        }
    }
}

/// Owns the monitor's background tasks.
pub struct MonitorHandle {
    dashboard: DashboardHandle,
    pollers: Vec<JoinHandle<()>>,
    stop: Option<oneshot::Sender<()>>,
    listener: Option<JoinHandle<()>>,
}

impl MonitorHandle {
    /// Stop polling, release the push connection, and mark the channel
    /// disconnected.
    ///
    /// The listener closes the connection through its guard before this
    /// returns; it is aborted only if that takes longer than
    /// [`SHUTDOWN_GRACE`].
    pub async fn shutdown(mut self) {
        for task in self.pollers.drain(..) {
            task.abort();
            let _ = task.await;
        }
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Some(listener) = self.listener.take() {
            let abort = listener.abort_handle();
            if tokio::time::timeout(SHUTDOWN_GRACE, listener).await.is_err() {
                tracing::warn!("push listener did not stop in time, aborting");
                abort.abort();
            }
        }
        self.dashboard
            .apply(StateUpdate::ConnectionChanged(ConnectionStatus::Disconnected))
            .await;
        tracing::info!("relay monitor stopped");
    }
}

impl Drop for MonitorHandle {
    fn drop(&mut self) {
        for task in &self.pollers {
            task.abort();
        }
        // Dropping `stop` tells the listener to close its connection.
    }
}

/// Read the relay status once and apply it.
///
/// Returns the resulting state, or `None` when the read failed; failures are
/// logged and leave the current status untouched.
pub async fn poll_status<R: RelayControl>(
    relay: &R,
    dashboard: &DashboardHandle,
) -> Option<DashboardState> {
    match relay.fetch_status().await {
        Ok(status) => {
            tracing::debug!(%status, "relay status polled");
            Some(
                dashboard
                    .apply(StateUpdate::ServerStatusObserved(status))
                    .await,
            )
        }
        Err(err) => {
            tracing::warn!(error = ?err, "failed to read relay status");
            None
        }
    }
}

async fn listen<H: PushHub>(
    hub: &H,
    dashboard: &DashboardHandle,
    mut stop: oneshot::Receiver<()>,
) {
    let connected = tokio::select! {
        result = hub.connect() => result,
        _ = &mut stop => return,
    };
    let mut channel = match connected {
        Ok(channel) => channel,
        Err(err) => {
            tracing::error!(error = ?err, "failed to connect to push hub");
            dashboard
                .send(StateUpdate::ConnectionChanged(ConnectionStatus::Error))
                .await;
            return;
        }
    };
    tracing::info!("connected to push hub");
    dashboard
        .send(StateUpdate::ConnectionChanged(ConnectionStatus::Connected))
        .await;

    let mut final_status = ConnectionStatus::Disconnected;
    loop {
        let message = tokio::select! {
            message = channel.messages.recv() => message,
            _ = &mut stop => {
                tracing::debug!("releasing push connection");
                channel.guard.close().await;
                return;
            }
        };
        match message {
            Some(HubMessage::Invocation { target, arguments }) => {
                match decode_invocation(&target, &arguments) {
                    Ok(Some(event)) => {
                        dashboard.send(StateUpdate::Push(event)).await;
                    }
                    Ok(None) => {
                        tracing::debug!(%target, "ignoring push event for unknown target");
                    }
                    Err(err) => {
                        tracing::warn!(error = ?err, "dropping malformed push event");
                    }
                }
            }
            Some(HubMessage::Closed { error }) => {
                if let Some(error) = error {
                    tracing::warn!(%error, "push hub closed the connection");
                    final_status = ConnectionStatus::Error;
                } else {
                    tracing::info!("push hub closed the connection");
                }
                break;
            }
            None => break,
        }
    }
    dashboard
        .send(StateUpdate::ConnectionChanged(final_status))
        .await;
    channel.guard.close().await;
}

/// Decode one hub invocation; `None` for targets this console ignores.
fn decode_invocation(
    target: &str,
    arguments: &[serde_json::Value],
) -> Result<Option<PushEvent>, RelayDashError> {
    match PushEvent::decode(target, arguments, now())? {
        PushDecode::Event(event) => Ok(Some(event)),
        PushDecode::Ignored => Ok(None),
    }
}
