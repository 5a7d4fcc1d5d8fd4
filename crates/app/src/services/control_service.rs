//! Control service — start/stop commands and on-demand status refresh.
//!
//! Commands are optimistic: a successful remote call sets the local status
//! without the relay confirming it. The local copy can therefore diverge
//! from the relay until the next poll corrects it.

use std::sync::Arc;

use relaydash_domain::dashboard::{DashboardState, StateUpdate};
use relaydash_domain::error::RelayDashError;
use relaydash_domain::status::ServerStatus;

use crate::dashboard_session::DashboardHandle;
use crate::monitor::poll_status;
use crate::ports::RelayControl;

/// Application service for relay control.
pub struct ControlService<R> {
    relay: Arc<R>,
    dashboard: DashboardHandle,
}

impl<R: RelayControl> ControlService<R> {
    pub fn new(relay: Arc<R>, dashboard: DashboardHandle) -> Self {
        Self { relay, dashboard }
    }

    /// Ask the relay to start; on success the local status becomes running.
    ///
    /// # Errors
    ///
    /// Returns [`RelayDashError::RemoteUnavailable`] when the command fails;
    /// the local status is left unchanged.
    #[tracing::instrument(skip(self))]
    pub async fn start(&self) -> Result<DashboardState, RelayDashError> {
        self.relay.start().await?;
        tracing::info!("relay start requested");
        Ok(self
            .dashboard
            .apply(StateUpdate::ControlApplied(ServerStatus::Running))
            .await)
    }

    /// Ask the relay to stop; on success the local status becomes stopped.
    ///
    /// # Errors
    ///
    /// Returns [`RelayDashError::RemoteUnavailable`] when the command fails;
    /// the local status is left unchanged.
    #[tracing::instrument(skip(self))]
    pub async fn stop(&self) -> Result<DashboardState, RelayDashError> {
        self.relay.stop().await?;
        tracing::info!("relay stop requested");
        Ok(self
            .dashboard
            .apply(StateUpdate::ControlApplied(ServerStatus::Stopped))
            .await)
    }

    /// Re-read the relay status now. Failures keep the current status.
    #[tracing::instrument(skip(self))]
    pub async fn refresh_status(&self) -> DashboardState {
        poll_status(self.relay.as_ref(), &self.dashboard)
            .await
            .unwrap_or_else(|| self.dashboard.current())
    }

    /// The dashboard state as currently known.
    #[must_use]
    pub fn current(&self) -> DashboardState {
        self.dashboard.current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard_session::DashboardSession;
    use crate::event_bus::InProcessEventBus;
    use std::sync::Mutex;

    #[derive(Default)]
    struct StubRelay {
        fail_commands: bool,
        status: Option<ServerStatus>,
        calls: Mutex<Vec<&'static str>>,
    }

    impl RelayControl for StubRelay {
        async fn fetch_status(&self) -> Result<ServerStatus, RelayDashError> {
            self.calls.lock().unwrap().push("estado");
            self.status
                .ok_or_else(|| RelayDashError::remote("status unavailable"))
        }
        async fn start(&self) -> Result<(), RelayDashError> {
            self.calls.lock().unwrap().push("iniciar");
            if self.fail_commands {
                return Err(RelayDashError::remote("503 Service Unavailable"));
            }
            Ok(())
        }
        async fn stop(&self) -> Result<(), RelayDashError> {
            self.calls.lock().unwrap().push("detener");
            if self.fail_commands {
                return Err(RelayDashError::remote("503 Service Unavailable"));
            }
            Ok(())
        }
    }

    fn service(relay: StubRelay) -> (ControlService<StubRelay>, Arc<StubRelay>) {
        let (dashboard, _task) = DashboardSession::spawn(Arc::new(InProcessEventBus::new(16)), 16);
        let relay = Arc::new(relay);
        (ControlService::new(Arc::clone(&relay), dashboard), relay)
    }

    #[tokio::test]
    async fn should_set_running_when_start_succeeds() {
        let (service, relay) = service(StubRelay::default());
        let state = service.start().await.unwrap();
        assert_eq!(state.server_status, ServerStatus::Running);
        assert_eq!(*relay.calls.lock().unwrap(), vec!["iniciar"]);
    }

    #[tokio::test]
    async fn should_set_stopped_when_stop_succeeds() {
        let (service, _relay) = service(StubRelay::default());
        service.start().await.unwrap();
        let state = service.stop().await.unwrap();
        assert_eq!(state.server_status, ServerStatus::Stopped);
    }

    #[tokio::test]
    async fn should_keep_status_when_command_fails() {
        let (service, _relay) = service(StubRelay {
            fail_commands: true,
            ..StubRelay::default()
        });
        let err = service.start().await.unwrap_err();
        assert!(matches!(err, RelayDashError::RemoteUnavailable(_)));
        assert_eq!(service.current().server_status, ServerStatus::Stopped);
    }

    #[tokio::test]
    async fn should_still_start_when_already_running() {
        // The dashboard disables the button, but the command itself is not refused.
        let (service, relay) = service(StubRelay::default());
        service.start().await.unwrap();
        let state = service.start().await.unwrap();
        assert_eq!(state.server_status, ServerStatus::Running);
        assert_eq!(relay.calls.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn should_stay_running_until_next_poll_after_optimistic_start() {
        // Poll says stopped, user starts, relay later reports nothing new:
        // the optimistic status stands until a poll says otherwise.
        let (service, _relay) = service(StubRelay {
            status: Some(ServerStatus::Stopped),
            ..StubRelay::default()
        });
        assert_eq!(
            service.refresh_status().await.server_status,
            ServerStatus::Stopped
        );
        assert_eq!(
            service.start().await.unwrap().server_status,
            ServerStatus::Running
        );
        assert_eq!(service.current().server_status, ServerStatus::Running);
        assert_eq!(
            service.refresh_status().await.server_status,
            ServerStatus::Stopped
        );
    }

    #[tokio::test]
    async fn should_keep_status_when_refresh_fails() {
        let (service, _relay) = service(StubRelay::default());
        service.start().await.unwrap();
        let state = service.refresh_status().await;
        assert_eq!(state.server_status, ServerStatus::Running);
    }
}
