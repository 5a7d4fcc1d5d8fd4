//! Shared application state for axum handlers.

use std::sync::Arc;

use relaydash_app::event_bus::InProcessEventBus;
use relaydash_app::ports::{PassengerDirectory, RelayControl};
use relaydash_app::services::control_service::ControlService;
use relaydash_app::services::passenger_service::PassengerService;
use relaydash_app::services::session_gate::SessionGate;

/// Page rendering settings.
#[derive(Debug, Clone, Copy)]
pub struct DashboardSettings {
    /// Auto-reload period of the dashboard page.
    pub refresh_seconds: u32,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self { refresh_seconds: 5 }
    }
}

/// Application state shared across all axum handlers.
///
/// Generic over the relay and passenger directory adapters to avoid dynamic
/// dispatch. `Clone` is implemented manually so the underlying types
/// themselves do not need to be `Clone`; only the `Arc` wrappers are cloned.
pub struct AppState<R, P> {
    pub session_gate: Arc<SessionGate>,
    /// Start/stop/refresh and the current snapshot.
    pub control_service: Arc<ControlService<R>>,
    pub passenger_service: Arc<PassengerService<P>>,
    /// Source of the SSE stream.
    pub event_bus: Arc<InProcessEventBus>,
    pub settings: DashboardSettings,
}

impl<R, P> Clone for AppState<R, P> {
    fn clone(&self) -> Self {
        Self {
            session_gate: Arc::clone(&self.session_gate),
            control_service: Arc::clone(&self.control_service),
            passenger_service: Arc::clone(&self.passenger_service),
            event_bus: Arc::clone(&self.event_bus),
            settings: self.settings,
        }
    }
}

impl<R, P> AppState<R, P>
where
    R: RelayControl + Send + Sync + 'static,
    P: PassengerDirectory + Send + Sync + 'static,
{
    /// Create a new application state from service instances.
    pub fn new(
        session_gate: SessionGate,
        control_service: ControlService<R>,
        passenger_service: PassengerService<P>,
        event_bus: Arc<InProcessEventBus>,
        settings: DashboardSettings,
    ) -> Self {
        Self {
            session_gate: Arc::new(session_gate),
            control_service: Arc::new(control_service),
            passenger_service: Arc::new(passenger_service),
            event_bus,
            settings,
        }
    }
}
