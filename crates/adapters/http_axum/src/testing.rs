//! Stub adapters and request helpers shared by the handler tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::http::{header, request};
use axum::response::Response;
use http_body_util::BodyExt;

use relaydash_app::dashboard_session::DashboardSession;
use relaydash_app::event_bus::InProcessEventBus;
use relaydash_app::ports::{PassengerDirectory, RelayControl};
use relaydash_app::services::control_service::ControlService;
use relaydash_app::services::passenger_service::PassengerService;
use relaydash_app::services::session_gate::SessionGate;
use relaydash_domain::error::RelayDashError;
use relaydash_domain::passenger::Passenger;
use relaydash_domain::session::Credentials;
use relaydash_domain::status::ServerStatus;

use crate::state::{AppState, DashboardSettings};

#[derive(Default)]
pub struct StubRelay {
    pub fail_commands: bool,
    /// `None` makes status reads fail.
    pub status: Option<ServerStatus>,
    pub polls: AtomicUsize,
}

impl StubRelay {
    pub fn polls(&self) -> usize {
        self.polls.load(Ordering::SeqCst)
    }
}

impl RelayControl for StubRelay {
    async fn fetch_status(&self) -> Result<ServerStatus, RelayDashError> {
        self.polls.fetch_add(1, Ordering::SeqCst);
        self.status
            .ok_or_else(|| RelayDashError::remote("status unavailable"))
    }
    async fn start(&self) -> Result<(), RelayDashError> {
        if self.fail_commands {
            return Err(RelayDashError::remote("503 Service Unavailable"));
        }
        Ok(())
    }
    async fn stop(&self) -> Result<(), RelayDashError> {
        if self.fail_commands {
            return Err(RelayDashError::remote("503 Service Unavailable"));
        }
        Ok(())
    }
}

/// `None` makes the listing fail.
pub struct StubDirectory(Option<Vec<Passenger>>);

impl PassengerDirectory for StubDirectory {
    async fn list(&self) -> Result<Vec<Passenger>, RelayDashError> {
        self.0
            .clone()
            .ok_or_else(|| RelayDashError::remote("directory down"))
    }
}

pub fn passenger(id: &str, description: &str) -> Passenger {
    Passenger {
        account_id: id.to_string(),
        password: "secret".to_string(),
        description: description.to_string(),
    }
}

pub fn test_state(
    relay: StubRelay,
    passengers: Option<Vec<Passenger>>,
) -> (AppState<StubRelay, StubDirectory>, Arc<StubRelay>) {
    let event_bus = Arc::new(InProcessEventBus::new(16));
    let (dashboard, _task) = DashboardSession::spawn(Arc::clone(&event_bus), 16);
    let relay = Arc::new(relay);

    let state = AppState::new(
        SessionGate::new(Credentials::new("jlatransport", "transjla")),
        ControlService::new(Arc::clone(&relay), dashboard),
        PassengerService::new(StubDirectory(passengers)),
        event_bus,
        DashboardSettings::default(),
    );
    (state, relay)
}

/// Attach a session cookie.
pub fn authed(builder: request::Builder) -> request::Builder {
    builder.header(header::COOKIE, "auth_token=0123456789abcdef")
}

pub async fn body_string(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}
