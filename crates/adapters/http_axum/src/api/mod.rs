//! JSON API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod auth;
#[allow(clippy::missing_errors_doc)]
pub mod dashboard;
#[allow(clippy::missing_errors_doc)]
pub mod passengers;
#[allow(clippy::missing_errors_doc)]
pub mod relay;
pub mod sse;

use axum::Router;
use axum::routing::{get, post};

use relaydash_app::ports::{PassengerDirectory, RelayControl};

use crate::state::AppState;

/// `/api` routes reachable without a session.
pub fn public_routes<R, P>() -> Router<AppState<R, P>>
where
    R: RelayControl + Send + Sync + 'static,
    P: PassengerDirectory + Send + Sync + 'static,
{
    Router::new()
        .route("/login", post(auth::login::<R, P>))
        .route("/logout", post(auth::logout::<R, P>))
}

/// `/api` routes behind the session gate.
pub fn protected_routes<R, P>() -> Router<AppState<R, P>>
where
    R: RelayControl + Send + Sync + 'static,
    P: PassengerDirectory + Send + Sync + 'static,
{
    Router::new()
        // Dashboard
        .route("/dashboard", get(dashboard::snapshot::<R, P>))
        .route("/dashboard/stream", get(sse::stream::<R, P>))
        // Relay control
        .route("/relay/start", post(relay::start::<R, P>))
        .route("/relay/stop", post(relay::stop::<R, P>))
        .route("/relay/refresh", post(relay::refresh::<R, P>))
        // Passengers
        .route("/passengers", get(passengers::list::<R, P>))
}
