//! Server-side rendered HTML dashboard (no JavaScript).
//!
//! The dashboard page carries `<meta http-equiv="refresh">` so it reloads
//! itself; actions are plain forms answered with a redirect (PRG).

pub mod home;
pub mod login;
pub mod passengers;

use axum::Router;
use axum::response::Redirect;
use axum::routing::{get, post};

use relaydash_app::ports::{PassengerDirectory, RelayControl};

use crate::state::AppState;

/// Pages reachable without a session.
pub fn public_routes<R, P>() -> Router<AppState<R, P>>
where
    R: RelayControl + Send + Sync + 'static,
    P: PassengerDirectory + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(|| async { Redirect::to("/dashboard") }))
        .route(
            "/login",
            get(login::form::<R, P>).post(login::submit::<R, P>),
        )
        .route("/logout", post(login::logout::<R, P>))
}

/// Pages behind the session gate.
pub fn protected_routes<R, P>() -> Router<AppState<R, P>>
where
    R: RelayControl + Send + Sync + 'static,
    P: PassengerDirectory + Send + Sync + 'static,
{
    Router::new()
        .route("/dashboard", get(home::index::<R, P>))
        .route("/dashboard/start", post(home::start::<R, P>))
        .route("/dashboard/stop", post(home::stop::<R, P>))
        .route("/dashboard/refresh", post(home::refresh::<R, P>))
        .route("/passengers", get(passengers::list::<R, P>))
}
