//! Dashboard home page: relay status, last frame, last response, controls.

use askama::Template;
use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde::Deserialize;

use relaydash_app::ports::{PassengerDirectory, RelayControl};
use relaydash_domain::time::local_offset;
use relaydash_domain::view::DashboardView;

use crate::state::AppState;

/// Dashboard page template.
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    refresh_seconds: u32,
    view: DashboardView,
    alert: Option<&'static str>,
}

impl IntoResponse for DashboardTemplate {
    fn into_response(self) -> Response {
        Html(self.to_string()).into_response()
    }
}

/// Query string of `GET /dashboard`.
#[derive(Deserialize)]
pub struct DashboardQuery {
    pub error: Option<String>,
}

/// Failed action reported back through the redirect.
fn alert_for(code: &str) -> Option<&'static str> {
    match code {
        "start" => Some("Error al iniciar el servidor"),
        "stop" => Some("Error al detener el servidor"),
        _ => None,
    }
}

/// `GET /dashboard` — current state, reloaded every `refresh_seconds`.
pub async fn index<R, P>(
    State(state): State<AppState<R, P>>,
    Query(query): Query<DashboardQuery>,
) -> DashboardTemplate
where
    R: RelayControl + Send + Sync + 'static,
    P: PassengerDirectory + Send + Sync + 'static,
{
    let snapshot = state.control_service.current();

    DashboardTemplate {
        refresh_seconds: state.settings.refresh_seconds,
        view: DashboardView::project(&snapshot, local_offset()),
        alert: query.error.as_deref().and_then(alert_for),
    }
}

/// `POST /dashboard/start` — start the relay (PRG).
pub async fn start<R, P>(State(state): State<AppState<R, P>>) -> Redirect
where
    R: RelayControl + Send + Sync + 'static,
    P: PassengerDirectory + Send + Sync + 'static,
{
    match state.control_service.start().await {
        Ok(_) => Redirect::to("/dashboard"),
        Err(err) => {
            tracing::error!(error = %err, "start command failed");
            Redirect::to("/dashboard?error=start")
        }
    }
}

/// `POST /dashboard/stop` — stop the relay (PRG).
pub async fn stop<R, P>(State(state): State<AppState<R, P>>) -> Redirect
where
    R: RelayControl + Send + Sync + 'static,
    P: PassengerDirectory + Send + Sync + 'static,
{
    match state.control_service.stop().await {
        Ok(_) => Redirect::to("/dashboard"),
        Err(err) => {
            tracing::error!(error = %err, "stop command failed");
            Redirect::to("/dashboard?error=stop")
        }
    }
}

/// `POST /dashboard/refresh` — re-read the relay status (PRG).
pub async fn refresh<R, P>(State(state): State<AppState<R, P>>) -> Redirect
where
    R: RelayControl + Send + Sync + 'static,
    P: PassengerDirectory + Send + Sync + 'static,
{
    state.control_service.refresh_status().await;
    Redirect::to("/dashboard")
}
