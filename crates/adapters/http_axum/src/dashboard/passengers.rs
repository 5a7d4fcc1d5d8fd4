//! Passenger list page.

use askama::Template;
use axum::extract::State;
use axum::response::{Html, IntoResponse, Response};

use relaydash_app::ports::{PassengerDirectory, RelayControl};
use relaydash_domain::passenger::Passenger;

use crate::state::AppState;

/// Passenger list template.
#[derive(Template)]
#[template(path = "passengers.html")]
pub struct PassengerListTemplate {
    passengers: Vec<Passenger>,
}

impl IntoResponse for PassengerListTemplate {
    fn into_response(self) -> Response {
        Html(self.to_string()).into_response()
    }
}

/// `GET /passengers` — one card per passenger. An unreachable directory
/// renders the same empty-list message.
pub async fn list<R, P>(State(state): State<AppState<R, P>>) -> PassengerListTemplate
where
    R: RelayControl + Send + Sync + 'static,
    P: PassengerDirectory + Send + Sync + 'static,
{
    let passengers = match state.passenger_service.list_passengers().await {
        Ok(passengers) => passengers,
        Err(err) => {
            tracing::error!(error = %err, "passenger directory unavailable");
            Vec::new()
        }
    };

    PassengerListTemplate { passengers }
}
