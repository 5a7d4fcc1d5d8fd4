//! JSON snapshot of the dashboard state.

use axum::Json;
use axum::extract::State;

use relaydash_app::ports::{PassengerDirectory, RelayControl};
use relaydash_domain::dashboard::DashboardState;

use crate::state::AppState;

/// `GET /api/dashboard` — the current snapshot.
pub async fn snapshot<R, P>(State(state): State<AppState<R, P>>) -> Json<DashboardState>
where
    R: RelayControl + Send + Sync + 'static,
    P: PassengerDirectory + Send + Sync + 'static,
{
    Json(state.control_service.current())
}
