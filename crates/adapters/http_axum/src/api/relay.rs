//! JSON relay control handlers.

use axum::Json;
use axum::extract::State;

use relaydash_app::ports::{PassengerDirectory, RelayControl};
use relaydash_domain::dashboard::DashboardState;

use crate::error::ApiError;
use crate::state::AppState;

/// `POST /api/relay/start` — start the relay; 502 when the command fails.
pub async fn start<R, P>(
    State(state): State<AppState<R, P>>,
) -> Result<Json<DashboardState>, ApiError>
where
    R: RelayControl + Send + Sync + 'static,
    P: PassengerDirectory + Send + Sync + 'static,
{
    Ok(Json(state.control_service.start().await?))
}

/// `POST /api/relay/stop` — stop the relay; 502 when the command fails.
pub async fn stop<R, P>(
    State(state): State<AppState<R, P>>,
) -> Result<Json<DashboardState>, ApiError>
where
    R: RelayControl + Send + Sync + 'static,
    P: PassengerDirectory + Send + Sync + 'static,
{
    Ok(Json(state.control_service.stop().await?))
}

/// `POST /api/relay/refresh` — re-read the relay status.
pub async fn refresh<R, P>(State(state): State<AppState<R, P>>) -> Json<DashboardState>
where
    R: RelayControl + Send + Sync + 'static,
    P: PassengerDirectory + Send + Sync + 'static,
{
    Json(state.control_service.refresh_status().await)
}
