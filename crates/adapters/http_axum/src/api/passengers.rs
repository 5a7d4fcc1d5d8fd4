//! JSON passenger listing.

use axum::Json;
use axum::extract::State;

use relaydash_app::ports::{PassengerDirectory, RelayControl};
use relaydash_domain::passenger::Passenger;

use crate::error::ApiError;
use crate::state::AppState;

/// `GET /api/passengers` — directory order, passwords omitted.
pub async fn list<R, P>(
    State(state): State<AppState<R, P>>,
) -> Result<Json<Vec<Passenger>>, ApiError>
where
    R: RelayControl + Send + Sync + 'static,
    P: PassengerDirectory + Send + Sync + 'static,
{
    Ok(Json(state.passenger_service.list_passengers().await?))
}
