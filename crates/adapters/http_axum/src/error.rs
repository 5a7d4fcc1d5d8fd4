//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use relaydash_domain::error::RelayDashError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps failures to an HTTP response with appropriate status code.
pub enum ApiError {
    /// No valid session cookie on a gated endpoint.
    Unauthenticated,
    Domain(RelayDashError),
}

impl From<RelayDashError> for ApiError {
    fn from(err: RelayDashError) -> Self {
        Self::Domain(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::Unauthenticated => (StatusCode::UNAUTHORIZED, "no autenticado".to_string()),
            Self::Domain(RelayDashError::InvalidCredentials) => (
                StatusCode::UNAUTHORIZED,
                "Credenciales incorrectas".to_string(),
            ),
            Self::Domain(RelayDashError::RemoteUnavailable(source)) => {
                tracing::error!(error = %source, "remote service unavailable");
                (
                    StatusCode::BAD_GATEWAY,
                    "servicio remoto no disponible".to_string(),
                )
            }
            Self::Domain(err @ RelayDashError::MalformedPushPayload(_)) => {
                (StatusCode::BAD_REQUEST, err.to_string())
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
