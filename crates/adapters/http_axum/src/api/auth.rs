//! JSON login/logout handlers.

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};

use relaydash_app::ports::{PassengerDirectory, RelayControl};

use crate::auth::to_cookie;
use crate::error::ApiError;
use crate::state::AppState;

/// Request body for `POST /api/login`.
#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Confirmation body.
#[derive(Serialize)]
pub struct MessageBody {
    pub message: &'static str,
}

/// Possible responses from the login and logout endpoints.
pub enum SessionResponse {
    Ok(CookieJar, Json<MessageBody>),
}

impl IntoResponse for SessionResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(jar, json) => (jar, json).into_response(),
        }
    }
}

/// `POST /api/login` — exchange the credential pair for a session cookie.
pub async fn login<R, P>(
    State(state): State<AppState<R, P>>,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> Result<SessionResponse, ApiError>
where
    R: RelayControl + Send + Sync + 'static,
    P: PassengerDirectory + Send + Sync + 'static,
{
    let cookie = state
        .session_gate
        .authenticate(&body.username, &body.password)?;

    Ok(SessionResponse::Ok(
        jar.add(to_cookie(cookie)),
        Json(MessageBody {
            message: "Login exitoso",
        }),
    ))
}

/// `POST /api/logout` — expire the session cookie, whether or not one exists.
pub async fn logout<R, P>(State(state): State<AppState<R, P>>, jar: CookieJar) -> SessionResponse
where
    R: RelayControl + Send + Sync + 'static,
    P: PassengerDirectory + Send + Sync + 'static,
{
    SessionResponse::Ok(
        jar.add(to_cookie(state.session_gate.revoke())),
        Json(MessageBody {
            message: "Logout exitoso",
        }),
    )
}
