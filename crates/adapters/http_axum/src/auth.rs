//! Session cookie handling and the gate middleware.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar};

use relaydash_app::ports::{PassengerDirectory, RelayControl};
use relaydash_domain::session::{COOKIE_NAME, SessionCookie};

use crate::error::ApiError;
use crate::state::AppState;

/// Translate a domain session cookie into a `Set-Cookie` entry.
#[must_use]
pub fn to_cookie(session: SessionCookie) -> Cookie<'static> {
    let max_age = time::Duration::try_from(session.max_age).unwrap_or(time::Duration::MAX);
    Cookie::build((session.name, session.value))
        .path(session.path)
        .http_only(session.http_only)
        .max_age(max_age)
        .build()
}

fn has_session<R, P>(state: &AppState<R, P>, jar: &CookieJar) -> bool {
    state
        .session_gate
        .is_authenticated(jar.get(COOKIE_NAME).map(Cookie::value))
}

/// Gate for HTML pages: no session, back to the login form.
pub async fn require_page_session<R, P>(
    State(state): State<AppState<R, P>>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Response
where
    R: RelayControl + Send + Sync + 'static,
    P: PassengerDirectory + Send + Sync + 'static,
{
    if has_session(&state, &jar) {
        next.run(request).await
    } else {
        Redirect::to("/login").into_response()
    }
}

/// Gate for JSON endpoints: no session, `401 {"error":"no autenticado"}`.
pub async fn require_api_session<R, P>(
    State(state): State<AppState<R, P>>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Response
where
    R: RelayControl + Send + Sync + 'static,
    P: PassengerDirectory + Send + Sync + 'static,
{
    if has_session(&state, &jar) {
        next.run(request).await
    } else {
        ApiError::Unauthenticated.into_response()
    }
}
