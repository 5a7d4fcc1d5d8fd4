//! Login and logout pages.

use askama::Template;
use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use relaydash_app::ports::{PassengerDirectory, RelayControl};

use crate::auth::to_cookie;
use crate::state::AppState;

/// Login form template.
#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    error: Option<&'static str>,
}

impl IntoResponse for LoginTemplate {
    fn into_response(self) -> Response {
        Html(self.to_string()).into_response()
    }
}

/// Form data posted by the login page.
#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Response from the login form handler (PRG pattern).
pub enum LoginResponse {
    Redirect(CookieJar, Redirect),
    Rejected(LoginTemplate),
}

impl IntoResponse for LoginResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Redirect(jar, redirect) => (jar, redirect).into_response(),
            Self::Rejected(page) => (StatusCode::UNAUTHORIZED, page).into_response(),
        }
    }
}

/// `GET /login` — the credential form.
pub async fn form<R, P>(State(_state): State<AppState<R, P>>) -> LoginTemplate
where
    R: RelayControl + Send + Sync + 'static,
    P: PassengerDirectory + Send + Sync + 'static,
{
    LoginTemplate { error: None }
}

/// `POST /login` — set the session cookie and go to the dashboard.
pub async fn submit<R, P>(
    State(state): State<AppState<R, P>>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> LoginResponse
where
    R: RelayControl + Send + Sync + 'static,
    P: PassengerDirectory + Send + Sync + 'static,
{
    match state.session_gate.authenticate(&form.username, &form.password) {
        Ok(cookie) => LoginResponse::Redirect(jar.add(to_cookie(cookie)), Redirect::to("/dashboard")),
        Err(_) => LoginResponse::Rejected(LoginTemplate {
            error: Some("Credenciales incorrectas"),
        }),
    }
}

/// `POST /logout` — expire the session and go back to the form.
pub async fn logout<R, P>(
    State(state): State<AppState<R, P>>,
    jar: CookieJar,
) -> (CookieJar, Redirect)
where
    R: RelayControl + Send + Sync + 'static,
    P: PassengerDirectory + Send + Sync + 'static,
{
    (
        jar.add(to_cookie(state.session_gate.revoke())),
        Redirect::to("/login"),
    )
}
