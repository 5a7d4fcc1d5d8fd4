//! Axum router assembly.

use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use relaydash_app::ports::{PassengerDirectory, RelayControl};

use crate::auth::{require_api_session, require_page_session};
use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// API routes live under `/api`, pages at `/`. Everything except `/health`,
/// the login/logout endpoints and `/` sits behind the session gate.
/// Includes a [`TraceLayer`] that logs each HTTP request/response at the
/// `DEBUG` level using the `tracing` ecosystem.
pub fn build<R, P>(state: AppState<R, P>) -> Router
where
    R: RelayControl + Send + Sync + 'static,
    P: PassengerDirectory + Send + Sync + 'static,
{
    let api = crate::api::public_routes::<R, P>().merge(
        crate::api::protected_routes::<R, P>().route_layer(from_fn_with_state(
            state.clone(),
            require_api_session::<R, P>,
        )),
    );
    let pages = crate::dashboard::public_routes::<R, P>().merge(
        crate::dashboard::protected_routes::<R, P>().route_layer(from_fn_with_state(
            state.clone(),
            require_page_session::<R, P>,
        )),
    );

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api)
        .merge(pages)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{StubRelay, authed, body_string, test_state};
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use relaydash_domain::status::ServerStatus;
    use tower::ServiceExt;

    fn json_post(uri: &str, body: &'static str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn should_return_ok_when_health_check_called() {
        let (state, _) = test_state(StubRelay::default(), None);
        let app = build(state);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "OK");
    }

    #[tokio::test]
    async fn should_redirect_root_to_dashboard() {
        let (state, _) = test_state(StubRelay::default(), None);
        let response = build(state)
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/dashboard");
    }

    #[tokio::test]
    async fn should_issue_cookie_when_api_login_matches() {
        let (state, _) = test_state(StubRelay::default(), None);
        let response = build(state)
            .oneshot(json_post(
                "/api/login",
                r#"{"username":"jlatransport","password":"transjla"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let cookie = response.headers()[header::SET_COOKIE]
            .to_str()
            .unwrap()
            .to_string();
        assert!(cookie.starts_with("auth_token="));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Max-Age=86400"));
        assert_eq!(
            body_string(response).await,
            r#"{"message":"Login exitoso"}"#
        );
    }

    #[tokio::test]
    async fn should_reject_without_cookie_when_api_login_differs() {
        let (state, _) = test_state(StubRelay::default(), None);
        let response = build(state)
            .oneshot(json_post(
                "/api/login",
                r#"{"username":"jlatransport","password":"TRANSJLA"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(response.headers().get(header::SET_COOKIE).is_none());
        assert_eq!(
            body_string(response).await,
            r#"{"error":"Credenciales incorrectas"}"#
        );
    }

    #[tokio::test]
    async fn should_expire_cookie_when_api_logout_called_without_session() {
        let (state, _) = test_state(StubRelay::default(), None);
        let response = build(state)
            .oneshot(json_post("/api/logout", ""))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
        assert!(cookie.contains("Max-Age=0"));
    }

    #[tokio::test]
    async fn should_reject_api_when_cookie_is_empty() {
        let (state, _) = test_state(StubRelay::default(), None);
        let response = build(state)
            .oneshot(
                Request::builder()
                    .uri("/api/dashboard")
                    .header(header::COOKIE, "auth_token=")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn should_return_snapshot_when_authenticated() {
        let (state, _) = test_state(StubRelay::default(), None);
        let response = build(state)
            .oneshot(authed(Request::builder().uri("/api/dashboard")).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json["server_status"], "stopped");
        assert_eq!(json["connection_status"], "disconnected");
    }

    #[tokio::test]
    async fn should_start_relay_through_api() {
        let (state, _) = test_state(StubRelay::default(), None);
        let response = build(state)
            .oneshot(
                authed(Request::builder().method("POST").uri("/api/relay/start"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json["server_status"], "running");
    }

    #[tokio::test]
    async fn should_answer_bad_gateway_when_relay_command_fails() {
        let (state, _) = test_state(
            StubRelay {
                fail_commands: true,
                ..StubRelay::default()
            },
            None,
        );
        let response = build(state)
            .oneshot(
                authed(Request::builder().method("POST").uri("/api/relay/stop"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert!(json["error"].is_string());
    }

    #[tokio::test]
    async fn should_refresh_status_through_api() {
        let (state, relay) = test_state(
            StubRelay {
                status: Some(ServerStatus::Running),
                ..StubRelay::default()
            },
            None,
        );
        let response = build(state)
            .oneshot(
                authed(Request::builder().method("POST").uri("/api/relay/refresh"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(relay.polls(), 1);
        let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json["server_status"], "running");
    }
}
