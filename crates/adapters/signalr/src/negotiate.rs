//! Connection negotiation.
//!
//! `POST {hub}/negotiate?negotiateVersion=1` returns a connection token to put
//! on the websocket URL. A hub behind a service may instead redirect the
//! client with `url` and `accessToken`; that redirect is followed once.

use reqwest::Url;
use serde::Deserialize;

use crate::error::HubError;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NegotiateResponse {
    connection_token: Option<String>,
    connection_id: Option<String>,
    url: Option<String>,
    access_token: Option<String>,
    error: Option<String>,
}

/// Negotiate and return the websocket URL to connect to.
///
/// # Errors
///
/// Returns a [`HubError`] when the endpoint cannot be reached, answers with
/// a failure, or hands out neither a token nor a redirect.
pub async fn negotiate(client: &reqwest::Client, hub_url: &str) -> Result<Url, HubError> {
    let response = request(client, hub_url, None).await?;
    let (hub_url, access_token, response) = match response.url {
        Some(redirect) => {
            tracing::debug!(%redirect, "negotiate redirected");
            let token = response.access_token;
            let redirected = request(client, &redirect, token.as_deref()).await?;
            if redirected.url.is_some() {
                return Err(HubError::NegotiateRejected(
                    "redirected more than once".to_string(),
                ));
            }
            (redirect, token, redirected)
        }
        None => (hub_url.to_string(), None, response),
    };

    let id = response
        .connection_token
        .or(response.connection_id)
        .ok_or_else(|| HubError::NegotiateRejected("no connection token".to_string()))?;
    websocket_url(&hub_url, &id, access_token.as_deref())
}

async fn request(
    client: &reqwest::Client,
    hub_url: &str,
    access_token: Option<&str>,
) -> Result<NegotiateResponse, HubError> {
    let url = negotiate_url(hub_url)?;
    let mut builder = client.post(url.clone());
    if let Some(token) = access_token {
        builder = builder.bearer_auth(token);
    }
    let response = builder.send().await.map_err(|source| HubError::Negotiate {
        url: url.to_string(),
        source,
    })?;
    let status = response.status();
    if !status.is_success() {
        return Err(HubError::NegotiateStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    let body: NegotiateResponse = response.json().await.map_err(|source| HubError::Negotiate {
        url: url.to_string(),
        source,
    })?;
    if let Some(error) = body.error {
        return Err(HubError::NegotiateRejected(error));
    }
    Ok(body)
}

fn parse(hub_url: &str) -> Result<Url, HubError> {
    let url = Url::parse(hub_url).map_err(|_| HubError::InvalidUrl(hub_url.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(HubError::InvalidUrl(hub_url.to_string())),
    }
}

/// `{hub}/negotiate?negotiateVersion=1`, keeping any query already on the hub URL.
pub(crate) fn negotiate_url(hub_url: &str) -> Result<Url, HubError> {
    let mut url = parse(hub_url)?;
    let path = format!("{}/negotiate", url.path().trim_end_matches('/'));
    url.set_path(&path);
    url.query_pairs_mut().append_pair("negotiateVersion", "1");
    Ok(url)
}

/// Swap the scheme to `ws`/`wss` and attach the connection id.
pub(crate) fn websocket_url(
    hub_url: &str,
    id: &str,
    access_token: Option<&str>,
) -> Result<Url, HubError> {
    let mut url = parse(hub_url)?;
    let scheme = if url.scheme() == "https" { "wss" } else { "ws" };
    url.set_scheme(scheme)
        .map_err(|()| HubError::InvalidUrl(hub_url.to_string()))?;
    {
        let mut query = url.query_pairs_mut();
        query.append_pair("id", id);
        if let Some(token) = access_token {
            query.append_pair("access_token", token);
        }
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::json;

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[test]
    fn should_build_negotiate_url() {
        let url = negotiate_url("https://relay.example:8587/retransmisionhub").unwrap();
        assert_eq!(
            url.as_str(),
            "https://relay.example:8587/retransmisionhub/negotiate?negotiateVersion=1"
        );
    }

    #[test]
    fn should_switch_to_secure_websocket_for_https() {
        let url = websocket_url("https://relay.example:8587/retransmisionhub", "abc", None).unwrap();
        assert_eq!(
            url.as_str(),
            "wss://relay.example:8587/retransmisionhub?id=abc"
        );
    }

    #[test]
    fn should_switch_to_plain_websocket_for_http() {
        let url = websocket_url("http://127.0.0.1:9000/hub", "t", Some("jwt")).unwrap();
        assert_eq!(url.as_str(), "ws://127.0.0.1:9000/hub?id=t&access_token=jwt");
    }

    #[test]
    fn should_reject_non_http_hub_url() {
        assert!(matches!(
            negotiate_url("ftp://relay/hub").unwrap_err(),
            HubError::InvalidUrl(_)
        ));
        assert!(matches!(
            negotiate_url("not a url").unwrap_err(),
            HubError::InvalidUrl(_)
        ));
    }

    #[tokio::test]
    async fn should_prefer_connection_token() {
        let base = serve(Router::new().route(
            "/hub/negotiate",
            post(|| async {
                Json(json!({
                    "negotiateVersion": 1,
                    "connectionId": "id-1",
                    "connectionToken": "token-1",
                    "availableTransports": []
                }))
            }),
        ))
        .await;
        let url = negotiate(&reqwest::Client::new(), &format!("{base}/hub"))
            .await
            .unwrap();
        assert_eq!(url.scheme(), "ws");
        assert_eq!(url.query(), Some("id=token-1"));
    }

    #[tokio::test]
    async fn should_follow_redirect_once() {
        let target = serve(Router::new().route(
            "/other/negotiate",
            post(|| async { Json(json!({"connectionId": "id-2"})) }),
        ))
        .await;
        let redirect = format!("{target}/other");
        let front = serve(Router::new().route(
            "/hub/negotiate",
            post(move || {
                let redirect = redirect.clone();
                async move { Json(json!({"url": redirect, "accessToken": "jwt"})) }
            }),
        ))
        .await;
        let url = negotiate(&reqwest::Client::new(), &format!("{front}/hub"))
            .await
            .unwrap();
        assert_eq!(url.path(), "/other");
        assert_eq!(url.query(), Some("id=id-2&access_token=jwt"));
    }

    #[tokio::test]
    async fn should_surface_negotiate_error() {
        let base = serve(Router::new().route(
            "/hub/negotiate",
            post(|| async { Json(json!({"error": "Hub unavailable"})) }),
        ))
        .await;
        let err = negotiate(&reqwest::Client::new(), &format!("{base}/hub"))
            .await
            .unwrap_err();
        assert!(matches!(err, HubError::NegotiateRejected(msg) if msg == "Hub unavailable"));
    }

    #[tokio::test]
    async fn should_fail_on_missing_endpoint() {
        let base = serve(Router::new()).await;
        let err = negotiate(&reqwest::Client::new(), &format!("{base}/hub"))
            .await
            .unwrap_err();
        assert!(matches!(err, HubError::NegotiateStatus { status: 404, .. }));
    }
}
