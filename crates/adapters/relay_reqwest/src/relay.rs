//! Relay status and control over HTTP.

use relaydash_app::ports::RelayControl;
use relaydash_domain::error::RelayDashError;
use relaydash_domain::status::ServerStatus;
use serde::Deserialize;

use crate::config::RelayConfig;
use crate::error::RelayHttpError;

/// `GET /estado` response body.
#[derive(Debug, Deserialize)]
struct StatusBody {
    activo: bool,
}

/// [`RelayControl`] backed by the relay's HTTP endpoints.
#[derive(Debug, Clone)]
pub struct HttpRelay {
    client: reqwest::Client,
    config: RelayConfig,
}

impl HttpRelay {
    /// Build a client with the configured request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`RelayHttpError::Request`] if the underlying client cannot be
    /// built (e.g. the TLS backend fails to initialise).
    pub fn new(config: RelayConfig) -> Result<Self, RelayHttpError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|source| RelayHttpError::Request {
                url: config.base_url.clone(),
                source,
            })?;
        Ok(Self { client, config })
    }

    async fn get_status(&self) -> Result<ServerStatus, RelayHttpError> {
        let url = self.config.endpoint("estado");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| RelayHttpError::Request {
                url: url.clone(),
                source,
            })?;
        let response = check_status(&url, response)?;
        let bytes = response
            .bytes()
            .await
            .map_err(|source| RelayHttpError::Request {
                url: url.clone(),
                source,
            })?;

        Ok(match serde_json::from_slice::<StatusBody>(&bytes) {
            Ok(body) => ServerStatus::from_activo(body.activo),
            Err(source) => {
                let err = RelayHttpError::Body { url, source };
                tracing::warn!(error = %err, "relay status body not understood");
                ServerStatus::Error
            }
        })
    }

    async fn command(&self, path: &str) -> Result<(), RelayHttpError> {
        let url = self.config.endpoint(path);
        let response = self
            .client
            .post(&url)
            .send()
            .await
            .map_err(|source| RelayHttpError::Request {
                url: url.clone(),
                source,
            })?;
        check_status(&url, response)?;
        tracing::debug!(%url, "relay command accepted");
        Ok(())
    }
}

pub(crate) fn check_status(
    url: &str,
    response: reqwest::Response,
) -> Result<reqwest::Response, RelayHttpError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(RelayHttpError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        })
    }
}

impl RelayControl for HttpRelay {
    async fn fetch_status(&self) -> Result<ServerStatus, RelayDashError> {
        Ok(self.get_status().await?)
    }

    async fn start(&self) -> Result<(), RelayDashError> {
        Ok(self.command("iniciar").await?)
    }

    async fn stop(&self) -> Result<(), RelayDashError> {
        Ok(self.command("detener").await?)
    }
}
