//! Passenger directory over HTTP.

use relaydash_app::ports::PassengerDirectory;
use relaydash_domain::error::RelayDashError;
use relaydash_domain::passenger::Passenger;

use crate::config::PassengerConfig;
use crate::error::RelayHttpError;
use crate::relay::check_status;

/// [`PassengerDirectory`] reading `GET {base_url}/api/User`.
#[derive(Debug, Clone)]
pub struct HttpPassengerDirectory {
    client: reqwest::Client,
    url: String,
}

impl HttpPassengerDirectory {
    /// # Errors
    ///
    /// Returns [`RelayHttpError::Request`] if the client cannot be built.
    pub fn new(config: &PassengerConfig) -> Result<Self, RelayHttpError> {
        let url = config.list_url();
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|source| RelayHttpError::Request {
                url: url.clone(),
                source,
            })?;
        Ok(Self { client, url })
    }

    async fn fetch(&self) -> Result<Vec<Passenger>, RelayHttpError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|source| RelayHttpError::Request {
                url: self.url.clone(),
                source,
            })?;
        let bytes = check_status(&self.url, response)?
            .bytes()
            .await
            .map_err(|source| RelayHttpError::Request {
                url: self.url.clone(),
                source,
            })?;
        serde_json::from_slice(&bytes).map_err(|source| RelayHttpError::Body {
            url: self.url.clone(),
            source,
        })
    }
}

impl PassengerDirectory for HttpPassengerDirectory {
    async fn list(&self) -> Result<Vec<Passenger>, RelayDashError> {
        Ok(self.fetch().await?)
    }
}
