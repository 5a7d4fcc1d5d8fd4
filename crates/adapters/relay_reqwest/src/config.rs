//! Remote endpoint configuration.

use std::time::Duration;

use serde::Deserialize;

/// Where the relay server lives and how to talk to it.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    /// Base URL of the relay (status, control and hub endpoints hang off it).
    pub base_url: String,
    /// Path of the push hub below `base_url`.
    pub hub_path: String,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Re-poll the relay status every N seconds. `0` polls once at startup.
    pub status_refresh_secs: u64,
}

impl RelayConfig {
    /// `{base_url}/{path}` without doubled slashes.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        join(&self.base_url, path)
    }

    /// Full URL of the push hub.
    #[must_use]
    pub fn hub_url(&self) -> String {
        self.endpoint(&self.hub_path)
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Interval for periodic status polls, if enabled.
    #[must_use]
    pub fn status_refresh(&self) -> Option<Duration> {
        (self.status_refresh_secs > 0).then(|| Duration::from_secs(self.status_refresh_secs))
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            base_url: "https://sub.velsat.pe:8587".to_string(),
            hub_path: "retransmisionhub".to_string(),
            request_timeout_secs: 10,
            status_refresh_secs: 0,
        }
    }
}

/// Where the passenger directory lives.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PassengerConfig {
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl PassengerConfig {
    /// Full URL of the passenger listing.
    #[must_use]
    pub fn list_url(&self) -> String {
        join(&self.base_url, "api/User")
    }
}

impl Default for PassengerConfig {
    fn default() -> Self {
        Self {
            base_url: "https://velsat.pe:8586".to_string(),
            request_timeout_secs: 10,
        }
    }
}

fn join(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
