//! Hub connection configuration.

use std::time::Duration;

/// Client keep-alive ping period.
pub const DEFAULT_KEEPALIVE: Duration = Duration::from_secs(15);
/// Server silence after which the connection is considered lost.
pub const DEFAULT_SERVER_TIMEOUT: Duration = Duration::from_secs(30);
/// Upper bound for negotiate plus handshake.
pub const DEFAULT_HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Clone)]
pub struct HubConfig {
    /// HTTP(S) URL of the hub, e.g. `https://relay:8587/retransmisionhub`.
    pub url: String,
    pub keepalive: Duration,
    pub server_timeout: Duration,
    pub handshake_timeout: Duration,
}

impl HubConfig {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            keepalive: DEFAULT_KEEPALIVE,
            server_timeout: DEFAULT_SERVER_TIMEOUT,
            handshake_timeout: DEFAULT_HANDSHAKE_TIMEOUT,
        }
    }
}
