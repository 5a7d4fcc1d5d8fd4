//! Hub adapter error types.

use relaydash_domain::error::RelayDashError;

use crate::protocol::ProtocolError;

#[derive(Debug, thiserror::Error)]
pub enum HubError {
    /// The hub URL could not be parsed or has an unsupported scheme.
    #[error("invalid hub url {0}")]
    InvalidUrl(String),

    /// The negotiate request failed in transit.
    #[error("negotiate request to {url} failed")]
    Negotiate {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The negotiate endpoint answered with a non-success status.
    #[error("negotiate at {url} answered {status}")]
    NegotiateStatus { url: String, status: u16 },

    /// The server refused to negotiate or returned nothing usable.
    #[error("negotiate rejected: {0}")]
    NegotiateRejected(String),

    #[error("websocket error")]
    WebSocket(#[source] Box<tokio_tungstenite::tungstenite::Error>),

    /// The hub answered the handshake with an error.
    #[error("handshake rejected: {0}")]
    HandshakeRejected(String),

    /// The connection ended before the handshake completed.
    #[error("connection closed during handshake")]
    HandshakeInterrupted,

    #[error("handshake timed out")]
    HandshakeTimeout,

    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

impl From<tokio_tungstenite::tungstenite::Error> for HubError {
    fn from(err: tokio_tungstenite::tungstenite::Error) -> Self {
        Self::WebSocket(Box::new(err))
    }
}

impl From<HubError> for RelayDashError {
    fn from(err: HubError) -> Self {
        RelayDashError::remote(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_convert_into_remote_unavailable() {
        let err: RelayDashError = HubError::HandshakeRejected("nope".to_string()).into();
        assert!(matches!(err, RelayDashError::RemoteUnavailable(_)));
    }

    #[test]
    fn should_display_negotiate_status() {
        let err = HubError::NegotiateStatus {
            url: "http://relay/hub/negotiate".to_string(),
            status: 404,
        };
        assert_eq!(
            err.to_string(),
            "negotiate at http://relay/hub/negotiate answered 404"
        );
    }
}
