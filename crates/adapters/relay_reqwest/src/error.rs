//! Outbound HTTP adapter error types.

use relaydash_domain::error::RelayDashError;

/// Errors specific to the reqwest adapter.
#[derive(Debug, thiserror::Error)]
pub enum RelayHttpError {
    /// Building the client or sending the request failed.
    #[error("request to {url} failed")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The remote answered with a non-success status.
    #[error("{url} answered {status}")]
    Status { url: String, status: u16 },

    /// The response body could not be decoded.
    #[error("unexpected response body from {url}")]
    Body {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl From<RelayHttpError> for RelayDashError {
    fn from(err: RelayHttpError) -> Self {
        RelayDashError::remote(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_status_error() {
        let err = RelayHttpError::Status {
            url: "http://relay/estado".to_string(),
            status: 503,
        };
        assert_eq!(err.to_string(), "http://relay/estado answered 503");
    }

    #[test]
    fn should_convert_into_remote_unavailable() {
        let err: RelayDashError = RelayHttpError::Status {
            url: "http://relay/iniciar".to_string(),
            status: 500,
        }
        .into();
        assert!(matches!(err, RelayDashError::RemoteUnavailable(_)));
    }
}
