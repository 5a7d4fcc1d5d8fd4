//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`RelayDashError`] via `From` when crossing a port boundary.

/// Boxed source error for failures raised by adapters.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Top-level error taxonomy.
#[derive(Debug, thiserror::Error)]
pub enum RelayDashError {
    /// Submitted credentials do not match the configured pair.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// A remote service (relay, hub, passenger directory) could not be reached
    /// or answered with a failure.
    #[error("remote service unavailable")]
    RemoteUnavailable(#[source] BoxError),

    /// A push event could not be decoded.
    #[error("malformed push payload")]
    MalformedPushPayload(#[from] PayloadError),
}

impl RelayDashError {
    /// Wrap any error as [`RelayDashError::RemoteUnavailable`].
    pub fn remote(err: impl Into<BoxError>) -> Self {
        Self::RemoteUnavailable(err.into())
    }
}

/// Reasons a push payload is rejected at the boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PayloadError {
    /// The invocation carried no argument at all.
    #[error("{target}: missing invocation argument")]
    MissingArgument { target: String },

    /// The first argument is not a JSON object.
    #[error("{target}: payload is not an object")]
    NotAnObject { target: String },

    /// A required field is absent or null.
    #[error("{target}: missing field `{field}`")]
    MissingField {
        target: String,
        field: &'static str,
    },

    /// A field is present with the wrong JSON type.
    #[error("{target}: field `{field}` must be {expected}")]
    InvalidField {
        target: String,
        field: &'static str,
        expected: &'static str,
    },
}
