//! Relay control port — the remote retransmission server's HTTP surface.

use std::future::Future;

use relaydash_domain::error::RelayDashError;
use relaydash_domain::status::ServerStatus;

/// Remote status read and control commands of the relay server.
pub trait RelayControl {
    /// Read whether the relay is active.
    ///
    /// Implementations return [`ServerStatus::Error`] when the relay answers
    /// successfully with a body that cannot be understood, and
    /// [`RelayDashError::RemoteUnavailable`] on transport failures or
    /// non-success statuses.
    fn fetch_status(&self) -> impl Future<Output = Result<ServerStatus, RelayDashError>> + Send;

    /// Ask the relay to start forwarding frames.
    fn start(&self) -> impl Future<Output = Result<(), RelayDashError>> + Send;

    /// Ask the relay to stop forwarding frames.
    fn stop(&self) -> impl Future<Output = Result<(), RelayDashError>> + Send;
}

impl<T: RelayControl + Send + Sync> RelayControl for std::sync::Arc<T> {
    fn fetch_status(&self) -> impl Future<Output = Result<ServerStatus, RelayDashError>> + Send {
        (**self).fetch_status()
    }

    fn start(&self) -> impl Future<Output = Result<(), RelayDashError>> + Send {
        (**self).start()
    }

    fn stop(&self) -> impl Future<Output = Result<(), RelayDashError>> + Send {
        (**self).stop()
    }
}
