//! Event bus port — publish/subscribe for dashboard snapshots.

use std::future::Future;

use relaydash_domain::dashboard::DashboardState;
use relaydash_domain::error::RelayDashError;

/// Publishes dashboard snapshots to interested subscribers.
pub trait EventPublisher {
    /// Publish a snapshot to all current subscribers.
    fn publish(
        &self,
        snapshot: DashboardState,
    ) -> impl Future<Output = Result<(), RelayDashError>> + Send;
}

impl<T: EventPublisher + Send + Sync> EventPublisher for std::sync::Arc<T> {
    fn publish(
        &self,
        snapshot: DashboardState,
    ) -> impl Future<Output = Result<(), RelayDashError>> + Send {
        (**self).publish(snapshot)
    }
}
