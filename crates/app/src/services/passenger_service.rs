//! Passenger service — read-only passenger listing.

use relaydash_domain::error::RelayDashError;
use relaydash_domain::passenger::Passenger;

use crate::ports::PassengerDirectory;

/// Application service over a [`PassengerDirectory`].
pub struct PassengerService<D> {
    directory: D,
}

impl<D: PassengerDirectory> PassengerService<D> {
    pub fn new(directory: D) -> Self {
        Self { directory }
    }

    /// List passengers in directory order.
    ///
    /// # Errors
    ///
    /// Returns [`RelayDashError::RemoteUnavailable`] when the directory cannot
    /// be read.
    #[tracing::instrument(skip(self))]
    pub async fn list_passengers(&self) -> Result<Vec<Passenger>, RelayDashError> {
        let passengers = self.directory.list().await?;
        tracing::debug!(count = passengers.len(), "passengers listed");
        Ok(passengers)
    }
}
