//! Passenger directory port.

use std::future::Future;

use relaydash_domain::error::RelayDashError;
use relaydash_domain::passenger::Passenger;

/// Read-only listing of passenger accounts.
pub trait PassengerDirectory {
    /// All passengers, in the order the directory returns them.
    fn list(&self) -> impl Future<Output = Result<Vec<Passenger>, RelayDashError>> + Send;
}
