//! # relaydash-adapter-relay-reqwest
//!
//! Outbound HTTP adapter built on [reqwest](https://docs.rs/reqwest).
//!
//! ## Responsibilities
//! - Implement [`RelayControl`](relaydash_app::ports::RelayControl) against the
//!   relay's `/estado`, `/iniciar` and `/detener` endpoints
//! - Implement [`PassengerDirectory`](relaydash_app::ports::PassengerDirectory)
//!   against the external `/api/User` listing
//! - Map transport failures and non-success statuses to
//!   `RelayDashError::RemoteUnavailable`
//!
//! ## Dependency rule
//! Depends on `relaydash-app` (port traits) and `relaydash-domain`.

pub mod config;
pub mod error;
pub mod passengers;
pub mod relay;

pub use config::{PassengerConfig, RelayConfig};
pub use error::RelayHttpError;
pub use passengers::HttpPassengerDirectory;
pub use relay::HttpRelay;
