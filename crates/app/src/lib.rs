//! # relaydash-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `RelayControl` — status read and start/stop commands on the relay
//!   - `PushHub` — the persistent push connection to the relay's hub
//!   - `PassengerDirectory` — read-only passenger listing
//!   - `EventPublisher` — fan-out of dashboard snapshots
//! - Own the **dashboard session**: the single task that holds dashboard state
//!   and applies updates received over a channel
//! - Run the **relay monitor**: initial status poll and push listener
//! - Provide **services**: `SessionGate`, `ControlService`, `PassengerService`
//!
//! ## Dependency rule
//! Depends on `relaydash-domain` only (plus `tokio` for channels and tasks).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod dashboard_session;
pub mod event_bus;
pub mod monitor;
pub mod ports;
pub mod services;
