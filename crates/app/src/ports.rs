//! Port definitions — traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside world.
//! They are defined here (in `app`) so that both the use-case layer and the
//! adapter layer can depend on them without creating circular dependencies.

pub mod event_bus;
pub mod passengers;
pub mod push_hub;
pub mod relay;

pub use event_bus::EventPublisher;
pub use passengers::PassengerDirectory;
pub use push_hub::{ConnectionGuard, HubMessage, PushChannel, PushHub};
pub use relay::RelayControl;
