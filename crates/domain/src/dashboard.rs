//! Dashboard state machine.
//!
//! [`DashboardState`] is the single record behind every view. It is changed
//! only through [`DashboardState::apply`], one [`StateUpdate`] at a time;
//! a newer update always overwrites what an older one wrote.

use serde::{Deserialize, Serialize};

use crate::push::PushEvent;
use crate::status::{ConnectionStatus, ServerStatus};
use crate::telemetry::{ApiResponse, SentFrame};
use crate::time::{Timestamp, now};

/// Something that happened to the relay, the hub, or the console.
#[derive(Debug, Clone, PartialEq)]
pub enum StateUpdate {
    /// The status poll returned an answer.
    ServerStatusObserved(ServerStatus),
    /// A start/stop command succeeded; the relay did not confirm its state.
    ControlApplied(ServerStatus),
    /// The push channel changed health.
    ConnectionChanged(ConnectionStatus),
    /// A validated push event arrived.
    Push(PushEvent),
}

/// Everything the dashboard shows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardState {
    /// Incremented on every effective change.
    pub version: u64,
    pub server_status: ServerStatus,
    pub connection_status: ConnectionStatus,
    pub last_frame: Option<SentFrame>,
    pub last_response: Option<ApiResponse>,
    pub updated_at: Option<Timestamp>,
}

impl DashboardState {
    /// Apply one update, returning `true` when the state changed.
    ///
    /// Push events never touch `server_status`.
    pub fn apply(&mut self, update: StateUpdate) -> bool {
        let changed = match update {
            StateUpdate::ServerStatusObserved(status) | StateUpdate::ControlApplied(status) => {
                replace(&mut self.server_status, status)
            }
            StateUpdate::ConnectionChanged(status) => replace(&mut self.connection_status, status),
            StateUpdate::Push(PushEvent::FrameSent(frame)) => {
                self.last_frame = Some(frame);
                true
            }
            StateUpdate::Push(PushEvent::ResponseReceived(response)) => {
                self.last_response = Some(response);
                true
            }
        };
        if changed {
            self.version += 1;
            self.updated_at = Some(now());
        }
        changed
    }
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}
