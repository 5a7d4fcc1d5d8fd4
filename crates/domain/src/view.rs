//! Presentation projection of the dashboard state.
//!
//! [`DashboardView`] is a pure function of a [`DashboardState`] and a
//! display offset. Button enablement is derived here and never stored.

use chrono::FixedOffset;
use serde_json::Value;

use crate::dashboard::DashboardState;
use crate::status::{ConnectionStatus, ServerStatus};
use crate::time::time_of_day;

/// Placeholder for a missing time of day.
pub const WAITING: &str = "Esperando...";
/// Placeholder for the last-frame panel.
pub const WAITING_FRAME: &str = "Esperando datos del GPS...";
/// Placeholder for the last-response panel.
pub const WAITING_RESPONSE: &str = "Esperando respuesta del servidor...";

/// Everything a dashboard page needs, already formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    pub server_status: ServerStatus,
    pub server_label: &'static str,
    pub connection_status: ConnectionStatus,
    pub connection_label: &'static str,
    pub last_frame_time: String,
    pub last_response_time: String,
    pub last_frame_json: String,
    pub last_response_json: String,
    pub start_disabled: bool,
    pub stop_disabled: bool,
    /// Whether the data-flow diagram shows moving packets.
    pub flow_active: bool,
}

impl DashboardView {
    #[must_use]
    pub fn project(state: &DashboardState, offset: FixedOffset) -> Self {
        let last_frame_time = state
            .last_frame
            .as_ref()
            .and_then(|frame| frame.timestamp())
            .map_or_else(|| WAITING.to_string(), |raw| display_time(raw, offset));
        let last_response_time = state
            .last_response
            .as_ref()
            .map_or_else(|| WAITING.to_string(), |r| display_time(&r.timestamp, offset));

        let last_frame_json = state.last_frame.as_ref().map_or_else(
            || WAITING_FRAME.to_string(),
            |frame| pretty(&Value::Object(frame.fields().clone())),
        );
        let last_response_json = state
            .last_response
            .as_ref()
            .map_or_else(|| WAITING_RESPONSE.to_string(), |r| pretty(&r.body));

        Self {
            server_status: state.server_status,
            server_label: state.server_status.label(),
            connection_status: state.connection_status,
            connection_label: state.connection_status.label(),
            last_frame_time,
            last_response_time,
            last_frame_json,
            last_response_json,
            start_disabled: state.server_status == ServerStatus::Running,
            stop_disabled: state.server_status == ServerStatus::Stopped,
            flow_active: state.server_status == ServerStatus::Running,
        }
    }
}

/// Unparseable timestamps are shown verbatim rather than hidden.
fn display_time(raw: &str, offset: FixedOffset) -> String {
    time_of_day(raw, offset).unwrap_or_else(|| raw.to_string())
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
