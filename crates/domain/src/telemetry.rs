//! Telemetry records mirrored from the relay.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::time::Timestamp;

/// The most recent GPS frame forwarded by the relay.
///
/// An open record: `timestamp` plus whatever the device reported
/// (latitude, longitude, speed, …).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SentFrame(Map<String, Value>);

impl SentFrame {
    /// Merge the outer timestamp and the device fields into one record.
    ///
    /// Device fields are applied after the timestamp, so a `timestamp` key
    /// inside `data` wins.
    #[must_use]
    pub fn merge(timestamp: String, data: Map<String, Value>) -> Self {
        let mut fields = Map::with_capacity(data.len() + 1);
        fields.insert("timestamp".to_string(), Value::String(timestamp));
        fields.extend(data);
        Self(fields)
    }

    /// The frame's timestamp when it is a string.
    #[must_use]
    pub fn timestamp(&self) -> Option<&str> {
        self.0.get("timestamp").and_then(Value::as_str)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    #[must_use]
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// The most recent answer the upstream API gave to a forwarded frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    /// Timestamp reported alongside the response.
    pub timestamp: String,
    /// Response body as relayed.
    pub body: Value,
    /// When this console received the event.
    pub received_at: Timestamp,
}
