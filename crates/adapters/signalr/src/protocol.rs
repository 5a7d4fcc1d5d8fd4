//! SignalR JSON hub protocol codec.
//!
//! Every record is a JSON document terminated by the ASCII record separator
//! (`0x1E`). A single websocket frame may carry several records, so framing is
//! handled here and kept independent from the transport.
//!
//! Only the message types the dashboard needs are decoded; the rest are kept
//! as [`HubFrame::Other`] so the caller can log and skip them.

use serde::Deserialize;
use serde_json::Value;

/// Terminates every record on the wire.
pub const RECORD_SEPARATOR: char = '\u{1e}';

const INVOCATION: u8 = 1;
const PING: u8 = 6;
const CLOSE: u8 = 7;

#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("record is not valid JSON")]
    Json(#[from] serde_json::Error),

    #[error("invocation without a target")]
    MissingTarget,
}

/// A decoded hub record.
#[derive(Debug, Clone, PartialEq)]
pub enum HubFrame {
    Invocation {
        target: String,
        arguments: Vec<Value>,
    },
    Ping,
    Close {
        error: Option<String>,
    },
    /// Any other message type (stream items, completions, acks...).
    Other(u8),
}

#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "type")]
    kind: u8,
    #[serde(default)]
    target: Option<String>,
    #[serde(default)]
    arguments: Vec<Value>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct HandshakeResponse {
    #[serde(default)]
    error: Option<String>,
}

/// Handshake selecting the JSON protocol, terminated.
#[must_use]
pub fn handshake_request() -> String {
    format!(r#"{{"protocol":"json","version":1}}{RECORD_SEPARATOR}"#)
}

/// Client keep-alive record.
#[must_use]
pub fn ping() -> String {
    format!(r#"{{"type":{PING}}}{RECORD_SEPARATOR}"#)
}

/// Graceful client-side close record.
#[must_use]
pub fn close() -> String {
    format!(r#"{{"type":{CLOSE}}}{RECORD_SEPARATOR}"#)
}

/// Split a frame into its records. Empty trailing segments are dropped.
pub fn split_records(frame: &str) -> impl Iterator<Item = &str> {
    frame
        .split(RECORD_SEPARATOR)
        .map(str::trim)
        .filter(|record| !record.is_empty())
}

/// Decode the handshake reply. `Ok(Some(reason))` means the hub refused it.
///
/// # Errors
///
/// Returns [`ProtocolError::Json`] when the reply is not a JSON object.
pub fn parse_handshake(record: &str) -> Result<Option<String>, ProtocolError> {
    let response: HandshakeResponse = serde_json::from_str(record)?;
    Ok(response.error)
}

/// Decode one record.
///
/// # Errors
///
/// Returns [`ProtocolError`] when the record is not JSON or an invocation
/// lacks its target.
pub fn parse_record(record: &str) -> Result<HubFrame, ProtocolError> {
    let raw: RawRecord = serde_json::from_str(record)?;
    Ok(match raw.kind {
        INVOCATION => HubFrame::Invocation {
            target: raw.target.ok_or(ProtocolError::MissingTarget)?,
            arguments: raw.arguments,
        },
        PING => HubFrame::Ping,
        CLOSE => HubFrame::Close { error: raw.error },
        other => HubFrame::Other(other),
    })
}
