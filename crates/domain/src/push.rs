//! Push events — typed decoding of hub invocations.
//!
//! The relay hub invokes named client methods with untyped JSON arguments.
//! Only two targets are understood; every field is validated here so that a
//! bad payload becomes a [`PayloadError`] instead of reaching the dashboard.

use serde_json::{Map, Value};

use crate::error::PayloadError;
use crate::telemetry::{ApiResponse, SentFrame};
use crate::time::Timestamp;

/// Hub method announcing a frame forwarded to the upstream API.
pub const FRAME_SENT: &str = "TramasEnviadas";

/// Hub method announcing the upstream API's response.
pub const RESPONSE_RECEIVED: &str = "RespuestaRecibida";

/// A validated push event.
#[derive(Debug, Clone, PartialEq)]
pub enum PushEvent {
    FrameSent(SentFrame),
    ResponseReceived(ApiResponse),
}

/// Outcome of decoding one hub invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum PushDecode {
    Event(PushEvent),
    /// The target is not one this console listens to.
    Ignored,
}

impl PushEvent {
    /// Decode a hub invocation.
    ///
    /// Target names are matched case-insensitively, as hub clients do.
    ///
    /// # Errors
    ///
    /// Returns a [`PayloadError`] when the first argument is missing, is not
    /// an object, or lacks a required field.
    pub fn decode(
        target: &str,
        arguments: &[Value],
        received_at: Timestamp,
    ) -> Result<PushDecode, PayloadError> {
        if target.eq_ignore_ascii_case(FRAME_SENT) {
            let payload = first_object(target, arguments)?;
            let timestamp = string_field(target, payload, "timestamp")?;
            let data = match payload.get("data") {
                None | Some(Value::Null) => {
                    return Err(PayloadError::MissingField {
                        target: target.to_string(),
                        field: "data",
                    });
                }
                Some(Value::Object(map)) => map.clone(),
                Some(_) => {
                    return Err(PayloadError::InvalidField {
                        target: target.to_string(),
                        field: "data",
                        expected: "an object",
                    });
                }
            };
            return Ok(PushDecode::Event(Self::FrameSent(SentFrame::merge(
                timestamp, data,
            ))));
        }

        if target.eq_ignore_ascii_case(RESPONSE_RECEIVED) {
            let payload = first_object(target, arguments)?;
            let timestamp = string_field(target, payload, "timestamp")?;
            let body = match payload.get("respuesta") {
                None | Some(Value::Null) => {
                    return Err(PayloadError::MissingField {
                        target: target.to_string(),
                        field: "respuesta",
                    });
                }
                Some(value) => value.clone(),
            };
            return Ok(PushDecode::Event(Self::ResponseReceived(ApiResponse {
                timestamp,
                body,
                received_at,
            })));
        }

        Ok(PushDecode::Ignored)
    }
}

fn first_object<'a>(
    target: &str,
    arguments: &'a [Value],
) -> Result<&'a Map<String, Value>, PayloadError> {
    match arguments.first() {
        None => Err(PayloadError::MissingArgument {
            target: target.to_string(),
        }),
        Some(Value::Object(map)) => Ok(map),
        Some(_) => Err(PayloadError::NotAnObject {
            target: target.to_string(),
        }),
    }
}

fn string_field(
    target: &str,
    payload: &Map<String, Value>,
    field: &'static str,
) -> Result<String, PayloadError> {
    match payload.get(field) {
        None | Some(Value::Null) => Err(PayloadError::MissingField {
            target: target.to_string(),
            field,
        }),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(PayloadError::InvalidField {
            target: target.to_string(),
            field,
            expected: "a string",
        }),
    }
}
