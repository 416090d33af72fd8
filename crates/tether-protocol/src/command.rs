//! The closed command set
//!
//! Replies with topic `command` carry one of these variants as their payload,
//! tagged by `op`. The client maps each variant to a handler; unknown or
//! malformed payloads are rejected at decode time rather than executed.

use alloc::format;
use alloc::string::{String, ToString};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ProtocolError;

/// A command the server may ask the client to run.
///
/// Mutating commands produce no action result; reading commands produce the
/// value that is sent back when the server sets `should_respond`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    /// Set an element's text content.
    SetText { id: String, text: String },

    /// Point an image element at a URL.
    SetImage { id: String, src: String },

    /// Display base64-encoded image bytes via a data URL.
    SetImageData {
        id: String,
        data: String,
        format: String,
    },

    /// Read an element's text content.
    ReadText { id: String },

    /// Read an input element's current value.
    ReadValue { id: String },

    /// Connectivity probe; always answers `"pong"`.
    Ping,
}

impl Command {
    /// Decode a command from a reply's payload.
    pub fn from_payload(payload: &Value) -> Result<Self, ProtocolError> {
        serde_json::from_value(payload.clone())
            .map_err(|e| ProtocolError::MalformedCommand(e.to_string()))
    }

    /// The `data:` URL for a [`Command::SetImageData`] payload.
    ///
    /// Only meaningful for that variant; returns `None` otherwise.
    pub fn data_url(&self) -> Option<String> {
        match self {
            Command::SetImageData { data, format, .. } => {
                Some(format!("data:image/{};base64,{}", format, data))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_set_text() {
        let cmd = Command::from_payload(&json!({
            "op": "set_text", "id": "status", "text": "armed"
        }))
        .unwrap();
        assert_eq!(
            cmd,
            Command::SetText {
                id: "status".into(),
                text: "armed".into()
            }
        );
    }

    #[test]
    fn test_decode_ping() {
        let cmd = Command::from_payload(&json!({ "op": "ping" })).unwrap();
        assert_eq!(cmd, Command::Ping);
    }

    #[test]
    fn test_unknown_op_is_rejected() {
        // The old remote-eval escape hatch must not decode.
        let err = Command::from_payload(&json!({
            "op": "eval", "code": "alert(1)"
        }))
        .unwrap_err();
        assert!(matches!(err, ProtocolError::MalformedCommand(_)));
    }

    #[test]
    fn test_missing_fields_are_rejected() {
        let err = Command::from_payload(&json!({ "op": "set_text", "id": "x" })).unwrap_err();
        assert!(matches!(err, ProtocolError::MalformedCommand(_)));
    }

    #[test]
    fn test_non_object_payload_is_rejected() {
        assert!(Command::from_payload(&json!("set_text")).is_err());
        assert!(Command::from_payload(&Value::Null).is_err());
    }

    #[test]
    fn test_data_url() {
        let cmd = Command::SetImageData {
            id: "inspection".into(),
            data: "aGVsbG8=".into(),
            format: "png".into(),
        };
        assert_eq!(
            cmd.data_url().unwrap(),
            "data:image/png;base64,aGVsbG8="
        );
        assert_eq!(Command::Ping.data_url(), None);
    }
}
