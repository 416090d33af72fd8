//! Message envelope
//!
//! JSON encoding/decoding for the single message shape used by every request
//! and reply.

use alloc::string::{String, ToString};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::ProtocolError;

/// Correlation id used for client-originated messages that need no
/// correlation.
pub const ORIGIN_ID: i64 = -1;

/// Topic tags understood by the client and the control server.
pub mod topic {
    /// Click-relay notification (client → server).
    pub const ONCLICK: &str = "onclick";
    /// Poll request asking the server for the next command (client → server).
    pub const COMMAND_LOOP: &str = "command_loop";
    /// Reply carrying a member of the closed command set (server → client).
    pub const COMMAND: &str = "command";
    /// Reply replacing the client's poll interval (server → client).
    pub const UPDATE_INTERVAL: &str = "update_interval";
    /// Reply carrying nothing to do (server → client).
    pub const IDLE: &str = "idle";
}

/// The message envelope.
///
/// Used uniformly for requests and replies. `should_respond` is meaningful
/// only on server replies to the poll loop; client-originated envelopes omit
/// it on the wire.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// String tag selecting behavior.
    pub topic: String,
    /// Numeric correlation identifier; [`ORIGIN_ID`] when the client
    /// originates the message and does not need correlation.
    pub id: i64,
    /// Arbitrary JSON value, meaning defined entirely by `topic`.
    #[serde(default)]
    pub payload: Value,
    /// Whether the client must send a follow-up carrying the action result.
    #[serde(default, skip_serializing_if = "is_false")]
    pub should_respond: bool,
}

fn is_false(v: &bool) -> bool {
    !*v
}

impl Envelope {
    /// Client-originated notification: `id` is [`ORIGIN_ID`], no response
    /// expected.
    pub fn notification(topic: &str, payload: Value) -> Self {
        Self {
            topic: topic.to_string(),
            id: ORIGIN_ID,
            payload,
            should_respond: false,
        }
    }

    /// The poll request sent at every loop iteration.
    pub fn poll() -> Self {
        Self::notification(topic::COMMAND_LOOP, Value::Null)
    }

    /// The click-relay notification for the element with the given id.
    pub fn click(element_id: &str) -> Self {
        Self::notification(topic::ONCLICK, json!({ "id": element_id }))
    }

    /// The server's "nothing to do" reply to a poll.
    pub fn idle() -> Self {
        Self::notification(topic::IDLE, Value::Null)
    }

    /// Follow-up reply echoing this envelope's `topic` and `id`, carrying the
    /// action result (or null).
    pub fn reply_to(reply: &Envelope, result: Value) -> Self {
        Self {
            topic: reply.topic.clone(),
            id: reply.id,
            payload: result,
            should_respond: false,
        }
    }

    /// Encode to a JSON string for the wire.
    pub fn encode(&self) -> Result<String, ProtocolError> {
        serde_json::to_string(self).map_err(|e| ProtocolError::MalformedEnvelope(e.to_string()))
    }

    /// Decode from a JSON string.
    pub fn decode(body: &str) -> Result<Self, ProtocolError> {
        serde_json::from_str(body).map_err(|e| ProtocolError::MalformedEnvelope(e.to_string()))
    }

    /// Decode from an already-parsed JSON value.
    pub fn from_value(value: Value) -> Result<Self, ProtocolError> {
        serde_json::from_value(value).map_err(|e| ProtocolError::MalformedEnvelope(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_notification_shape() {
        let env = Envelope::click("b1");
        assert_eq!(env.topic, topic::ONCLICK);
        assert_eq!(env.id, ORIGIN_ID);
        assert_eq!(env.payload, json!({ "id": "b1" }));
        assert!(!env.should_respond);
    }

    #[test]
    fn test_client_envelopes_omit_should_respond_on_wire() {
        let encoded = Envelope::poll().encode().unwrap();
        assert!(!encoded.contains("should_respond"));
        assert!(encoded.contains("\"command_loop\""));
        assert!(encoded.contains("\"id\":-1"));
    }

    #[test]
    fn test_decode_server_reply() {
        let body = r#"{"topic":"update_interval","id":7,"payload":500,"should_respond":false}"#;
        let env = Envelope::decode(body).unwrap();
        assert_eq!(env.topic, topic::UPDATE_INTERVAL);
        assert_eq!(env.id, 7);
        assert_eq!(env.payload, json!(500));
        assert!(!env.should_respond);
    }

    #[test]
    fn test_missing_fields_default() {
        // A reply may omit payload and should_respond entirely.
        let env = Envelope::decode(r#"{"topic":"idle","id":-1}"#).unwrap();
        assert_eq!(env.payload, Value::Null);
        assert!(!env.should_respond);
    }

    #[test]
    fn test_decode_rejects_non_envelope_json() {
        assert!(Envelope::decode("{}").is_err());
        assert!(Envelope::decode("not json").is_err());
    }

    #[test]
    fn test_reply_echoes_topic_and_id() {
        let incoming = Envelope {
            topic: "command".into(),
            id: 42,
            payload: json!({"op": "ping"}),
            should_respond: true,
        };
        let reply = Envelope::reply_to(&incoming, json!("pong"));
        assert_eq!(reply.topic, "command");
        assert_eq!(reply.id, 42);
        assert_eq!(reply.payload, json!("pong"));
        assert!(!reply.should_respond);
    }

    #[test]
    fn test_round_trip() {
        let env = Envelope {
            topic: "command".into(),
            id: 3,
            payload: json!({"op": "set_text", "id": "status", "text": "ok"}),
            should_respond: true,
        };
        let decoded = Envelope::decode(&env.encode().unwrap()).unwrap();
        assert_eq!(decoded, env);
    }
}
