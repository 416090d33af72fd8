//! Reply interpretation
//!
//! Turns a server reply into the one thing the poll loop should do this
//! iteration, and decides whether a follow-up is owed.

use serde_json::Value;

use crate::command::Command;
use crate::envelope::{topic, Envelope};
use crate::error::ProtocolError;

/// What a poll reply asks the client to do.
#[derive(Clone, Debug, PartialEq)]
pub enum Directive {
    /// Run a command from the closed set.
    Run(Command),
    /// Replace the poll interval with this many milliseconds.
    UpdateInterval(u32),
    /// Nothing to do; unrecognized topics land here.
    Ignore,
}

impl Directive {
    /// Interpret a poll reply.
    ///
    /// Errors mean the reply named a known topic but carried an
    /// out-of-contract payload; the caller logs and treats the iteration as
    /// a no-op.
    pub fn from_reply(reply: &Envelope) -> Result<Self, ProtocolError> {
        match reply.topic.as_str() {
            topic::COMMAND => Ok(Directive::Run(Command::from_payload(&reply.payload)?)),
            topic::UPDATE_INTERVAL => {
                let ms = reply
                    .payload
                    .as_f64()
                    .ok_or(ProtocolError::NonNumericInterval)?;
                if !ms.is_finite() || ms < 1.0 || ms > u32::MAX as f64 {
                    return Err(ProtocolError::IntervalOutOfRange(ms));
                }
                Ok(Directive::UpdateInterval(ms as u32))
            }
            _ => Ok(Directive::Ignore),
        }
    }
}

/// The follow-up envelope owed for a reply, if any.
///
/// At most one follow-up per iteration, only when the server asked for it,
/// echoing the reply's `topic` and `id` and carrying the action result (null
/// when the action produced nothing).
pub fn follow_up(reply: &Envelope, result: Option<Value>) -> Option<Envelope> {
    if !reply.should_respond {
        return None;
    }
    Some(Envelope::reply_to(reply, result.unwrap_or(Value::Null)))
}
