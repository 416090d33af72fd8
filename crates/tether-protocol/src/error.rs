//! Protocol error types.

use alloc::string::String;

/// Errors that can occur while decoding or interpreting envelopes.
///
/// These indicate malformed or out-of-contract messages from the server.
/// They never abort the poll loop; the client logs them and moves on.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ProtocolError {
    /// Body is not valid JSON or does not match the envelope shape.
    #[error("malformed envelope: {0}")]
    MalformedEnvelope(String),

    /// A `command` reply carried a payload that is not a known command.
    #[error("malformed command payload: {0}")]
    MalformedCommand(String),

    /// An `update_interval` reply carried a non-numeric payload.
    #[error("interval payload is not a number")]
    NonNumericInterval,

    /// An `update_interval` reply carried a zero, negative, or non-finite
    /// number of milliseconds.
    #[error("interval out of range: {0}")]
    IntervalOutOfRange(f64),
}
