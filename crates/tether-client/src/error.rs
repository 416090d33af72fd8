//! Client error types.

use tether_protocol::ProtocolError;

use crate::transport::TransportError;

/// Errors that can end a single poll iteration.
///
/// The loop driver is the error boundary: these are logged to the console and
/// the next iteration is scheduled regardless.
#[derive(Clone, Debug, thiserror::Error)]
pub enum ClientError {
    /// The poll request failed or returned a non-JSON body.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The reply did not match the envelope contract.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// The browser environment is missing a required global.
    #[error("browser environment missing: {0}")]
    Environment(&'static str),
}
