//! Wire protocol for the tether remote-control client
//!
//! This crate defines the JSON message envelope exchanged with the control
//! server, the closed set of commands the client will execute, and the rules
//! for turning a server reply into client behavior.
//!
//! # Architecture
//!
//! Every message, in either direction, is the same envelope shape:
//!
//! ```text
//! Browser client                          Control server
//!       │                                       │
//!       │  {topic:"onclick", id:-1, ...}        │
//!       ├──────────────────────────────────────►│   click relay
//!       │                                       │
//!       │  {topic:"command_loop", id:-1}        │
//!       ├──────────────────────────────────────►│   poll
//!       │  {topic, id, payload,                 │
//!       │   should_respond}                     │
//!       │◄──────────────────────────────────────┤   reply
//!       │                                       │
//!       │  {topic, id, payload: result}         │
//!       ├──────────────────────────────────────►│   follow-up (if requested)
//! ```
//!
//! The reply's `topic` selects a [`Directive`]: run a [`Command`], update the
//! poll interval, or do nothing. Commands are a closed, named set; there is
//! no "execute this string" escape hatch.
//!
//! Everything here is pure data and decision logic; the browser side lives in
//! `tether-client`.

#![no_std]

extern crate alloc;

mod command;
mod directive;
mod envelope;
mod error;

pub use command::Command;
pub use directive::{follow_up, Directive};
pub use envelope::{topic, Envelope, ORIGIN_ID};
pub use error::ProtocolError;
