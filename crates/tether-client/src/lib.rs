//! Browser-side remote-control client
//!
//! This crate compiles to WebAssembly and runs on the page's event loop. It
//! wires button clicks to server notifications and drives the poll loop that
//! asks the control server for work.
//!
//! ## Module Structure
//!
//! - `transport` - JSON-over-HTTP helpers on top of the browser fetch API
//! - `clicks` - binds `input[type=button]` elements to the click relay
//! - `commands` - executes the closed command set against the DOM
//! - `poll` - the poll session and its loop
//! - `config` - client configuration builder
//!
//! ## Architecture
//!
//! Everything runs as one logical task on the browser event loop:
//!
//! ```text
//! boot()
//!   ├── bind clicks ──► onclick ──► POST {topic:"onclick"}   (fire-and-forget)
//!   └── spawn poll loop
//!         loop:
//!           POST {topic:"command_loop"} ──► reply
//!           interpret reply topic ──► run command / update interval / ignore
//!           if reply.should_respond ──► POST result           (fire-and-forget)
//!           sleep(current interval)
//! ```
//!
//! A failed iteration is logged and dropped; the next one is scheduled
//! regardless. There are no retries and no backoff.

mod clicks;
mod commands;
mod config;
mod error;
mod poll;
mod transport;

pub use clicks::bind_buttons;
pub use commands::execute;
pub use config::{ClientConfig, DEFAULT_POLL_INTERVAL_MS};
pub use error::ClientError;
pub use poll::PollSession;
pub use transport::{get_json, post_json, TransportError};

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

/// Start the client against the current page address with the default poll
/// interval. Called from the page's bootstrap script after module init.
#[wasm_bindgen]
pub fn boot() -> Result<(), JsValue> {
    boot_client(ClientConfig::new())
}

/// Start the client with an explicit endpoint and poll interval.
#[wasm_bindgen]
pub fn boot_with(endpoint: String, interval_ms: u32) -> Result<(), JsValue> {
    boot_client(
        ClientConfig::new()
            .with_endpoint(endpoint)
            .with_interval_ms(interval_ms),
    )
}

fn boot_client(config: ClientConfig) -> Result<(), JsValue> {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    let session = PollSession::new(config).map_err(|e| JsValue::from_str(&e.to_string()))?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let bound = bind_buttons(&document, session.endpoint())?;

    log(&format!(
        "[client] booted: {} buttons bound, polling {} every {}ms",
        bound,
        session.endpoint(),
        session.interval_ms()
    ));

    spawn_local(session.run());
    Ok(())
}
