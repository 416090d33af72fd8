//! Poll loop
//!
//! The one stateful piece of the client. A `PollSession` owns the endpoint
//! and the current interval and is threaded through the loop task; there is
//! no module-global state.

use serde_json::Value;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use tether_protocol::{follow_up, Directive, Envelope};

use crate::commands;
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::transport;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

/// State for the poll loop: the control endpoint and the current interval.
pub struct PollSession {
    endpoint: String,
    interval_ms: u32,
}

impl PollSession {
    /// Build a session from config, resolving the default endpoint to the
    /// current page address.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let endpoint = match config.endpoint {
            Some(endpoint) => endpoint,
            None => web_sys::window()
                .ok_or(ClientError::Environment("window"))?
                .location()
                .href()
                .map_err(|_| ClientError::Environment("location.href"))?,
        };
        Ok(Self {
            endpoint,
            interval_ms: config.interval_ms,
        })
    }

    /// The control endpoint this session polls.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The current poll interval in milliseconds.
    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    /// Run the loop for the lifetime of the page.
    ///
    /// Each iteration polls once, then sleeps the current interval,
    /// regardless of the iteration's outcome. A hung request delays the next
    /// iteration rather than overlapping it.
    pub async fn run(mut self) {
        loop {
            if let Err(err) = self.poll_once().await {
                log(&format!("[poll] iteration failed: {}", err));
            }
            sleep_ms(self.interval_ms).await;
        }
    }

    /// One poll iteration: send the request, interpret the reply, send the
    /// follow-up if the server asked for one.
    async fn poll_once(&mut self) -> Result<(), ClientError> {
        let value = transport::post_json(&self.endpoint, &Envelope::poll()).await?;
        let reply = Envelope::from_value(value)?;

        let result = self.apply(&reply);
        if let Some(envelope) = follow_up(&reply, result) {
            transport::post_forget(self.endpoint.clone(), envelope);
        }
        Ok(())
    }

    /// Interpret a poll reply against this session and return the action
    /// result. Commands run against the current document; `update_interval`
    /// mutates this session; anything else is a no-op.
    pub fn apply(&mut self, reply: &Envelope) -> Option<Value> {
        match Directive::from_reply(reply) {
            Ok(Directive::Run(command)) => match web_sys::window().and_then(|w| w.document()) {
                Some(document) => commands::execute(&document, &command),
                None => {
                    log("[poll] no document to run command against");
                    None
                }
            },
            Ok(Directive::UpdateInterval(ms)) => {
                log(&format!(
                    "[poll] interval {}ms -> {}ms",
                    self.interval_ms, ms
                ));
                self.interval_ms = ms;
                None
            }
            Ok(Directive::Ignore) => None,
            Err(err) => {
                log(&format!(
                    "[poll] bad reply for topic '{}': {}",
                    reply.topic, err
                ));
                None
            }
        }
    }
}

/// Resolve after `ms` milliseconds on the browser event loop.
async fn sleep_ms(ms: u32) {
    // setTimeout takes an i32 delay
    let delay = ms.min(i32::MAX as u32) as i32;
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        if let Some(window) = web_sys::window() {
            let _ =
                window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, delay);
        }
    });
    let _ = JsFuture::from(promise).await;
}
