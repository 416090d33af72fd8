//! Transport helpers
//!
//! JSON over HTTP on top of the browser fetch API. One request, one awaited
//! JSON reply, no retry; failures propagate to the caller as
//! [`TransportError`].

use serde_json::Value;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{Request, RequestInit, Response};

use tether_protocol::Envelope;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

/// Errors from the fetch path.
#[derive(Clone, Debug, thiserror::Error)]
pub enum TransportError {
    /// No `window` global (not running in a browser page).
    #[error("no window")]
    NoWindow,

    /// Building the request failed.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The fetch itself failed (network error, CORS, aborted navigation).
    #[error("fetch failed: {0}")]
    Fetch(String),

    /// The response body could not be read or was not valid JSON.
    #[error("bad response body: {0}")]
    Body(String),
}

fn js_err(value: JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value))
}

/// POST `envelope` as a JSON body to `url` and return the JSON-decoded
/// response.
pub async fn post_json(url: &str, envelope: &Envelope) -> Result<Value, TransportError> {
    let body = envelope
        .encode()
        .map_err(|e| TransportError::BadRequest(e.to_string()))?;
    let text = request_text(url, Some(&body)).await?;
    serde_json::from_str(&text).map_err(|e| TransportError::Body(e.to_string()))
}

/// GET `url` and return the JSON-decoded response body.
pub async fn get_json(url: &str) -> Result<Value, TransportError> {
    let text = request_text(url, None).await?;
    serde_json::from_str(&text).map_err(|e| TransportError::Body(e.to_string()))
}

/// POST an envelope fire-and-forget: the response is ignored, a failure is
/// logged and not retried.
pub(crate) fn post_forget(url: String, envelope: Envelope) {
    spawn_local(async move {
        if let Err(err) = post_json(&url, &envelope).await {
            log(&format!(
                "[transport] fire-and-forget POST to {} failed: {}",
                url, err
            ));
        }
    });
}

async fn request_text(url: &str, body: Option<&str>) -> Result<String, TransportError> {
    let opts = RequestInit::new();
    match body {
        Some(body) => {
            opts.set_method("POST");
            opts.set_body(&JsValue::from_str(body));
        }
        None => opts.set_method("GET"),
    }

    let request = Request::new_with_str_and_init(url, &opts)
        .map_err(|e| TransportError::BadRequest(js_err(e)))?;
    if body.is_some() {
        request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(|e| TransportError::BadRequest(js_err(e)))?;
    }

    let window = web_sys::window().ok_or(TransportError::NoWindow)?;
    let response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| TransportError::Fetch(js_err(e)))?;
    let response: Response = response
        .dyn_into()
        .map_err(|e| TransportError::Fetch(js_err(e)))?;

    let text_promise = response
        .text()
        .map_err(|e| TransportError::Body(js_err(e)))?;
    let text = JsFuture::from(text_promise)
        .await
        .map_err(|e| TransportError::Body(js_err(e)))?;
    text.as_string()
        .ok_or_else(|| TransportError::Body("response body is not text".into()))
}
