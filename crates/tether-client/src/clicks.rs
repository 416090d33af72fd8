//! Click relay
//!
//! Binds every `input[type=button]` element so that activating it sends an
//! `onclick` notification to the control server. Fire-and-forget: no response
//! handling, no retry.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

use tether_protocol::Envelope;

use crate::transport;

/// Bind all button-type inputs in `document` to the click relay.
///
/// Returns the number of elements bound. Each binding lives for the lifetime
/// of the page, so the closures are intentionally leaked.
pub fn bind_buttons(document: &Document, endpoint: &str) -> Result<u32, JsValue> {
    let buttons = document.query_selector_all("input[type=button]")?;

    let mut bound = 0;
    for i in 0..buttons.length() {
        let Some(node) = buttons.item(i) else {
            continue;
        };
        let Ok(element) = node.dyn_into::<HtmlElement>() else {
            continue;
        };

        let element_id = element.id();
        let endpoint = endpoint.to_string();
        let handler = Closure::wrap(Box::new(move || {
            transport::post_forget(endpoint.clone(), Envelope::click(&element_id));
        }) as Box<dyn FnMut()>);

        element.set_onclick(Some(handler.as_ref().unchecked_ref()));
        handler.forget();
        bound += 1;
    }

    Ok(bound)
}
