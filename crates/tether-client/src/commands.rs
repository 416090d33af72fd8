//! Command execution
//!
//! Maps each member of the closed command set to a DOM handler. A command
//! that targets a missing element produces a null action result; it never
//! aborts the poll iteration.

use serde_json::Value;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlInputElement};

use tether_protocol::Command;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

/// Execute a command against `document`, returning the action result.
///
/// Mutating commands return `None`; reading commands return the value to
/// send back when the server requested a response.
pub fn execute(document: &Document, command: &Command) -> Option<Value> {
    match command {
        Command::SetText { id, text } => {
            if let Some(element) = element(document, id) {
                element.set_text_content(Some(text));
            }
            None
        }
        Command::SetImage { id, src } => {
            set_src(document, id, src);
            None
        }
        Command::SetImageData { id, .. } => {
            // data_url is Some for this variant by construction
            if let Some(url) = command.data_url() {
                set_src(document, id, &url);
            }
            None
        }
        Command::ReadText { id } => element(document, id)
            .and_then(|e| e.text_content())
            .map(Value::String),
        Command::ReadValue { id } => element(document, id)
            .and_then(|e| e.dyn_into::<HtmlInputElement>().ok())
            .map(|input| Value::String(input.value())),
        Command::Ping => Some(Value::String("pong".into())),
    }
}

fn element(document: &Document, id: &str) -> Option<Element> {
    let found = document.get_element_by_id(id);
    if found.is_none() {
        log(&format!("[commands] no element with id '{}'", id));
    }
    found
}

fn set_src(document: &Document, id: &str, src: &str) {
    if let Some(element) = element(document, id) {
        if let Err(err) = element.set_attribute("src", src) {
            log(&format!("[commands] set src on '{}' failed: {:?}", id, err));
        }
    }
}
