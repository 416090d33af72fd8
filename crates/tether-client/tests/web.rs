//! Browser-side behavior tests
//!
//! Run with `wasm-pack test --headless --chrome crates/tether-client`.

#![cfg(target_arch = "wasm32")]

use serde_json::{json, Value};
use wasm_bindgen_test::*;
use web_sys::Document;

use tether_client::{bind_buttons, execute, ClientConfig, PollSession};
use tether_protocol::{follow_up, Command, Envelope};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

/// Create an element, give it an id, and attach it to the body.
fn attach(tag: &str, id: &str) -> web_sys::Element {
    let document = document();
    let element = document.create_element(tag).unwrap();
    element.set_id(id);
    document.body().unwrap().append_child(&element).unwrap();
    element
}

#[wasm_bindgen_test]
fn set_text_then_read_text() {
    attach("div", "status-a");

    let set = Command::SetText {
        id: "status-a".into(),
        text: "armed".into(),
    };
    assert_eq!(execute(&document(), &set), None);

    let read = Command::ReadText {
        id: "status-a".into(),
    };
    assert_eq!(
        execute(&document(), &read),
        Some(Value::String("armed".into()))
    );
}

#[wasm_bindgen_test]
fn read_value_returns_input_value() {
    let input = attach("input", "field-a");
    input.set_attribute("value", "42").unwrap();

    let read = Command::ReadValue {
        id: "field-a".into(),
    };
    assert_eq!(execute(&document(), &read), Some(Value::String("42".into())));
}

#[wasm_bindgen_test]
fn set_image_data_builds_data_url() {
    let img = attach("img", "img-a");

    let cmd = Command::SetImageData {
        id: "img-a".into(),
        data: "aGVsbG8=".into(),
        format: "png".into(),
    };
    assert_eq!(execute(&document(), &cmd), None);
    assert_eq!(
        img.get_attribute("src").unwrap(),
        "data:image/png;base64,aGVsbG8="
    );
}

#[wasm_bindgen_test]
fn missing_element_yields_null_result() {
    let read = Command::ReadText {
        id: "does-not-exist".into(),
    };
    assert_eq!(execute(&document(), &read), None);

    let set = Command::SetText {
        id: "does-not-exist".into(),
        text: "x".into(),
    };
    assert_eq!(execute(&document(), &set), None);
}

#[wasm_bindgen_test]
fn ping_produces_pong() {
    assert_eq!(
        execute(&document(), &Command::Ping),
        Some(Value::String("pong".into()))
    );
}

#[wasm_bindgen_test]
fn bind_buttons_binds_only_button_inputs() {
    let button = attach("input", "b1");
    button.set_attribute("type", "button").unwrap();
    let text = attach("input", "t1");
    text.set_attribute("type", "text").unwrap();

    let bound = bind_buttons(&document(), "http://localhost:0/").unwrap();
    assert!(bound >= 1);

    use wasm_bindgen::JsCast;
    let button: web_sys::HtmlElement = button.dyn_into().unwrap();
    assert!(button.onclick().is_some());
    let text: web_sys::HtmlElement = text.dyn_into().unwrap();
    assert!(text.onclick().is_none());
}

#[wasm_bindgen_test]
fn update_interval_reply_reschedules_and_sends_no_follow_up() {
    // Poll loop starts with interval 100; the server replies with 500 and
    // should_respond false: the session now waits 500, and no follow-up is
    // owed.
    let mut session = PollSession::new(
        ClientConfig::new()
            .with_endpoint("http://localhost:0/")
            .with_interval_ms(100),
    )
    .unwrap();
    assert_eq!(session.interval_ms(), 100);

    let reply = Envelope {
        topic: "update_interval".into(),
        id: -1,
        payload: json!(500),
        should_respond: false,
    };
    let result = session.apply(&reply);

    assert_eq!(session.interval_ms(), 500);
    assert_eq!(result, None);
    assert_eq!(follow_up(&reply, result), None);
}

#[wasm_bindgen_test]
fn command_reply_with_should_respond_owes_one_follow_up() {
    let mut session = PollSession::new(
        ClientConfig::new().with_endpoint("http://localhost:0/"),
    )
    .unwrap();

    let reply = Envelope {
        topic: "command".into(),
        id: 11,
        payload: json!({ "op": "ping" }),
        should_respond: true,
    };
    let result = session.apply(&reply);
    assert_eq!(result, Some(Value::String("pong".into())));

    let out = follow_up(&reply, result).unwrap();
    assert_eq!(out.topic, "command");
    assert_eq!(out.id, 11);
    assert_eq!(out.payload, json!("pong"));
}

#[wasm_bindgen_test]
fn unknown_topic_changes_nothing() {
    let mut session = PollSession::new(
        ClientConfig::new()
            .with_endpoint("http://localhost:0/")
            .with_interval_ms(100),
    )
    .unwrap();

    let reply = Envelope {
        topic: "weather".into(),
        id: -1,
        payload: json!({"sky": "grey"}),
        should_respond: false,
    };
    assert_eq!(session.apply(&reply), None);
    assert_eq!(session.interval_ms(), 100);
}
