//! Development Control Server for tether
//!
//! Serves the static client bundle and plays the control-server role the
//! client expects: answers `command_loop` polls from an in-memory queue,
//! acknowledges click notifications, and records follow-up results.
//!
//! Drive it by hand:
//!
//! ```text
//! curl -d '{"topic":"command","id":-1,"payload":{"op":"ping"},"should_respond":true}' \
//!      localhost:8080/queue
//! curl localhost:8080/results
//! ```

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderValue, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tower_http::services::{ServeDir, ServeFile};

use tether_protocol::{topic, Envelope, ORIGIN_ID};

/// Queue of pending command envelopes plus the follow-up results received so
/// far. Correlation ids are assigned from a monotonic counter.
#[derive(Default)]
struct ControlState {
    queue: VecDeque<Envelope>,
    results: Vec<Envelope>,
    next_id: i64,
}

impl ControlState {
    /// Pop the oldest queued command, or the idle envelope when empty.
    fn next_command(&mut self) -> Envelope {
        self.queue.pop_front().unwrap_or_else(Envelope::idle)
    }

    /// Queue an envelope for the next poll, assigning a correlation id if the
    /// caller left the origin sentinel in place.
    fn enqueue(&mut self, mut envelope: Envelope) -> i64 {
        if envelope.id == ORIGIN_ID {
            self.next_id += 1;
            envelope.id = self.next_id;
        }
        let id = envelope.id;
        self.queue.push_back(envelope);
        id
    }

    /// Record a follow-up result.
    fn record(&mut self, envelope: Envelope) {
        self.results.push(envelope);
    }
}

type SharedState = Arc<Mutex<ControlState>>;

#[tokio::main]
async fn main() {
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let state = SharedState::default();

    println!("tether dev server listening on http://localhost:{}", port);
    println!("  POST /        control endpoint (poll, clicks, results)");
    println!("  POST /queue   queue a command for the next poll");
    println!("  GET  /results recorded follow-up results");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, router(state)).await.unwrap();
}

fn router(state: SharedState) -> Router {
    Router::new()
        .route(
            "/",
            post(control).get_service(ServeFile::new("web/index.html")),
        )
        .route("/queue", post(enqueue))
        .route("/results", get(results))
        .fallback_service(ServeDir::new("web"))
        .layer(axum::middleware::from_fn(add_headers))
        .with_state(state)
}

/// Control endpoint: dispatch on the incoming envelope's topic.
async fn control(State(state): State<SharedState>, body: String) -> Response {
    let envelope = match Envelope::decode(&body) {
        Ok(envelope) => envelope,
        Err(err) => return (StatusCode::BAD_REQUEST, err.to_string()).into_response(),
    };

    match envelope.topic.as_str() {
        topic::ONCLICK => {
            println!("[control] click: {}", envelope.payload);
            Json(json!({})).into_response()
        }
        topic::COMMAND_LOOP => {
            let next = state.lock().unwrap().next_command();
            Json(next).into_response()
        }
        _ => {
            // Anything else is a follow-up carrying an action result.
            println!(
                "[control] result for {} #{}: {}",
                envelope.topic, envelope.id, envelope.payload
            );
            state.lock().unwrap().record(envelope);
            Json(json!({})).into_response()
        }
    }
}

/// Queue a command envelope for the next poll; returns the assigned id.
async fn enqueue(State(state): State<SharedState>, body: String) -> Response {
    match Envelope::decode(&body) {
        Ok(envelope) => {
            let id = state.lock().unwrap().enqueue(envelope);
            Json(json!({ "id": id })).into_response()
        }
        Err(err) => (StatusCode::BAD_REQUEST, err.to_string()).into_response(),
    }
}

/// The follow-up results recorded so far, oldest first.
async fn results(State(state): State<SharedState>) -> Json<Vec<Envelope>> {
    Json(state.lock().unwrap().results.clone())
}

/// Fix MIME types for module scripts and wasm.
async fn add_headers(request: Request<Body>, next: axum::middleware::Next) -> Response {
    let path = request.uri().path().to_string();

    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    if path.ends_with(".js") || path.ends_with(".mjs") {
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/javascript; charset=utf-8"),
        );
    } else if path.ends_with(".wasm") {
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/wasm"),
        );
    } else if path.ends_with(".html") {
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/html; charset=utf-8"),
        );
    } else if path.ends_with(".css") {
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/css; charset=utf-8"),
        );
    }

    response
}
