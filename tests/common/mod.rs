#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::Router;
use serde_json::Value;

/// A request seen by a stub server.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub body: Value,
    pub authorization: Option<String>,
}

pub type Captured = Arc<Mutex<Vec<CapturedRequest>>>;

#[derive(Clone)]
struct CannedState {
    captured: Captured,
    status: StatusCode,
    body: String,
    delay: Duration,
}

/// Serve `router` on an ephemeral localhost port and return its base URL.
pub async fn spawn_stub(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub listener");
    let addr = listener.local_addr().expect("stub address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("stub server");
    });
    format!("http://{addr}")
}

/// Serve a fixed status and raw body for every POST to `path`, recording
/// each request.
pub async fn spawn_canned(path: &str, status: u16, body: &str) -> (String, Captured) {
    spawn_delayed(path, status, body, Duration::ZERO).await
}

/// Like [`spawn_canned`], but each reply is held back for `delay`.
pub async fn spawn_delayed(
    path: &str,
    status: u16,
    body: &str,
    delay: Duration,
) -> (String, Captured) {
    let captured = Captured::default();
    let state = CannedState {
        captured: captured.clone(),
        status: StatusCode::from_u16(status).expect("valid status"),
        body: body.to_string(),
        delay,
    };
    let router = Router::new().route(path, post(canned)).with_state(state);
    (spawn_stub(router).await, captured)
}

async fn canned(
    State(state): State<CannedState>,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, String) {
    let parsed = serde_json::from_str(&body).unwrap_or(Value::Null);
    let authorization = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    state.captured.lock().unwrap().push(CapturedRequest {
        body: parsed,
        authorization,
    });
    if !state.delay.is_zero() {
        tokio::time::sleep(state.delay).await;
    }
    (state.status, state.body.clone())
}

/// A base URL nothing is listening on.
pub async fn closed_port_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind probe listener");
    let addr = listener.local_addr().expect("probe address");
    drop(listener);
    format!("http://{addr}")
}

/// Wrap a chat reply in an OpenAI chat-completions response body.
pub fn completion_body(content: &str) -> String {
    serde_json::json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 1, "completion_tokens": 1, "total_tokens": 2 }
    })
    .to_string()
}
