//! Axum router for the HTTP/JSON-RPC transport.
//! Routes: `POST /rpc` (requests), `GET /health` (liveness), `GET /health/ready` (readiness).

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use tenon_dispatch::Dispatcher;

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState {
    /// The RPC request dispatcher.
    pub dispatcher: Arc<Dispatcher>,
}

/// Builds the axum `Router` with all RPC routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/rpc", post(handle_rpc))
        .route("/health", get(handle_health))
        .route("/health/ready", get(handle_ready))
        .with_state(state)
}

async fn handle_health() -> impl IntoResponse {
    Json(json!({"status": "ok", "service": "tenon"}))
}

/// Readiness probe — returns `200 OK` once the server is accepting requests.
async fn handle_ready() -> impl IntoResponse {
    Json(json!({"status": "ready", "service": "tenon"}))
}

/// Feeds the request body to the dispatcher and returns its bytes
/// verbatim. JSON-RPC-level failures (parse errors included) are whole
/// responses in their own right, so the HTTP status is always 200.
async fn handle_rpc(State(state): State<AppState>, body: Bytes) -> impl IntoResponse {
    let response = state.dispatcher.handle_bytes(&body).await;
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        response,
    )
}
