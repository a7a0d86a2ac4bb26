//! Server status endpoint.

use crate::sync::BroadcastRelay;
use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

/// Server status response
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
    pub version: String,
    pub active_pads: usize,
    pub active_connections: usize,
}

/// Create the status routes.
pub fn status_routes(relay: BroadcastRelay) -> Router {
    Router::new()
        .route("/status", get(get_status))
        .with_state(relay)
}

async fn get_status(State(relay): State<BroadcastRelay>) -> Json<StatusResponse> {
    let stats = relay.stats().await;
    Json(StatusResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        active_pads: stats.active_pads,
        active_connections: stats.active_connections,
    })
}
