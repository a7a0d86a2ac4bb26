//! Pad entry point: identifier assignment and credential issuance.

use crate::auth;
use crate::collab::DocumentStore;
use crate::config::Config;
use crate::pad_id;
use axum::{
    Router,
    body::Body,
    extract::{Query, State},
    http::{HeaderValue, Request, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info};

/// Shared state for the pad entry handlers.
#[derive(Clone)]
pub struct PadState {
    pub config: Arc<Config>,
    pub documents: Arc<dyn DocumentStore>,
}

/// Query parameters for the pad entry route.
#[derive(Debug, Deserialize)]
pub struct PadQuery {
    /// Pad id; a fresh one is assigned via redirect when absent.
    pub id: Option<String>,
}

/// Create the pad entry routes.
pub fn pad_routes(state: PadState) -> Router {
    Router::new()
        .route("/", get(pad_handler))
        .route("/e", get(pad_handler))
        .with_state(state)
}

/// `GET /` and `GET /e`: assign a pad id when missing, otherwise issue a
/// credential for it and return the editor document with the credential
/// attached as a cookie.
async fn pad_handler(
    State(state): State<PadState>,
    Query(query): Query<PadQuery>,
    request: Request<Body>,
) -> Response {
    let Some(pad_id) = query.id else {
        let location = format!("/e?id={}", pad_id::generate());
        return (StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)]).into_response();
    };

    if pad_id.trim().is_empty() {
        return (StatusCode::BAD_REQUEST, "Missing pad id").into_response();
    }

    let token = match auth::issue(&pad_id, &state.config.signing_key) {
        Ok(t) => t,
        Err(e) => {
            error!("Failed to issue credential for pad {}: {}", pad_id, e);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let cookie = auth::build_auth_cookie(&token, state.config.delivery_policy());
    let cookie = match HeaderValue::from_str(&cookie) {
        Ok(v) => v,
        Err(e) => {
            error!("Unrepresentable cookie header for pad {}: {}", pad_id, e);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    info!("Issued credential for pad {}", pad_id);

    let mut response = state.documents.fetch_document(request).await;
    response.headers_mut().insert(header::SET_COOKIE, cookie);
    response
}
