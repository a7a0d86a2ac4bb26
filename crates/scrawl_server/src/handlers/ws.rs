//! Access gate for realtime channel upgrades.

use crate::auth::{self, AUTH_COOKIE};
use crate::collab::SyncCollaborator;
use crate::config::Config;
use axum::{
    Router,
    body::Body,
    extract::{Path, State},
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
};
use axum_extra::extract::CookieJar;
use std::sync::Arc;
use tracing::{debug, warn};

/// Shared state for the sync gate.
#[derive(Clone)]
pub struct GateState {
    pub config: Arc<Config>,
    pub sync: Arc<dyn SyncCollaborator>,
}

/// Create the gated sync routes.
pub fn sync_routes(state: GateState) -> Router {
    Router::new()
        .route("/sync/{pad_id}", any(sync_gate))
        .with_state(state)
}

/// Gate in front of the synchronization collaborator.
///
/// Extracts the `auth` cookie and verifies it against the requested pad
/// before the upgrade request is forwarded. Rejections are terminal for
/// the attempt and all look the same from the outside; the client
/// re-acquires a credential through the pad entry route.
async fn sync_gate(
    State(state): State<GateState>,
    Path(pad_id): Path<String>,
    request: Request<Body>,
) -> Response {
    if pad_id.trim().is_empty() {
        return (StatusCode::BAD_REQUEST, "Missing pad id").into_response();
    }

    let jar = CookieJar::from_headers(request.headers());
    let Some(cookie) = jar.get(AUTH_COOKIE) else {
        warn!("Upgrade rejected for pad {}: no credential cookie", pad_id);
        return (StatusCode::UNAUTHORIZED, "Unauthorized").into_response();
    };

    if !auth::authorize(&pad_id, cookie.value(), &state.config.signing_key) {
        warn!("Upgrade rejected for pad {}: invalid credential", pad_id);
        return (StatusCode::UNAUTHORIZED, "Unauthorized").into_response();
    }

    debug!("Upgrade authorized for pad {}", pad_id);
    state.sync.handle_upgrade(&pad_id, request).await
}
