//! Collaborator seams.
//!
//! The realtime merge engine and the editor document are external
//! collaborators; the server reaches them only through these two entry
//! points and never looks inside their payloads.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::Request;
use axum::response::{Html, IntoResponse, Response};

/// Entry point into the realtime synchronization engine.
#[async_trait]
pub trait SyncCollaborator: Send + Sync {
    /// Take over an upgrade request for a pad.
    ///
    /// Called only after the access gate has authorized the request; the
    /// request is handed over unmodified.
    async fn handle_upgrade(&self, pad_id: &str, request: Request<Body>) -> Response;
}

/// Asset collaborator serving the editor document.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Produce the document returned on the non-upgrade pad path.
    async fn fetch_document(&self, request: Request<Body>) -> Response;
}

/// Serves the editor page bundled into the binary.
pub struct EmbeddedDocument;

#[async_trait]
impl DocumentStore for EmbeddedDocument {
    async fn fetch_document(&self, _request: Request<Body>) -> Response {
        Html(include_str!("../assets/editor.html")).into_response()
    }
}
