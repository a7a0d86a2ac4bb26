//! Default synchronization collaborator: an opaque per-pad relay.
//!
//! Frames are fanned out to every other peer connected to the same pad
//! without interpreting their contents; merge semantics live entirely in
//! the clients.

mod room;

pub use room::PadRoom;

use async_trait::async_trait;
use axum::body::Body;
use axum::extract::FromRequestParts;
use axum::extract::ws::WebSocketUpgrade;
use axum::http::Request;
use axum::response::{IntoResponse, Response};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::collab::SyncCollaborator;

/// Relay activity snapshot for the status endpoint.
#[derive(Debug, Clone, Default)]
pub struct RelayStats {
    pub active_pads: usize,
    pub active_connections: usize,
}

/// Global relay state managing all pad rooms.
#[derive(Clone, Default)]
pub struct BroadcastRelay {
    /// Map of pad_id to its room
    rooms: Arc<RwLock<HashMap<String, Arc<PadRoom>>>>,
}

impl BroadcastRelay {
    /// Create a new relay with no rooms.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create the room for a pad.
    pub async fn get_or_create_room(&self, pad_id: &str) -> Arc<PadRoom> {
        {
            let rooms = self.rooms.read().await;
            if let Some(room) = rooms.get(pad_id) {
                return room.clone();
            }
        }

        let mut rooms = self.rooms.write().await;

        // Double-check after acquiring the write lock
        if let Some(room) = rooms.get(pad_id) {
            return room.clone();
        }

        let room = Arc::new(PadRoom::new(pad_id));
        rooms.insert(pad_id.to_string(), room.clone());
        info!("Created relay room for pad: {}", pad_id);

        room
    }

    /// Remove a room once it has no active connections.
    pub async fn maybe_remove_room(&self, pad_id: &str) {
        let mut rooms = self.rooms.write().await;
        if let Some(room) = rooms.get(pad_id) {
            if room.connection_count() == 0 {
                rooms.remove(pad_id);
                info!("Removed idle relay room for pad: {}", pad_id);
            }
        }
    }

    /// Snapshot of relay activity.
    pub async fn stats(&self) -> RelayStats {
        let rooms = self.rooms.read().await;
        RelayStats {
            active_pads: rooms.len(),
            active_connections: rooms.values().map(|r| r.connection_count()).sum(),
        }
    }
}

#[async_trait]
impl SyncCollaborator for BroadcastRelay {
    async fn handle_upgrade(&self, pad_id: &str, request: Request<Body>) -> Response {
        let (mut parts, _body) = request.into_parts();
        let ws = match WebSocketUpgrade::from_request_parts(&mut parts, &()).await {
            Ok(ws) => ws,
            Err(rejection) => {
                warn!("Request for pad {} is not a WebSocket handshake", pad_id);
                return rejection.into_response();
            }
        };

        let relay = self.clone();
        let pad_id = pad_id.to_string();
        ws.on_upgrade(move |socket| async move {
            let room = relay.get_or_create_room(&pad_id).await;
            room.run(socket).await;
            relay.maybe_remove_room(&pad_id).await;
        })
        .into_response()
    }
}
