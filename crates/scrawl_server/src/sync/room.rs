use axum::extract::ws::{Message, WebSocket};
use futures::{SinkExt, StreamExt};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

/// Frames carry the sender's peer id so a peer never receives its own
/// frames back.
type RelayFrame = (u64, Message);

const BROADCAST_CAPACITY: usize = 256;

/// A single pad's relay room.
pub struct PadRoom {
    pad_id: String,
    broadcast_tx: broadcast::Sender<RelayFrame>,
    next_peer_id: AtomicU64,
    connections: AtomicUsize,
}

impl PadRoom {
    /// Create an empty room for a pad.
    pub fn new(pad_id: &str) -> Self {
        let (broadcast_tx, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self {
            pad_id: pad_id.to_string(),
            broadcast_tx,
            next_peer_id: AtomicU64::new(0),
            connections: AtomicUsize::new(0),
        }
    }

    /// Number of peers currently connected to this room.
    pub fn connection_count(&self) -> usize {
        self.connections.load(Ordering::SeqCst)
    }

    /// Relay frames for one peer until its socket closes.
    pub async fn run(&self, socket: WebSocket) {
        let peer_id = self.next_peer_id.fetch_add(1, Ordering::SeqCst);
        self.connections.fetch_add(1, Ordering::SeqCst);

        let mut broadcast_rx = self.broadcast_tx.subscribe();
        let (mut ws_tx, mut ws_rx) = socket.split();

        info!(
            "Peer {} joined pad {} (connections={})",
            peer_id,
            self.pad_id,
            self.connection_count()
        );

        loop {
            tokio::select! {
                // Frames from this peer
                Some(msg) = ws_rx.next() => {
                    match msg {
                        Ok(msg @ (Message::Binary(_) | Message::Text(_))) => {
                            // Fan out opaquely; frame contents belong to the
                            // sync protocol, not to this server.
                            let _ = self.broadcast_tx.send((peer_id, msg));
                        }
                        Ok(Message::Ping(data)) => {
                            if let Err(e) = ws_tx.send(Message::Pong(data)).await {
                                error!("Failed to send pong: {}", e);
                                break;
                            }
                        }
                        Ok(Message::Close(_)) => {
                            debug!("Peer {} requested close", peer_id);
                            break;
                        }
                        Err(e) => {
                            error!("WebSocket error: {}", e);
                            break;
                        }
                        _ => {}
                    }
                }

                // Frames from the other peers in this room
                result = broadcast_rx.recv() => {
                    match result {
                        Ok((sender, msg)) => {
                            if sender == peer_id {
                                continue;
                            }
                            if let Err(e) = ws_tx.send(msg).await {
                                error!("Failed to forward frame: {}", e);
                                break;
                            }
                        }
                        Err(broadcast::error::RecvError::Lagged(n)) => {
                            warn!("Peer {} lagged {} frames on pad {}", peer_id, n, self.pad_id);
                        }
                        Err(broadcast::error::RecvError::Closed) => break,
                    }
                }

                else => break,
            }
        }

        self.connections.fetch_sub(1, Ordering::SeqCst);
        info!(
            "Peer {} left pad {} (connections={})",
            peer_id,
            self.pad_id,
            self.connection_count()
        );
    }
}
