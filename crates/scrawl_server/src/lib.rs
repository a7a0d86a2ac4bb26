//! Scrawl sync server: a realtime collaborative pad behind a token-gated
//! access layer.
//!
//! Clients land on `/e`, get assigned a pad id and a signed credential
//! cookie, and then open a WebSocket at `/sync/{pad_id}`. The access gate
//! verifies the credential before the synchronization collaborator ever
//! sees the connection; the sync engine itself is reached only through
//! the seams in [`collab`].

pub mod auth;
pub mod collab;
pub mod config;
pub mod handlers;
pub mod pad_id;
pub mod sync;
