//! User and room membership records.
//!
//! A [`User`] exists only for the interval during which a connection is
//! joined to a room. It is owned exclusively by the session directory;
//! everything else sees clones or [`RoomMember`] snapshots.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque identity of one persistent client connection.
///
/// Assigned by the API layer when a WebSocket upgrade completes. UUIDv7 so
/// ids sort by connection time, which makes logs easy to follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    /// Mint a fresh connection id.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A joined participant.
///
/// `username` and `room` are stored in normalized form (trimmed,
/// lowercased). Normalization happens once, at join time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Connection this user is bound to (one-to-one while joined).
    pub id: ConnectionId,
    /// Normalized username, unique within `room`.
    pub username: String,
    /// Normalized room name.
    pub room: String,
}

/// One entry in a `room_data` snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomMember {
    /// Normalized username as stored in the directory.
    pub username: String,
}

/// Normalize a username or room name for storage and comparison.
///
/// One rule, applied consistently: trim surrounding whitespace, then
/// lowercase. An empty result means the input was blank.
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}
