//! Session directory: the single shared registry of joined users.
//!
//! Two indexes live under one mutex so no reader ever observes a
//! half-applied add or remove: connection id -> [`User`], and room name ->
//! (username -> connection id). The secondary index makes the per-room
//! uniqueness check and broadcast recipient lookup O(1)/O(k) without
//! scanning the whole directory.
//!
//! Rooms are not stored entities. A room exists exactly while its member
//! map is non-empty; the entry is dropped when the last member leaves.

use std::collections::HashMap;
use std::sync::Mutex;

use parley_types::error::ChatError;
use parley_types::user::{normalize, ConnectionId, RoomMember, User};

#[derive(Debug, Default)]
struct DirectoryInner {
    /// Connection id -> joined user.
    users: HashMap<ConnectionId, User>,
    /// Room name -> (normalized username -> connection id).
    rooms: HashMap<String, HashMap<String, ConnectionId>>,
}

/// Shared registry mapping connection identity to (username, room).
///
/// Every operation takes the single internal lock, so mutations are atomic
/// relative to concurrent lookups. The directory is small (one entry per
/// live connection); one mutex is enough.
#[derive(Debug, Default)]
pub struct SessionDirectory {
    inner: Mutex<DirectoryInner>,
}

impl SessionDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a user for `conn`, enforcing per-room username uniqueness.
    ///
    /// Username and room are normalized (trimmed, lowercased) before
    /// validation and storage. On any failure the directory is unchanged.
    pub fn add_user(
        &self,
        conn: ConnectionId,
        username: &str,
        room: &str,
    ) -> Result<User, ChatError> {
        let username = normalize(username);
        let room = normalize(room);

        if username.is_empty() || room.is_empty() {
            return Err(ChatError::Validation(
                "username and room are required".to_string(),
            ));
        }

        let mut inner = self.inner.lock().expect("directory lock poisoned");

        if inner.users.contains_key(&conn) {
            return Err(ChatError::AlreadyJoined);
        }

        if inner
            .rooms
            .get(&room)
            .is_some_and(|members| members.contains_key(&username))
        {
            return Err(ChatError::UsernameTaken { username, room });
        }
        inner
            .rooms
            .entry(room.clone())
            .or_default()
            .insert(username.clone(), conn);

        let user = User {
            id: conn,
            username,
            room,
        };
        inner.users.insert(conn, user.clone());
        Ok(user)
    }

    /// Remove and return the user bound to `conn`, if any.
    ///
    /// The room's member entry is removed as well; the room itself
    /// disappears when its last member does.
    pub fn remove_user(&self, conn: ConnectionId) -> Option<User> {
        let mut inner = self.inner.lock().expect("directory lock poisoned");
        let user = inner.users.remove(&conn)?;

        if let Some(members) = inner.rooms.get_mut(&user.room) {
            members.remove(&user.username);
            if members.is_empty() {
                inner.rooms.remove(&user.room);
            }
        }
        Some(user)
    }

    /// Look up the user bound to `conn`.
    pub fn get_user(&self, conn: ConnectionId) -> Option<User> {
        let inner = self.inner.lock().expect("directory lock poisoned");
        inner.users.get(&conn).cloned()
    }

    /// Current members of `room`, sorted by username.
    ///
    /// Membership order carries no meaning; sorting keeps snapshots
    /// deterministic for clients and tests.
    pub fn users_in_room(&self, room: &str) -> Vec<RoomMember> {
        let room = normalize(room);
        let inner = self.inner.lock().expect("directory lock poisoned");
        let mut members: Vec<RoomMember> = inner
            .rooms
            .get(&room)
            .map(|m| {
                m.keys()
                    .map(|username| RoomMember {
                        username: username.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default();
        members.sort_by(|a, b| a.username.cmp(&b.username));
        members
    }

    /// Connection ids of every current member of `room`.
    pub fn member_ids(&self, room: &str) -> Vec<ConnectionId> {
        let room = normalize(room);
        let inner = self.inner.lock().expect("directory lock poisoned");
        inner
            .rooms
            .get(&room)
            .map(|m| m.values().copied().collect())
            .unwrap_or_default()
    }

    /// Total number of joined users across all rooms.
    pub fn len(&self) -> usize {
        self.inner.lock().expect("directory lock poisoned").users.len()
    }

    /// Whether no user is currently joined.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
