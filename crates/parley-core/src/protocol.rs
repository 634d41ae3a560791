//! Room broadcast protocol: the join/send/disconnect state machine.
//!
//! [`RoomProtocol`] is the only writer of the session directory and the
//! only producer of room-scoped fan-out. Each connection's handler task
//! owns a [`ConnectionState`] and passes it in by mutable reference; the
//! protocol validates every operation against it, mutates the directory,
//! builds envelopes, and pushes them through the connection registry.
//!
//! Fan-out is best-effort per recipient (see [`ConnectionRegistry`]); the
//! originator's result reflects only whether the action was accepted,
//! never whether every recipient received it.

use std::sync::Arc;

use parley_types::error::ChatError;
use parley_types::event::ServerEvent;
use parley_types::user::{ConnectionId, User};
use tracing::{debug, info};

use crate::directory::SessionDirectory;
use crate::envelope;
use crate::filter::ProfanityFilter;
use crate::registry::ConnectionRegistry;

/// Lifecycle of one connection, owned by its handler task.
///
/// `Unjoined -> Joined -> Terminated`; `Terminated` is terminal and can be
/// reached from either prior state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    /// Connected, not yet in any room.
    #[default]
    Unjoined,
    /// Successfully joined a room.
    Joined,
    /// Disconnected; no further operations are valid.
    Terminated,
}

/// The join/send/disconnect coordinator for all rooms.
pub struct RoomProtocol {
    directory: Arc<SessionDirectory>,
    registry: Arc<ConnectionRegistry>,
    filter: Arc<dyn ProfanityFilter>,
    maps_host: String,
}

impl RoomProtocol {
    /// Wire up the protocol with its collaborators.
    pub fn new(
        directory: Arc<SessionDirectory>,
        registry: Arc<ConnectionRegistry>,
        filter: Arc<dyn ProfanityFilter>,
        maps_host: impl Into<String>,
    ) -> Self {
        Self {
            directory,
            registry,
            filter,
            maps_host: maps_host.into(),
        }
    }

    /// Access the session directory.
    pub fn directory(&self) -> &Arc<SessionDirectory> {
        &self.directory
    }

    /// Access the connection registry.
    pub fn registry(&self) -> &Arc<ConnectionRegistry> {
        &self.registry
    }

    /// Join `conn` to a room under a username. Valid only from `Unjoined`.
    ///
    /// On failure the directory and `state` are unchanged and nothing is
    /// broadcast. On success, in order: a private welcome to the
    /// originator, a "has joined" admin notice to every other member, and
    /// a membership snapshot to every member including the originator.
    pub fn join(
        &self,
        conn: ConnectionId,
        state: &mut ConnectionState,
        username: &str,
        room: &str,
    ) -> Result<(), ChatError> {
        match state {
            ConnectionState::Unjoined => {}
            ConnectionState::Joined => return Err(ChatError::AlreadyJoined),
            ConnectionState::Terminated => {
                return Err(ChatError::Validation("connection is closed".to_string()));
            }
        }

        let user = self.directory.add_user(conn, username, room)?;
        *state = ConnectionState::Joined;
        info!(%conn, username = %user.username, room = %user.room, "user joined room");

        self.registry
            .send_to(conn, envelope::admin_envelope("Welcome"));

        let members = self.directory.member_ids(&user.room);
        let peers: Vec<ConnectionId> =
            members.iter().copied().filter(|&id| id != conn).collect();
        self.registry.send_to_many(
            &peers,
            &envelope::admin_envelope(&format!(
                "{} has joined",
                user.username.to_uppercase()
            )),
        );

        self.broadcast_snapshot(&user.room, &members);
        Ok(())
    }

    /// Broadcast a chat message from `conn` to its room. Valid only from
    /// `Joined`.
    ///
    /// Text flagged by the profanity filter is rejected without any
    /// broadcast. On success the message goes to every member of the
    /// sender's room, the sender included; the caller acks "Delivered".
    pub fn send_message(
        &self,
        conn: ConnectionId,
        state: &ConnectionState,
        text: &str,
    ) -> Result<(), ChatError> {
        let user = self.joined_user(conn, state)?;

        if self.filter.is_profane(text) {
            debug!(%conn, room = %user.room, "message blocked by profanity filter");
            return Err(ChatError::Profanity);
        }

        let members = self.directory.member_ids(&user.room);
        self.registry
            .send_to_many(&members, &envelope::chat_envelope(&user.username, text));
        Ok(())
    }

    /// Broadcast the sender's location as a maps URL. Valid only from
    /// `Joined`. Delivered to every member of the room, sender included.
    pub fn send_location(
        &self,
        conn: ConnectionId,
        state: &ConnectionState,
        latitude: f64,
        longitude: f64,
    ) -> Result<(), ChatError> {
        let user = self.joined_user(conn, state)?;

        let url = format!(
            "https://{}/maps?q={latitude},{longitude}",
            self.maps_host
        );
        let members = self.directory.member_ids(&user.room);
        self.registry
            .send_to_many(&members, &envelope::location_envelope(&user.username, &url));
        Ok(())
    }

    /// Tear down `conn`. Valid from any state; always terminal.
    ///
    /// If the connection had a joined user, the remaining members of its
    /// room get a "has left" admin notice followed by an updated snapshot.
    /// A room left empty triggers no broadcast at all.
    pub fn disconnect(&self, conn: ConnectionId, state: &mut ConnectionState) {
        *state = ConnectionState::Terminated;
        self.registry.unregister(conn);

        let Some(user) = self.directory.remove_user(conn) else {
            debug!(%conn, "disconnected before joining");
            return;
        };
        info!(%conn, username = %user.username, room = %user.room, "user left room");

        let remaining = self.directory.member_ids(&user.room);
        if remaining.is_empty() {
            return;
        }
        self.registry.send_to_many(
            &remaining,
            &envelope::admin_envelope(&format!(
                "{} has left the room",
                user.username.to_uppercase()
            )),
        );
        self.broadcast_snapshot(&user.room, &remaining);
    }

    /// Resolve the joined user for an in-room action.
    fn joined_user(
        &self,
        conn: ConnectionId,
        state: &ConnectionState,
    ) -> Result<User, ChatError> {
        if *state != ConnectionState::Joined {
            return Err(ChatError::RequireJoined);
        }
        // Unreachable when the state machine is respected, but a missing
        // directory entry must not be dereferenced blindly.
        self.directory.get_user(conn).ok_or(ChatError::RequireJoined)
    }

    /// Send the current membership of `room` to the given recipients.
    fn broadcast_snapshot(&self, room: &str, recipients: &[ConnectionId]) {
        let snapshot = ServerEvent::RoomData {
            room: room.to_string(),
            users: self.directory.users_in_room(room),
        };
        self.registry.send_to_many(recipients, &snapshot);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
