//! Wire events exchanged over a chat connection.
//!
//! Both directions use JSON text frames with a `type` tag. Field and tag
//! names are camelCase on the wire (`sendMessage`, `createdAt`) to match
//! the protocol the bundled client speaks. Timestamps travel as integer
//! milliseconds since the Unix epoch.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::user::RoomMember;

/// An event pushed from the server to one or more connections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ServerEvent {
    /// A chat message, including system-generated admin notices.
    #[serde(rename_all = "camelCase")]
    Message {
        username: String,
        text: String,
        #[serde(with = "chrono::serde::ts_milliseconds")]
        created_at: DateTime<Utc>,
    },

    /// A shared location, already rendered to a maps URL.
    #[serde(rename_all = "camelCase")]
    LocationMessage {
        username: String,
        url: String,
        #[serde(with = "chrono::serde::ts_milliseconds")]
        created_at: DateTime<Utc>,
    },

    /// Snapshot of a room's current membership.
    #[serde(rename_all = "camelCase")]
    RoomData { room: String, users: Vec<RoomMember> },

    /// Acknowledgment of one client frame. Exactly one per client call.
    ///
    /// `id` echoes the correlation id from the originating [`ClientFrame`],
    /// when the client supplied one. Exactly one of `error` / `message` is
    /// set for rejections and confirmations; both are absent for calls
    /// that ack empty (e.g. `sendLocation`).
    #[serde(rename_all = "camelCase")]
    Ack {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<u64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        error: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
}

/// A request sent by a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClientEvent {
    /// Enter a room under a username. Valid once per connection.
    Join { username: String, room: String },

    /// Send a chat message to the joined room.
    SendMessage { text: String },

    /// Share coordinates with the joined room.
    SendLocation { latitude: f64, longitude: f64 },
}

/// One inbound frame: an optional correlation id plus the event itself.
///
/// The `id` is echoed back in the [`ServerEvent::Ack`], replacing the
/// callback-style acknowledgment of socket-based protocols with explicit
/// request/response correlation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientFrame {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(flatten)]
    pub event: ClientEvent,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_message_event_wire_shape() {
        let event = ServerEvent::Message {
            username: "alice".to_string(),
            text: "hello".to_string(),
            created_at: Utc.timestamp_millis_opt(1_700_000_000_123).unwrap(),
        };
        let json = serde_json::to_string(&event).unwrap();

        assert!(json.contains("\"type\":\"message\""));
        assert!(json.contains("\"createdAt\":1700000000123"));
        assert!(json.contains("\"username\":\"alice\""));

        let parsed: ServerEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, event);
    }

    #[test]
    fn test_location_message_wire_shape() {
        let event = ServerEvent::LocationMessage {
            username: "bob".to_string(),
            url: "https://google.com/maps?q=1.5,-2.25".to_string(),
            created_at: Utc.timestamp_millis_opt(1_700_000_000_000).unwrap(),
        };
        let json = serde_json::to_string(&event).unwrap();

        assert!(json.contains("\"type\":\"locationMessage\""));
        assert!(json.contains("\"url\":\"https://google.com/maps?q=1.5,-2.25\""));
    }

    #[test]
    fn test_room_data_wire_shape() {
        let event = ServerEvent::RoomData {
            room: "lobby".to_string(),
            users: vec![
                RoomMember { username: "alice".to_string() },
                RoomMember { username: "bob".to_string() },
            ],
        };
        let json = serde_json::to_string(&event).unwrap();

        assert!(json.contains("\"type\":\"roomData\""));
        assert!(json.contains("\"users\":[{\"username\":\"alice\"},{\"username\":\"bob\"}]"));
    }

    #[test]
    fn test_ack_omits_absent_fields() {
        let ack = ServerEvent::Ack {
            id: None,
            error: None,
            message: None,
        };
        let json = serde_json::to_string(&ack).unwrap();
        assert_eq!(json, "{\"type\":\"ack\"}");
    }

    #[test]
    fn test_ack_with_error_and_id() {
        let ack = ServerEvent::Ack {
            id: Some(7),
            error: Some("username is taken".to_string()),
            message: None,
        };
        let json = serde_json::to_string(&ack).unwrap();
        assert!(json.contains("\"id\":7"));
        assert!(json.contains("\"error\":\"username is taken\""));
        assert!(!json.contains("\"message\""));
    }

    #[test]
    fn test_client_frame_join_roundtrip() {
        let json = r#"{"id":1,"type":"join","username":"Alice","room":"Lobby"}"#;
        let frame: ClientFrame = serde_json::from_str(json).unwrap();
        assert_eq!(frame.id, Some(1));
        assert_eq!(
            frame.event,
            ClientEvent::Join {
                username: "Alice".to_string(),
                room: "Lobby".to_string(),
            }
        );
    }

    #[test]
    fn test_client_frame_without_id() {
        let json = r#"{"type":"sendMessage","text":"hi"}"#;
        let frame: ClientFrame = serde_json::from_str(json).unwrap();
        assert_eq!(frame.id, None);
        assert!(matches!(frame.event, ClientEvent::SendMessage { .. }));
    }

    #[test]
    fn test_client_frame_send_location() {
        let json = r#"{"type":"sendLocation","latitude":51.5,"longitude":-0.12}"#;
        let frame: ClientFrame = serde_json::from_str(json).unwrap();
        match frame.event {
            ClientEvent::SendLocation { latitude, longitude } => {
                assert_eq!(latitude, 51.5);
                assert_eq!(longitude, -0.12);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_event_type_is_rejected() {
        let json = r#"{"type":"shutdown"}"#;
        assert!(serde_json::from_str::<ClientFrame>(json).is_err());
    }
}
