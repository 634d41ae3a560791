//! Envelope factory: pure construction of timestamped event payloads.
//!
//! Deterministic apart from the timestamp; no side effects and no
//! validation (callers validate before building). Presence notices use
//! the [`ADMIN_USERNAME`] sentinel.

use chrono::Utc;
use parley_types::event::ServerEvent;

/// Sentinel username marking system-generated presence messages.
pub const ADMIN_USERNAME: &str = "Admin";

/// Build a chat message envelope stamped with the current time.
pub fn chat_envelope(username: &str, text: &str) -> ServerEvent {
    ServerEvent::Message {
        username: username.to_string(),
        text: text.to_string(),
        created_at: Utc::now(),
    }
}

/// Build a location message envelope stamped with the current time.
pub fn location_envelope(username: &str, url: &str) -> ServerEvent {
    ServerEvent::LocationMessage {
        username: username.to_string(),
        url: url.to_string(),
        created_at: Utc::now(),
    }
}

/// Build an admin chat envelope (welcome, joined, left notices).
pub fn admin_envelope(text: &str) -> ServerEvent {
    chat_envelope(ADMIN_USERNAME, text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_envelope_carries_sender_and_text() {
        let before = Utc::now();
        let event = chat_envelope("alice", "hello");
        match event {
            ServerEvent::Message {
                username,
                text,
                created_at,
            } => {
                assert_eq!(username, "alice");
                assert_eq!(text, "hello");
                assert!(created_at >= before);
                assert!(created_at <= Utc::now());
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn location_envelope_carries_url() {
        let event = location_envelope("bob", "https://google.com/maps?q=1,2");
        match event {
            ServerEvent::LocationMessage { username, url, .. } => {
                assert_eq!(username, "bob");
                assert_eq!(url, "https://google.com/maps?q=1,2");
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn admin_envelope_uses_sentinel_username() {
        match admin_envelope("Welcome") {
            ServerEvent::Message { username, text, .. } => {
                assert_eq!(username, ADMIN_USERNAME);
                assert_eq!(text, "Welcome");
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
