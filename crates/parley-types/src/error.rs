use thiserror::Error;

/// Errors surfaced to a connection through its acknowledgment.
///
/// None of these are process-fatal: every variant maps to an `error`
/// string in the originator's ack and leaves shared state untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatError {
    /// Blank or otherwise unusable input (empty username or room).
    #[error("{0}")]
    Validation(String),

    /// The normalized username is already present in the target room.
    #[error("username '{username}' is already taken in room '{room}'")]
    UsernameTaken { username: String, room: String },

    /// The profanity filter rejected the message text.
    #[error("profanity is not allowed")]
    Profanity,

    /// A room-scoped action arrived before a successful join.
    #[error("you must join a room first")]
    RequireJoined,

    /// A second join attempt on a connection that is already in a room.
    #[error("already joined a room")]
    AlreadyJoined,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_taken_display() {
        let err = ChatError::UsernameTaken {
            username: "alice".to_string(),
            room: "lobby".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "username 'alice' is already taken in room 'lobby'"
        );
    }

    #[test]
    fn test_validation_display_passes_message_through() {
        let err = ChatError::Validation("username and room are required".to_string());
        assert_eq!(err.to_string(), "username and room are required");
    }

    #[test]
    fn test_require_joined_display() {
        assert_eq!(
            ChatError::RequireJoined.to_string(),
            "you must join a room first"
        );
    }
}
