//! Error types for the engine layer.

use janken_protocol::RoomId;
use janken_room::RoomError;

use crate::StoreError;

/// Errors returned by engine commands.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// No room with this id exists in storage.
    #[error("room {0} not found")]
    RoomNotFound(RoomId),

    /// A room with this id already exists.
    #[error("room {0} already exists")]
    RoomExists(RoomId),

    /// A domain-level validation failure from the room aggregate.
    #[error(transparent)]
    Room(#[from] RoomError),

    /// The storage collaborator failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The room's command lane has shut down and cannot accept commands.
    #[error("room {0} lane is unavailable")]
    LaneClosed(RoomId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_error_converts_transparently() {
        let err: EngineError = RoomError::NoOpenRound.into();
        assert!(matches!(err, EngineError::Room(RoomError::NoOpenRound)));
        assert_eq!(err.to_string(), "no open round");
    }

    #[test]
    fn test_store_error_converts_transparently() {
        let err: EngineError = StoreError::Backend("down".into()).into();
        assert!(matches!(err, EngineError::Store(_)));
        assert!(err.to_string().contains("down"));
    }
}
