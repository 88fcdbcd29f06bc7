//! Error types for the room core.

use janken_protocol::PlayerName;

/// Validation failures raised by room commands.
///
/// Every variant is a fail-fast precondition error: the command that raised
/// it has not mutated the room.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoomError {
    /// The room has already been started.
    #[error("room already started")]
    AlreadyStarted,

    /// The command requires a started room.
    #[error("room not started")]
    NotStarted,

    /// No player with this name is in the room.
    #[error("unknown player {0}")]
    UnknownPlayer(PlayerName),

    /// The player already has a confirmed Win or Lose status.
    #[error("player {0} is no longer fighting")]
    PlayerNotFighting(PlayerName),

    /// The player already submitted a hand in the open round.
    #[error("player {0} already chose a hand this round")]
    DuplicateSubmission(PlayerName),

    /// There is no open round to act on.
    #[error("no open round")]
    NoOpenRound,

    /// The current round is still open and unjudged.
    #[error("round {0} is still open")]
    RoundStillOpen(u32),

    /// All player slots are taken.
    #[error("room is full")]
    RoomFull,

    /// The winner quota must be a positive integer.
    #[error("number of winners must be at least 1, got {0}")]
    QuotaInvalid(u32),
}
