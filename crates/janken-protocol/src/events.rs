//! Structured results handed to the notification collaborator.
//!
//! The engine does not know how results reach clients; it returns these
//! values and lets the transport layer frame and broadcast them.

use serde::{Deserialize, Serialize};

use crate::{PlayerName, Submission};

/// Result of a `submit_hand` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitOutcome {
    /// Names of the players who have already chosen in the open round.
    /// Hands stay hidden until the round is judged.
    pub chosen: Vec<PlayerName>,

    /// `None` while the round is still waiting for submissions; the judged
    /// result once this submission was the last one outstanding.
    pub resolution: Option<RoundResolution>,
}

/// How a complete round resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RoundResolution {
    /// Unanimous or all-three-hands round. A fresh round has been opened
    /// with the same fighting population.
    Draw {
        /// Index of the newly opened round.
        next_round: u32,
    },

    /// Exactly two distinct hands were played and the round was judged.
    Settled(RoundReport),
}

/// The judged result of a decided round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundReport {
    /// Players who played the winning hand this round.
    pub round_winners: Vec<PlayerName>,

    /// Fighting players who played the losing hand this round.
    pub round_losers: Vec<PlayerName>,

    /// The full submission list of the judged round, in submission order.
    pub submissions: Vec<Submission>,

    /// `true` once the confirmed-win count has reached the room's quota.
    pub completed: bool,

    /// Names with confirmed Win status, in join order.
    pub winners: Vec<PlayerName>,

    /// Names with confirmed Lose status, in join order.
    pub losers: Vec<PlayerName>,
}
