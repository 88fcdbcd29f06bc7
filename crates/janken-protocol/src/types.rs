//! Identifier newtypes, the [`Hand`] enum, and per-round submissions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ProtocolError;

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// A unique identifier for a room.
///
/// Room ids are opaque strings minted by the persistence collaborator; the
/// engine never inspects their contents, only keys lanes and storage by them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(pub String);

impl RoomId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RoomId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// A player's display name, unique within a room.
///
/// The name doubles as the player's identity: submissions, promotions and
/// results all refer to players by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerName(pub String);

impl PlayerName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PlayerName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Hand
// ---------------------------------------------------------------------------

/// One of the three playable hands.
///
/// Dominance is cyclic: paper beats rock, rock beats scissors, scissors
/// beats paper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Hand {
    Rock,
    Paper,
    Scissors,
}

impl Hand {
    /// Returns `true` if `self` beats `other` in the fixed dominance table.
    ///
    /// A hand never beats itself.
    pub fn beats(self, other: Hand) -> bool {
        matches!(
            (self, other),
            (Hand::Paper, Hand::Rock)
                | (Hand::Rock, Hand::Scissors)
                | (Hand::Scissors, Hand::Paper)
        )
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Hand::Rock => "rock",
            Hand::Paper => "paper",
            Hand::Scissors => "scissors",
        };
        write!(f, "{s}")
    }
}

impl FromStr for Hand {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rock" => Ok(Hand::Rock),
            "paper" => Ok(Hand::Paper),
            "scissors" => Ok(Hand::Scissors),
            other => Err(ProtocolError::UnknownHand(other.to_owned())),
        }
    }
}

// ---------------------------------------------------------------------------
// Submission
// ---------------------------------------------------------------------------

/// One player's hand in one round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub player: PlayerName,
    pub hand: Hand,
}
