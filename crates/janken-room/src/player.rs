//! A single room member and their tri-state status.

use janken_protocol::PlayerName;
use serde::{Deserialize, Serialize};

/// Where a player stands in the tournament.
///
/// The only legal transitions are `Fighting → Win` and `Fighting → Lose`.
/// A confirmed status never reverses, and there is no fourth state: a
/// completed room may simply leave some players Fighting forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerStatus {
    Fighting,
    Win,
    Lose,
}

/// One member of a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    name: PlayerName,
    status: PlayerStatus,
}

impl Player {
    /// Creates a player in the Fighting state.
    pub fn new(name: PlayerName) -> Self {
        Self {
            name,
            status: PlayerStatus::Fighting,
        }
    }

    pub fn name(&self) -> &PlayerName {
        &self.name
    }

    pub fn status(&self) -> PlayerStatus {
        self.status
    }

    pub fn is_fighting(&self) -> bool {
        self.status == PlayerStatus::Fighting
    }

    pub fn is_win(&self) -> bool {
        self.status == PlayerStatus::Win
    }

    pub fn is_lose(&self) -> bool {
        self.status == PlayerStatus::Lose
    }

    /// Confirms this player as a winner. No-op unless currently Fighting.
    pub(crate) fn confirm_win(&mut self) {
        if self.status == PlayerStatus::Fighting {
            self.status = PlayerStatus::Win;
        }
    }

    /// Confirms this player as eliminated. No-op unless currently Fighting.
    pub(crate) fn confirm_lose(&mut self) {
        if self.status == PlayerStatus::Fighting {
            self.status = PlayerStatus::Lose;
        }
    }
}
