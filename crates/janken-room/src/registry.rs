//! The per-room player set.

use janken_protocol::PlayerName;
use serde::{Deserialize, Serialize};

use crate::{Player, PlayerStatus};

/// Ordered set of room members, keyed by name.
///
/// Insertion order is join order and is preserved in every list this type
/// returns. Names are unique; adding an existing name is a no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRegistry {
    players: Vec<Player>,
}

impl UserRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a player in the Fighting state.
    ///
    /// Returns `false` (and changes nothing) if the name is already taken.
    pub fn add(&mut self, name: PlayerName) -> bool {
        if self.contains(&name) {
            return false;
        }
        self.players.push(Player::new(name));
        true
    }

    /// Removes a player by name. Returns `false` if the name is unknown.
    pub fn remove(&mut self, name: &PlayerName) -> bool {
        let before = self.players.len();
        self.players.retain(|p| p.name() != name);
        self.players.len() < before
    }

    pub fn contains(&self, name: &PlayerName) -> bool {
        self.players.iter().any(|p| p.name() == name)
    }

    pub fn status_of(&self, name: &PlayerName) -> Option<PlayerStatus> {
        self.players
            .iter()
            .find(|p| p.name() == name)
            .map(Player::status)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn fighting_count(&self) -> usize {
        self.players.iter().filter(|p| p.is_fighting()).count()
    }

    pub fn win_count(&self) -> usize {
        self.players.iter().filter(|p| p.is_win()).count()
    }

    /// All member names, in join order.
    pub fn names(&self) -> Vec<PlayerName> {
        self.players.iter().map(|p| p.name().clone()).collect()
    }

    /// Names still eligible to submit hands, in join order.
    pub fn fighting_names(&self) -> Vec<PlayerName> {
        self.filtered_names(Player::is_fighting)
    }

    /// Names with confirmed Win status, in join order.
    pub fn winner_names(&self) -> Vec<PlayerName> {
        self.filtered_names(Player::is_win)
    }

    /// Names with confirmed Lose status, in join order.
    pub fn loser_names(&self) -> Vec<PlayerName> {
        self.filtered_names(Player::is_lose)
    }

    /// Confirms Win for every Fighting player named in `names`.
    ///
    /// Players not named, and players whose status is already confirmed,
    /// are untouched.
    pub fn promote_to_win(&mut self, names: &[PlayerName]) {
        for player in self.players.iter_mut().filter(|p| p.is_fighting()) {
            if names.contains(player.name()) {
                player.confirm_win();
            }
        }
    }

    /// Confirms Lose for every Fighting player named in `names`.
    pub fn demote_to_lose(&mut self, names: &[PlayerName]) {
        for player in self.players.iter_mut().filter(|p| p.is_fighting()) {
            if names.contains(player.name()) {
                player.confirm_lose();
            }
        }
    }

    fn filtered_names(&self, keep: impl Fn(&Player) -> bool) -> Vec<PlayerName> {
        self.players
            .iter()
            .filter(|p| keep(p))
            .map(|p| p.name().clone())
            .collect()
    }
}
