//! The room aggregate: command surface over registry + ledger.

use janken_protocol::{Hand, PlayerName, RoomId, RoundReport, RoundResolution};
use serde::{Deserialize, Serialize};

use crate::{
    apply_promotion, judge, PlayerStatus, PromotionDecision, RoomError, RoundLedger,
    RoundOutcome, RoundVerdict, UserRegistry,
};

/// Maximum number of players a room can hold.
pub const MAX_PLAYERS: usize = 8;

/// One tournament room.
///
/// Owns the player registry and the round ledger; every command validates
/// its preconditions first and fails without mutating anything. The
/// aggregate has no storage or transport knowledge — the engine loads it,
/// runs one command, and saves it back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    id: RoomId,
    winner_quota: u32,
    started: bool,
    registry: UserRegistry,
    ledger: RoundLedger,
}

impl Room {
    /// Creates an unstarted room with no players and no rounds.
    pub fn new(id: RoomId, winner_quota: u32) -> Result<Self, RoomError> {
        if winner_quota < 1 {
            return Err(RoomError::QuotaInvalid(winner_quota));
        }
        Ok(Self {
            id,
            winner_quota,
            started: false,
            registry: UserRegistry::new(),
            ledger: RoundLedger::new(),
        })
    }

    pub fn id(&self) -> &RoomId {
        &self.id
    }

    pub fn winner_quota(&self) -> u32 {
        self.winner_quota
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn registry(&self) -> &UserRegistry {
        &self.registry
    }

    pub fn ledger(&self) -> &RoundLedger {
        &self.ledger
    }

    /// Changes the winner quota. Only allowed before the room starts.
    pub fn set_winner_quota(&mut self, quota: u32) -> Result<(), RoomError> {
        if self.started {
            return Err(RoomError::AlreadyStarted);
        }
        if quota < 1 {
            return Err(RoomError::QuotaInvalid(quota));
        }
        self.winner_quota = quota;
        Ok(())
    }

    /// Adds a player. Re-joining under a taken name is a no-op.
    pub fn add_player(&mut self, name: PlayerName) -> Result<(), RoomError> {
        if self.registry.contains(&name) {
            return Ok(());
        }
        if self.registry.len() >= MAX_PLAYERS {
            return Err(RoomError::RoomFull);
        }
        self.registry.add(name);
        Ok(())
    }

    /// Removes a player. Unsupported once the room has started.
    pub fn remove_player(&mut self, name: &PlayerName) -> Result<(), RoomError> {
        if self.started {
            return Err(RoomError::AlreadyStarted);
        }
        if !self.registry.remove(name) {
            return Err(RoomError::UnknownPlayer(name.clone()));
        }
        Ok(())
    }

    /// `true` if `name` is still free in this room.
    pub fn verify_player_name(&self, name: &PlayerName) -> bool {
        !self.registry.contains(name)
    }

    /// All member names, in join order.
    pub fn player_names(&self) -> Vec<PlayerName> {
        self.registry.names()
    }

    /// Starts the tournament and opens round 1.
    pub fn start(&mut self) -> Result<(), RoomError> {
        if self.started {
            return Err(RoomError::AlreadyStarted);
        }
        self.started = true;
        // A fresh room has no open round, so this cannot fail.
        self.ledger.open_next()?;
        Ok(())
    }

    /// Records one player's hand in the open round.
    ///
    /// Returns the names that have submitted so far this round, in
    /// submission order.
    pub fn submit_hand(
        &mut self,
        name: &PlayerName,
        hand: Hand,
    ) -> Result<Vec<PlayerName>, RoomError> {
        if !self.started {
            return Err(RoomError::NotStarted);
        }
        match self.registry.status_of(name) {
            None => return Err(RoomError::UnknownPlayer(name.clone())),
            Some(status) if status != PlayerStatus::Fighting => {
                return Err(RoomError::PlayerNotFighting(name.clone()));
            }
            Some(_) => {}
        }
        self.ledger.record(name.clone(), hand)?;
        Ok(self.chosen_names())
    }

    /// Names that have submitted in the open round so far.
    pub fn chosen_names(&self) -> Vec<PlayerName> {
        self.ledger
            .open_round()
            .map(|r| r.chosen_names())
            .unwrap_or_default()
    }

    /// Judges the open round if every fighting player has submitted.
    ///
    /// Returns `None` while submissions are outstanding. On a draw the
    /// round closes and a fresh one opens with the same fighting
    /// population. On a decided round the promotion policy runs, and the
    /// next round opens unless the quota is now filled.
    pub fn resolve_round_if_ready(&mut self) -> Result<Option<RoundResolution>, RoomError> {
        if !self.started {
            return Err(RoomError::NotStarted);
        }
        let round = self.ledger.open_round().ok_or(RoomError::NoOpenRound)?;
        let fighting_count = self.registry.fighting_count();
        if !round.is_ready_to_judge(fighting_count) {
            return Ok(None);
        }
        let outcome = judge(round.submissions(), fighting_count);

        match outcome {
            // Unreachable behind the readiness gate above; kept so the
            // match stays exhaustive over the judge's contract.
            RoundOutcome::Incomplete => Ok(None),
            RoundOutcome::Draw => {
                self.close_open_round(RoundVerdict::Draw);
                let next_round = self.ledger.open_next()?;
                tracing::debug!(room_id = %self.id, next_round, "round drawn, replaying");
                Ok(Some(RoundResolution::Draw { next_round }))
            }
            RoundOutcome::Decided {
                winning_hand,
                winners,
                losers,
            } => {
                let submissions = round.submissions().to_vec();
                self.close_open_round(RoundVerdict::Decided);

                let decision =
                    apply_promotion(&mut self.registry, self.winner_quota, &winners, &losers);
                let completed = self.is_completed();
                if !completed {
                    self.ledger.open_next()?;
                }

                tracing::info!(
                    room_id = %self.id,
                    %winning_hand,
                    winners = winners.len(),
                    losers = losers.len(),
                    deferred = decision == PromotionDecision::Deferred,
                    completed,
                    "round settled"
                );

                Ok(Some(RoundResolution::Settled(RoundReport {
                    round_winners: winners,
                    round_losers: losers,
                    submissions,
                    completed,
                    winners: self.registry.winner_names(),
                    losers: self.registry.loser_names(),
                })))
            }
        }
    }

    /// Opens the next round explicitly (the `enter-next-round` command).
    ///
    /// Fails while the current round is open and unjudged.
    pub fn advance_round(&mut self) -> Result<u32, RoomError> {
        if !self.started {
            return Err(RoomError::NotStarted);
        }
        self.ledger.open_next()
    }

    /// `true` once the confirmed-win count equals the quota.
    ///
    /// Completion is derived, never stored: a completed room may still have
    /// players in the Fighting state whose status is simply never finalized.
    pub fn is_completed(&self) -> bool {
        self.registry.win_count() == self.winner_quota as usize
    }

    /// Names with confirmed Win status, in join order.
    pub fn winner_names(&self) -> Vec<PlayerName> {
        self.registry.winner_names()
    }

    /// Names with confirmed Lose status, in join order.
    pub fn loser_names(&self) -> Vec<PlayerName> {
        self.registry.loser_names()
    }

    fn close_open_round(&mut self, verdict: RoundVerdict) {
        if let Some(round) = self.ledger.open_round_mut() {
            round.close(verdict);
        }
    }
}
