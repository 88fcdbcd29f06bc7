//! Round history and sequencing.

use janken_protocol::{Hand, PlayerName, Submission};
use serde::{Deserialize, Serialize};

use crate::RoomError;

/// How a judged round resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundVerdict {
    Draw,
    Decided,
}

/// Lifecycle of a single round.
///
/// `Open → Judged(Draw | Decided)`. Readiness to judge is derived: an open
/// round is ready once every fighting player has a submission on record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundPhase {
    Open,
    Judged(RoundVerdict),
}

/// One synchronized batch of hand submissions.
///
/// Submissions are append-only and kept in submission order. Once the round
/// is judged it becomes immutable history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    index: u32,
    submissions: Vec<Submission>,
    phase: RoundPhase,
}

impl Round {
    fn new(index: u32) -> Self {
        Self {
            index,
            submissions: Vec::new(),
            phase: RoundPhase::Open,
        }
    }

    /// 1-based round number, equal to its position in the ledger.
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn is_open(&self) -> bool {
        self.phase == RoundPhase::Open
    }

    pub fn submissions(&self) -> &[Submission] {
        &self.submissions
    }

    /// Names that have already submitted, in submission order.
    pub fn chosen_names(&self) -> Vec<PlayerName> {
        self.submissions.iter().map(|s| s.player.clone()).collect()
    }

    /// `true` once every fighting player has submitted and the round is
    /// still open.
    pub fn is_ready_to_judge(&self, fighting_count: usize) -> bool {
        self.is_open() && self.submissions.len() >= fighting_count
    }

    fn record(&mut self, player: PlayerName, hand: Hand) -> Result<(), RoomError> {
        if !self.is_open() {
            return Err(RoomError::NoOpenRound);
        }
        if self.submissions.iter().any(|s| s.player == player) {
            return Err(RoomError::DuplicateSubmission(player));
        }
        self.submissions.push(Submission { player, hand });
        Ok(())
    }

    pub(crate) fn close(&mut self, verdict: RoundVerdict) {
        self.phase = RoundPhase::Judged(verdict);
    }
}

/// Append-only per-room round log.
///
/// At most one round is open at a time, always the last one. Indices are
/// 1-based and gap-free.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundLedger {
    rounds: Vec<Round>,
}

impl RoundLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn round_count(&self) -> usize {
        self.rounds.len()
    }

    /// Full round history, oldest first.
    pub fn history(&self) -> &[Round] {
        &self.rounds
    }

    /// The most recent round, open or not.
    pub fn current(&self) -> Option<&Round> {
        self.rounds.last()
    }

    /// The open round, if any.
    pub fn open_round(&self) -> Option<&Round> {
        self.rounds.last().filter(|r| r.is_open())
    }

    pub(crate) fn open_round_mut(&mut self) -> Option<&mut Round> {
        self.rounds.last_mut().filter(|r| r.is_open())
    }

    /// Opens the next round.
    ///
    /// Fails with [`RoomError::RoundStillOpen`] while the current round is
    /// open and unjudged. Returns the new round's index.
    pub fn open_next(&mut self) -> Result<u32, RoomError> {
        if let Some(open) = self.open_round() {
            return Err(RoomError::RoundStillOpen(open.index()));
        }
        let index = self.rounds.len() as u32 + 1;
        self.rounds.push(Round::new(index));
        Ok(index)
    }

    /// Records one player's hand in the open round.
    ///
    /// The caller is responsible for registry-level checks (player exists
    /// and is still fighting); this enforces the ledger-level ones.
    pub fn record(&mut self, player: PlayerName, hand: Hand) -> Result<(), RoomError> {
        let round = self.open_round_mut().ok_or(RoomError::NoOpenRound)?;
        round.record(player, hand)
    }
}
