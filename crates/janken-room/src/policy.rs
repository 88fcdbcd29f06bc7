//! Quota-aware promotion after a decided round.

use janken_protocol::PlayerName;

use crate::UserRegistry;

/// What the promotion step did with a decided round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromotionDecision {
    /// The round winners were confirmed as Win. Losers stay Fighting.
    Promoted,

    /// Confirming the winners would overshoot the quota, so the round
    /// losers were eliminated instead. Winners stay Fighting and must
    /// re-contest.
    Deferred,
}

/// Applies the anti-overshoot rule to a decided round.
///
/// Winners are confirmed only when the confirmed-win count plus this
/// round's winners fits within `quota`. Otherwise the field is narrowed by
/// eliminating the round losers, and the winners re-contest next round.
/// Either way the confirmed-win count never exceeds `quota`.
pub fn apply_promotion(
    registry: &mut UserRegistry,
    quota: u32,
    round_winners: &[PlayerName],
    round_losers: &[PlayerName],
) -> PromotionDecision {
    let already = registry.win_count();
    if already + round_winners.len() <= quota as usize {
        registry.promote_to_win(round_winners);
        PromotionDecision::Promoted
    } else {
        registry.demote_to_lose(round_losers);
        PromotionDecision::Deferred
    }
}
