//! Pure round judging.

use janken_protocol::{Hand, PlayerName, Submission};

/// Outcome of judging one round's submission set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundOutcome {
    /// Fewer submissions than fighting players; nothing was judged.
    Incomplete,

    /// Unanimous hand or all three hands present: nobody wins or loses.
    Draw,

    /// Exactly two distinct hands were played.
    Decided {
        winning_hand: Hand,
        /// Players who submitted the winning hand, in submission order.
        winners: Vec<PlayerName>,
        /// Players who submitted the losing hand, in submission order.
        losers: Vec<PlayerName>,
    },
}

/// Judges a round's submissions against the fighting player count.
///
/// Pure: the same submissions always yield the same outcome, regardless of
/// submission order (winners/losers keep submission order, but which side
/// wins depends only on the set of distinct hands).
pub fn judge(submissions: &[Submission], fighting_count: usize) -> RoundOutcome {
    if submissions.len() < fighting_count {
        return RoundOutcome::Incomplete;
    }

    let mut distinct: Vec<Hand> = Vec::with_capacity(3);
    for submission in submissions {
        if !distinct.contains(&submission.hand) {
            distinct.push(submission.hand);
        }
    }

    let &[a, b] = distinct.as_slice() else {
        // One distinct hand (unanimous) or all three present.
        return RoundOutcome::Draw;
    };
    let winning_hand = if a.beats(b) { a } else { b };

    let (winners, losers) = submissions.iter().partition::<Vec<_>, _>(|s| s.hand == winning_hand);
    RoundOutcome::Decided {
        winning_hand,
        winners: winners.into_iter().map(|s| s.player.clone()).collect(),
        losers: losers.into_iter().map(|s| s.player.clone()).collect(),
    }
}
