//! Round-resolution core for janken rooms.
//!
//! A room runs an elimination tournament of multi-player rock-paper-scissors:
//! every fighting player submits a hand each round, complete rounds are
//! judged, and winners are confirmed only when doing so cannot overshoot the
//! room's winner quota.
//!
//! # Key types
//!
//! - [`Room`] — the aggregate; owns the player registry and the round ledger
//!   and exposes the command surface
//! - [`UserRegistry`] — tri-state player set (Fighting / Win / Lose)
//! - [`RoundLedger`] — append-only round history plus the open round
//! - [`judge`] — pure function mapping a complete round to its outcome
//! - [`RoomError`] — typed validation failures

mod error;
mod judge;
mod player;
mod policy;
mod registry;
mod room;
mod round;

pub use error::RoomError;
pub use judge::{judge, RoundOutcome};
pub use player::{Player, PlayerStatus};
pub use policy::{apply_promotion, PromotionDecision};
pub use registry::UserRegistry;
pub use room::{Room, MAX_PLAYERS};
pub use round::{Round, RoundLedger, RoundPhase, RoundVerdict};
