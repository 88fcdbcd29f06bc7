//! Shared value types for the janken room engine.
//!
//! Everything in this crate is a plain serializable value: identifiers,
//! the [`Hand`] enum, and the structured results the engine hands to the
//! notification collaborator. No behavior beyond what the values themselves
//! carry (hand dominance, string parsing).

mod error;
mod events;
mod types;

pub use error::ProtocolError;
pub use events::{RoundReport, RoundResolution, SubmitOutcome};
pub use types::{Hand, PlayerName, RoomId, Submission};
