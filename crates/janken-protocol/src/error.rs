//! Error types for the protocol layer.

/// Errors raised while interpreting wire-level values.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// The string is not one of `rock`, `paper`, `scissors`.
    #[error("unknown hand: {0:?}")]
    UnknownHand(String),
}
