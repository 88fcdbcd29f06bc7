//! Command serialization and storage for janken rooms.
//!
//! The storage contract ([`RoomStore`]) has no compare-and-swap: two
//! concurrent load-mutate-save cycles on the same room would silently drop
//! one of the writes. The engine therefore runs every mutating command
//! through a per-room FIFO lane — a Tokio task owning an mpsc mailbox — so
//! that at most one cycle per room is ever in flight. Commands for
//! different rooms proceed independently.
//!
//! This guarantee is in-process only: running several engine instances
//! against one store reintroduces the lost-update race. That limitation is
//! inherited from the storage contract and is deliberately not papered
//! over here (a version/ETag field on [`Room`](janken_room::Room) would be
//! the explicit extension point).

mod config;
mod engine;
mod error;
mod lane;
mod store;

pub use config::EngineConfig;
pub use engine::RoomEngine;
pub use error::EngineError;
pub use store::{MemoryStore, RoomStore, StoreError};
