//! The engine facade: routes commands onto per-room lanes.

use std::collections::HashMap;
use std::sync::Arc;

use janken_protocol::{Hand, PlayerName, RoomId, SubmitOutcome};
use janken_room::Room;
use tokio::sync::Mutex;

use crate::lane::{spawn_lane, LaneHandle};
use crate::{EngineConfig, EngineError, RoomStore};

/// Entry point for room commands.
///
/// Holds one [`LaneHandle`] per room id, spawning lanes on first use.
/// Every mutating command is executed on its room's lane, so concurrent
/// commands for one room are serialized while different rooms proceed in
/// parallel. Read-only queries go straight to the store and may observe a
/// snapshot from between two commands.
///
/// The store is injected, never resolved from global state.
pub struct RoomEngine<S: RoomStore> {
    store: Arc<S>,
    config: EngineConfig,
    lanes: Mutex<HashMap<RoomId, LaneHandle>>,
}

impl<S: RoomStore> RoomEngine<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self::with_config(store, EngineConfig::default())
    }

    pub fn with_config(store: Arc<S>, config: EngineConfig) -> Self {
        Self {
            store,
            config,
            lanes: Mutex::new(HashMap::new()),
        }
    }

    /// Creates a new, unstarted room.
    pub async fn create_room(
        &self,
        room_id: &RoomId,
        winner_quota: u32,
    ) -> Result<(), EngineError> {
        self.lane(room_id).await.create(winner_quota).await
    }

    /// Adds a player to the room. Returns the updated roster.
    pub async fn join(
        &self,
        room_id: &RoomId,
        name: PlayerName,
    ) -> Result<Vec<PlayerName>, EngineError> {
        self.lane(room_id).await.join(name).await
    }

    /// Removes a player from an unstarted room. Returns the updated roster.
    pub async fn leave(
        &self,
        room_id: &RoomId,
        name: PlayerName,
    ) -> Result<Vec<PlayerName>, EngineError> {
        self.lane(room_id).await.leave(name).await
    }

    /// Changes the winner quota of an unstarted room.
    pub async fn set_winner_quota(
        &self,
        room_id: &RoomId,
        winner_quota: u32,
    ) -> Result<(), EngineError> {
        self.lane(room_id).await.set_winner_quota(winner_quota).await
    }

    /// Starts the tournament and opens round 1.
    pub async fn start(&self, room_id: &RoomId) -> Result<(), EngineError> {
        self.lane(room_id).await.start().await
    }

    /// Records a hand and, if it was the last one outstanding, judges the
    /// round in the same serialized cycle.
    pub async fn submit_hand(
        &self,
        room_id: &RoomId,
        name: PlayerName,
        hand: Hand,
    ) -> Result<SubmitOutcome, EngineError> {
        self.lane(room_id).await.submit_hand(name, hand).await
    }

    /// Explicitly opens the next round.
    pub async fn advance_round(&self, room_id: &RoomId) -> Result<u32, EngineError> {
        self.lane(room_id).await.advance_round().await
    }

    // -- read-only queries (latest persisted snapshot, no lane) -----------

    /// Loads the room's current persisted state.
    pub async fn room_snapshot(&self, room_id: &RoomId) -> Result<Room, EngineError> {
        self.store
            .load(room_id)
            .await?
            .ok_or_else(|| EngineError::RoomNotFound(room_id.clone()))
    }

    /// `true` if `name` is still free in the room.
    pub async fn verify_player_name(
        &self,
        room_id: &RoomId,
        name: &PlayerName,
    ) -> Result<bool, EngineError> {
        Ok(self.room_snapshot(room_id).await?.verify_player_name(name))
    }

    /// `true` once the room's confirmed-win count equals its quota.
    pub async fn is_completed(&self, room_id: &RoomId) -> Result<bool, EngineError> {
        Ok(self.room_snapshot(room_id).await?.is_completed())
    }

    /// Names with confirmed Win status, in join order.
    pub async fn winner_names(&self, room_id: &RoomId) -> Result<Vec<PlayerName>, EngineError> {
        Ok(self.room_snapshot(room_id).await?.winner_names())
    }

    /// Number of lanes currently alive.
    pub async fn lane_count(&self) -> usize {
        self.lanes.lock().await.len()
    }

    /// Returns the room's lane, spawning it on first use.
    async fn lane(&self, room_id: &RoomId) -> LaneHandle {
        let mut lanes = self.lanes.lock().await;
        lanes
            .entry(room_id.clone())
            .or_insert_with(|| {
                spawn_lane(
                    room_id.clone(),
                    Arc::clone(&self.store),
                    self.config.lane_mailbox_size,
                )
            })
            .clone()
    }
}
