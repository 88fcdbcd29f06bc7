//! Per-room command lane: a Tokio task that serializes load-mutate-save
//! cycles for one room.
//!
//! The lane is an actor — commands arrive through a bounded mpsc mailbox
//! and are executed strictly in FIFO order. A command that fails replies
//! with its error and the lane moves on to the next command; nothing
//! wedges the lane.

use std::sync::Arc;

use janken_protocol::{Hand, PlayerName, RoomId, SubmitOutcome};
use janken_room::Room;
use tokio::sync::{mpsc, oneshot};

use crate::{EngineError, RoomStore};

type Reply<T> = oneshot::Sender<Result<T, EngineError>>;

/// Commands a lane can execute. Each carries a reply channel the caller
/// awaits.
pub(crate) enum LaneCommand {
    Create {
        winner_quota: u32,
        reply: Reply<()>,
    },
    Join {
        name: PlayerName,
        reply: Reply<Vec<PlayerName>>,
    },
    Leave {
        name: PlayerName,
        reply: Reply<Vec<PlayerName>>,
    },
    SetWinnerQuota {
        winner_quota: u32,
        reply: Reply<()>,
    },
    Start {
        reply: Reply<()>,
    },
    SubmitHand {
        name: PlayerName,
        hand: Hand,
        reply: Reply<SubmitOutcome>,
    },
    AdvanceRound {
        reply: Reply<u32>,
    },
}

/// Handle to a running lane. Cheap to clone — just an `mpsc::Sender`.
#[derive(Clone)]
pub(crate) struct LaneHandle {
    room_id: RoomId,
    sender: mpsc::Sender<LaneCommand>,
}

impl LaneHandle {
    pub(crate) async fn create(&self, winner_quota: u32) -> Result<(), EngineError> {
        self.request(|reply| LaneCommand::Create { winner_quota, reply })
            .await
    }

    pub(crate) async fn join(&self, name: PlayerName) -> Result<Vec<PlayerName>, EngineError> {
        self.request(|reply| LaneCommand::Join { name, reply }).await
    }

    pub(crate) async fn leave(&self, name: PlayerName) -> Result<Vec<PlayerName>, EngineError> {
        self.request(|reply| LaneCommand::Leave { name, reply })
            .await
    }

    pub(crate) async fn set_winner_quota(&self, winner_quota: u32) -> Result<(), EngineError> {
        self.request(|reply| LaneCommand::SetWinnerQuota { winner_quota, reply })
            .await
    }

    pub(crate) async fn start(&self) -> Result<(), EngineError> {
        self.request(|reply| LaneCommand::Start { reply }).await
    }

    pub(crate) async fn submit_hand(
        &self,
        name: PlayerName,
        hand: Hand,
    ) -> Result<SubmitOutcome, EngineError> {
        self.request(|reply| LaneCommand::SubmitHand { name, hand, reply })
            .await
    }

    pub(crate) async fn advance_round(&self) -> Result<u32, EngineError> {
        self.request(|reply| LaneCommand::AdvanceRound { reply })
            .await
    }

    /// Sends one command and awaits its reply.
    async fn request<T>(
        &self,
        make: impl FnOnce(Reply<T>) -> LaneCommand,
    ) -> Result<T, EngineError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(make(reply_tx))
            .await
            .map_err(|_| EngineError::LaneClosed(self.room_id.clone()))?;
        reply_rx
            .await
            .map_err(|_| EngineError::LaneClosed(self.room_id.clone()))?
    }
}

/// The lane actor. Owns nothing but the room id and a store handle; the
/// room itself is fetched fresh for every command and written back
/// wholesale at the end.
struct LaneActor<S: RoomStore> {
    room_id: RoomId,
    store: Arc<S>,
    receiver: mpsc::Receiver<LaneCommand>,
}

impl<S: RoomStore> LaneActor<S> {
    async fn run(mut self) {
        tracing::debug!(room_id = %self.room_id, "command lane started");

        while let Some(cmd) = self.receiver.recv().await {
            // Replies to callers that gave up waiting are dropped silently.
            match cmd {
                LaneCommand::Create { winner_quota, reply } => {
                    let _ = reply.send(self.create(winner_quota).await);
                }
                LaneCommand::Join { name, reply } => {
                    let _ = reply.send(self.join(name).await);
                }
                LaneCommand::Leave { name, reply } => {
                    let _ = reply.send(self.leave(name).await);
                }
                LaneCommand::SetWinnerQuota { winner_quota, reply } => {
                    let _ = reply.send(
                        self.mutate(|room| room.set_winner_quota(winner_quota))
                            .await,
                    );
                }
                LaneCommand::Start { reply } => {
                    let _ = reply.send(self.mutate(Room::start).await);
                }
                LaneCommand::SubmitHand { name, hand, reply } => {
                    let _ = reply.send(self.submit_hand(name, hand).await);
                }
                LaneCommand::AdvanceRound { reply } => {
                    let _ = reply.send(self.mutate(Room::advance_round).await);
                }
            }
        }

        tracing::debug!(room_id = %self.room_id, "command lane stopped");
    }

    async fn create(&self, winner_quota: u32) -> Result<(), EngineError> {
        if self.store.load(&self.room_id).await?.is_some() {
            return Err(EngineError::RoomExists(self.room_id.clone()));
        }
        let room = Room::new(self.room_id.clone(), winner_quota)?;
        self.store.save(&room).await?;
        tracing::info!(room_id = %self.room_id, winner_quota, "room created");
        Ok(())
    }

    async fn join(&self, name: PlayerName) -> Result<Vec<PlayerName>, EngineError> {
        let mut room = self.load().await?;
        room.add_player(name.clone())?;
        self.store.save(&room).await?;
        tracing::info!(
            room_id = %self.room_id,
            %name,
            players = room.player_names().len(),
            "player joined"
        );
        Ok(room.player_names())
    }

    async fn leave(&self, name: PlayerName) -> Result<Vec<PlayerName>, EngineError> {
        let mut room = self.load().await?;
        room.remove_player(&name)?;
        self.store.save(&room).await?;
        tracing::info!(
            room_id = %self.room_id,
            %name,
            players = room.player_names().len(),
            "player left"
        );
        Ok(room.player_names())
    }

    async fn submit_hand(
        &self,
        name: PlayerName,
        hand: Hand,
    ) -> Result<SubmitOutcome, EngineError> {
        let mut room = self.load().await?;
        let chosen = room.submit_hand(&name, hand)?;
        let resolution = room.resolve_round_if_ready()?;
        self.store.save(&room).await?;
        Ok(SubmitOutcome { chosen, resolution })
    }

    /// Runs one generic load-mutate-save cycle. Nothing is saved when the
    /// mutation fails.
    async fn mutate<T>(
        &self,
        apply: impl FnOnce(&mut Room) -> Result<T, janken_room::RoomError>,
    ) -> Result<T, EngineError> {
        let mut room = self.load().await?;
        let value = apply(&mut room)?;
        self.store.save(&room).await?;
        Ok(value)
    }

    async fn load(&self) -> Result<Room, EngineError> {
        self.store
            .load(&self.room_id)
            .await?
            .ok_or_else(|| EngineError::RoomNotFound(self.room_id.clone()))
    }
}

/// Spawns a lane task for `room_id` and returns its handle.
pub(crate) fn spawn_lane<S: RoomStore>(
    room_id: RoomId,
    store: Arc<S>,
    mailbox_size: usize,
) -> LaneHandle {
    let (tx, rx) = mpsc::channel(mailbox_size);

    let actor = LaneActor {
        room_id: room_id.clone(),
        store,
        receiver: rx,
    };
    tokio::spawn(actor.run());

    LaneHandle {
        room_id,
        sender: tx,
    }
}
