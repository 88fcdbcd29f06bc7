//! The storage contract and its in-memory reference implementation.

use std::collections::HashMap;
use std::future::Future;

use janken_protocol::RoomId;
use janken_room::Room;
use tokio::sync::Mutex;

/// Failures raised by a storage backend.
///
/// Backend errors are opaque to the engine; it never retries them, it just
/// surfaces them to the caller of the failing command.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backend rejected or could not complete the operation.
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Whole-aggregate load/save contract for rooms.
///
/// The engine performs no encoding: implementations own the serialization
/// format and the storage technology. `save` overwrites the stored room
/// wholesale (last-writer-wins) and provides no compare-and-swap — the
/// engine's per-room command lanes are what make that safe within one
/// process.
pub trait RoomStore: Send + Sync + 'static {
    /// Loads a room by id. `Ok(None)` means the room does not exist.
    fn load(
        &self,
        room_id: &RoomId,
    ) -> impl Future<Output = Result<Option<Room>, StoreError>> + Send;

    /// Persists a room, overwriting any previous state.
    fn save(&self, room: &Room) -> impl Future<Output = Result<(), StoreError>> + Send;
}

/// In-memory [`RoomStore`] backed by a hash map.
///
/// The reference implementation used by tests and the demo. It mimics a
/// document store faithfully enough to matter: `load` hands out an
/// independent copy, so mutations are invisible until saved back.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rooms: Mutex<HashMap<RoomId, Room>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored rooms.
    pub async fn room_count(&self) -> usize {
        self.rooms.lock().await.len()
    }
}

impl RoomStore for MemoryStore {
    async fn load(&self, room_id: &RoomId) -> Result<Option<Room>, StoreError> {
        Ok(self.rooms.lock().await.get(room_id).cloned())
    }

    async fn save(&self, room: &Room) -> Result<(), StoreError> {
        self.rooms
            .lock()
            .await
            .insert(room.id().clone(), room.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_missing_room_is_none() {
        let store = MemoryStore::new();
        assert!(store.load(&"nope".into()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_then_load_round_trips() {
        let store = MemoryStore::new();
        let room = Room::new("R1".into(), 2).unwrap();
        store.save(&room).await.unwrap();

        let loaded = store.load(&"R1".into()).await.unwrap().unwrap();
        assert_eq!(loaded, room);
        assert_eq!(store.room_count().await, 1);
    }

    #[tokio::test]
    async fn test_loaded_copy_is_independent() {
        let store = MemoryStore::new();
        let room = Room::new("R1".into(), 2).unwrap();
        store.save(&room).await.unwrap();

        let mut copy = store.load(&"R1".into()).await.unwrap().unwrap();
        copy.add_player("alice".into()).unwrap();

        // The store is unchanged until the copy is saved back.
        let reloaded = store.load(&"R1".into()).await.unwrap().unwrap();
        assert!(reloaded.player_names().is_empty());
    }
}
