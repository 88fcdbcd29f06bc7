//! Integration tests for the room engine and its command lanes.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use janken_engine::{EngineError, MemoryStore, RoomEngine, RoomStore, StoreError};
use janken_protocol::{Hand, PlayerName, RoomId, RoundResolution};
use janken_room::{Room, RoomError};

fn rid(s: &str) -> RoomId {
    RoomId::from(s)
}

fn name(s: &str) -> PlayerName {
    PlayerName::from(s)
}

async fn engine_with_room(
    room_id: &RoomId,
    players: &[&str],
    quota: u32,
) -> Arc<RoomEngine<MemoryStore>> {
    let engine = Arc::new(RoomEngine::new(Arc::new(MemoryStore::new())));
    engine.create_room(room_id, quota).await.unwrap();
    for p in players {
        engine.join(room_id, (*p).into()).await.unwrap();
    }
    engine
}

#[tokio::test]
async fn test_create_join_start_submit_flow() {
    let room = rid("R1");
    let engine = engine_with_room(&room, &["A", "B"], 1).await;
    engine.start(&room).await.unwrap();

    let outcome = engine.submit_hand(&room, name("A"), Hand::Rock).await.unwrap();
    assert_eq!(outcome.chosen, vec![name("A")]);
    assert!(outcome.resolution.is_none());

    let outcome = engine
        .submit_hand(&room, name("B"), Hand::Scissors)
        .await
        .unwrap();
    let Some(RoundResolution::Settled(report)) = outcome.resolution else {
        panic!("expected a settled round");
    };
    assert_eq!(report.round_winners, vec![name("A")]);
    assert!(report.completed);

    assert!(engine.is_completed(&room).await.unwrap());
    assert_eq!(engine.winner_names(&room).await.unwrap(), vec![name("A")]);
}

#[tokio::test]
async fn test_draw_opens_next_round_through_engine() {
    let room = rid("R1");
    let engine = engine_with_room(&room, &["A", "B"], 1).await;
    engine.start(&room).await.unwrap();

    engine.submit_hand(&room, name("A"), Hand::Paper).await.unwrap();
    let outcome = engine.submit_hand(&room, name("B"), Hand::Paper).await.unwrap();
    assert_eq!(
        outcome.resolution,
        Some(RoundResolution::Draw { next_round: 2 })
    );

    let snapshot = engine.room_snapshot(&room).await.unwrap();
    assert_eq!(snapshot.ledger().round_count(), 2);
    assert_eq!(snapshot.registry().fighting_count(), 2);
}

#[tokio::test]
async fn test_create_existing_room_fails() {
    let room = rid("R1");
    let engine = engine_with_room(&room, &[], 1).await;
    let err = engine.create_room(&room, 2).await.unwrap_err();
    assert!(matches!(err, EngineError::RoomExists(_)));
}

#[tokio::test]
async fn test_commands_on_missing_room_fail() {
    let engine = Arc::new(RoomEngine::new(Arc::new(MemoryStore::new())));
    let missing = rid("nope");

    let err = engine.join(&missing, name("A")).await.unwrap_err();
    assert!(matches!(err, EngineError::RoomNotFound(_)));

    let err = engine.room_snapshot(&missing).await.unwrap_err();
    assert!(matches!(err, EngineError::RoomNotFound(_)));
}

#[tokio::test]
async fn test_verify_player_name_query() {
    let room = rid("R1");
    let engine = engine_with_room(&room, &["A"], 1).await;

    assert!(!engine.verify_player_name(&room, &name("A")).await.unwrap());
    assert!(engine.verify_player_name(&room, &name("B")).await.unwrap());
}

#[tokio::test]
async fn test_concurrent_submissions_all_recorded() {
    // Five players, four submitting concurrently (the fifth holds back so
    // the round is never judged mid-test). Without the per-room lane the
    // independently loaded copies would overwrite each other.
    let room = rid("R1");
    let players = ["A", "B", "C", "D", "E"];
    let engine = engine_with_room(&room, &players, 1).await;
    engine.start(&room).await.unwrap();

    let mut handles = Vec::new();
    for p in ["A", "B", "C", "D"] {
        let engine = Arc::clone(&engine);
        let room = room.clone();
        handles.push(tokio::spawn(async move {
            engine.submit_hand(&room, name(p), Hand::Rock).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let snapshot = engine.room_snapshot(&room).await.unwrap();
    let round = snapshot.ledger().current().unwrap();
    assert_eq!(round.submissions().len(), 4, "a submission was lost");
    assert_eq!(snapshot.chosen_names().len(), 4);
}

#[tokio::test]
async fn test_failed_command_does_not_block_lane() {
    let room = rid("R1");
    let engine = engine_with_room(&room, &["A", "B"], 1).await;
    engine.start(&room).await.unwrap();

    let err = engine
        .submit_hand(&room, name("ghost"), Hand::Rock)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        EngineError::Room(RoomError::UnknownPlayer(_))
    ));

    // The lane keeps serving commands after the failure.
    let outcome = engine.submit_hand(&room, name("A"), Hand::Rock).await.unwrap();
    assert_eq!(outcome.chosen, vec![name("A")]);
}

#[tokio::test]
async fn test_rooms_run_independently() {
    let engine = Arc::new(RoomEngine::new(Arc::new(MemoryStore::new())));
    let r1 = rid("R1");
    let r2 = rid("R2");
    engine.create_room(&r1, 1).await.unwrap();
    engine.create_room(&r2, 2).await.unwrap();

    for r in [&r1, &r2] {
        engine.join(r, name("A")).await.unwrap();
        engine.join(r, name("B")).await.unwrap();
        engine.start(r).await.unwrap();
    }
    engine.submit_hand(&r1, name("A"), Hand::Rock).await.unwrap();

    // R1's pending round does not leak into R2.
    let s1 = engine.room_snapshot(&r1).await.unwrap();
    let s2 = engine.room_snapshot(&r2).await.unwrap();
    assert_eq!(s1.chosen_names().len(), 1);
    assert_eq!(s2.chosen_names().len(), 0);
    assert_eq!(engine.lane_count().await, 2);
}

#[tokio::test]
async fn test_advance_round_succeeds_once_no_round_is_open() {
    let room = rid("R1");
    let engine = engine_with_room(&room, &["A", "B"], 1).await;
    engine.start(&room).await.unwrap();

    // While round 1 is open and unjudged, advancing is rejected.
    let err = engine.advance_round(&room).await.unwrap_err();
    assert!(matches!(
        err,
        EngineError::Room(RoomError::RoundStillOpen(1))
    ));

    // Fill the quota; the settled round closes without a successor.
    engine.submit_hand(&room, name("A"), Hand::Rock).await.unwrap();
    engine
        .submit_hand(&room, name("B"), Hand::Scissors)
        .await
        .unwrap();
    assert!(engine.is_completed(&room).await.unwrap());

    // Now the explicit advance opens round 2 and persists it.
    assert_eq!(engine.advance_round(&room).await.unwrap(), 2);
    let snapshot = engine.room_snapshot(&room).await.unwrap();
    assert_eq!(snapshot.ledger().round_count(), 2);
    assert!(snapshot.ledger().open_round().is_some());
}

#[tokio::test]
async fn test_quota_update_before_start_only() {
    let room = rid("R1");
    let engine = engine_with_room(&room, &["A", "B"], 1).await;

    engine.set_winner_quota(&room, 2).await.unwrap();
    engine.start(&room).await.unwrap();

    let err = engine.set_winner_quota(&room, 1).await.unwrap_err();
    assert!(matches!(
        err,
        EngineError::Room(RoomError::AlreadyStarted)
    ));
    assert_eq!(engine.room_snapshot(&room).await.unwrap().winner_quota(), 2);
}

// -------------------------------------------------------------------------
// Store failure handling
// -------------------------------------------------------------------------

/// Wraps a `MemoryStore` and fails every save while the flag is set.
struct FailingSaves {
    inner: MemoryStore,
    fail: AtomicBool,
}

impl FailingSaves {
    fn new() -> Self {
        Self {
            inner: MemoryStore::new(),
            fail: AtomicBool::new(false),
        }
    }
}

impl RoomStore for FailingSaves {
    fn load(
        &self,
        room_id: &RoomId,
    ) -> impl Future<Output = Result<Option<Room>, StoreError>> + Send {
        self.inner.load(room_id)
    }

    async fn save(&self, room: &Room) -> Result<(), StoreError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("save rejected".into()));
        }
        self.inner.save(room).await
    }
}

#[tokio::test]
async fn test_store_failure_surfaces_and_room_is_unchanged() {
    let store = Arc::new(FailingSaves::new());
    let engine = RoomEngine::new(Arc::clone(&store));
    let room = rid("R1");
    engine.create_room(&room, 1).await.unwrap();
    engine.join(&room, name("A")).await.unwrap();
    engine.join(&room, name("B")).await.unwrap();
    engine.start(&room).await.unwrap();

    store.fail.store(true, Ordering::SeqCst);
    let err = engine.submit_hand(&room, name("A"), Hand::Rock).await.unwrap_err();
    assert!(matches!(err, EngineError::Store(_)));

    // The failed cycle saved nothing; the lane still works afterwards.
    store.fail.store(false, Ordering::SeqCst);
    let snapshot = engine.room_snapshot(&room).await.unwrap();
    assert_eq!(snapshot.chosen_names().len(), 0);
    engine.submit_hand(&room, name("A"), Hand::Rock).await.unwrap();
}
