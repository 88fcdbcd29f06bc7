//! Console demo: runs one tournament with random hands until completion.
//!
//! Four players, quota 2. Every fighting player submits a random hand each
//! round; the last submission triggers judging, and the loop prints what
//! the notification layer would broadcast.

use std::sync::Arc;

use janken_engine::{MemoryStore, RoomEngine};
use janken_protocol::{Hand, PlayerName, RoomId, RoundResolution};
use rand::Rng;

const PLAYERS: [&str; 4] = ["alice", "bob", "carol", "dave"];
const WINNER_QUOTA: u32 = 2;

fn random_hand(rng: &mut impl Rng) -> Hand {
    match rng.random_range(0..3) {
        0 => Hand::Rock,
        1 => Hand::Paper,
        _ => Hand::Scissors,
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let engine = Arc::new(RoomEngine::new(Arc::new(MemoryStore::new())));
    let room = RoomId::from("DEMO");
    let mut rng = rand::rng();

    engine.create_room(&room, WINNER_QUOTA).await?;
    for player in PLAYERS {
        let roster = engine.join(&room, player.into()).await?;
        println!("{player} joined ({} players)", roster.len());
    }
    engine.start(&room).await?;
    println!("tournament started, quota {WINNER_QUOTA}");

    while !engine.is_completed(&room).await? {
        let snapshot = engine.room_snapshot(&room).await?;
        let round = snapshot.ledger().current().map_or(0, |r| r.index());
        let fighting = snapshot.registry().fighting_names();
        println!("-- round {round}: {} fighting --", fighting.len());

        for player in fighting {
            let hand = random_hand(&mut rng);
            println!("  {player} plays {hand}");
            let outcome = engine.submit_hand(&room, player, hand).await?;
            match outcome.resolution {
                Some(RoundResolution::Draw { next_round }) => {
                    println!("  draw! replaying as round {next_round}");
                }
                Some(RoundResolution::Settled(report)) => {
                    let show = |names: &[PlayerName]| {
                        names
                            .iter()
                            .map(PlayerName::as_str)
                            .collect::<Vec<_>>()
                            .join(", ")
                    };
                    println!("  round winners: [{}]", show(&report.round_winners));
                    println!("  confirmed wins: [{}]", show(&report.winners));
                    println!("  confirmed losses: [{}]", show(&report.losers));
                }
                None => {}
            }
        }
    }

    let winners = engine.winner_names(&room).await?;
    println!(
        "tournament complete, winners: {:?}",
        winners.iter().map(PlayerName::as_str).collect::<Vec<_>>()
    );
    Ok(())
}
