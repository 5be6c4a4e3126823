use std::sync::Arc;

use seabattle::{FleetSpec, Phase, SessionRegistry, ShotOutcome, Side};

#[tokio::test]
async fn test_sessions_are_kept_per_player() {
    let registry = SessionRegistry::new(FleetSpec::default());
    let alice = registry.start_seeded(1u64, 100).await.unwrap();
    let bob = registry.start_seeded(2u64, 200).await.unwrap();
    assert_eq!(registry.len().await, 2);

    alice.lock().await.place_human_fleet().unwrap();
    assert_eq!(alice.lock().await.phase(), Phase::Shooting);
    assert_eq!(bob.lock().await.phase(), Phase::Setup);

    let again = registry.get(&1).await.unwrap();
    assert!(Arc::ptr_eq(&alice, &again));
    assert!(registry.get(&3).await.is_none());
}

#[tokio::test]
async fn test_start_replaces_previous_game() {
    let registry = SessionRegistry::new(FleetSpec::default());
    let first = registry.start_seeded("chat", 1).await.unwrap();
    first.lock().await.place_human_fleet().unwrap();

    let second = registry.start("chat").await.unwrap();
    assert_eq!(registry.len().await, 1);
    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(second.lock().await.phase(), Phase::Setup);

    assert!(registry.remove(&"chat").await.is_some());
    assert!(registry.is_empty().await);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_moves_on_one_session_are_serialized() {
    let registry = Arc::new(SessionRegistry::new(FleetSpec::default()));
    let session = registry.start_seeded("p", 5).await.unwrap();
    session.lock().await.place_human_fleet().unwrap();

    let mut tasks = Vec::new();
    for row in ["A", "B", "C", "D"] {
        let registry = Arc::clone(&registry);
        tasks.push(tokio::spawn(async move {
            let shared = registry.get(&"p").await.unwrap();
            let mut exchanges = 0;
            for col in 1..=10 {
                let mut session = shared.lock().await;
                if session.is_finished() {
                    break;
                }
                let outcome = session.submit_human_shot(&format!("{}{}", row, col)).unwrap();
                if matches!(outcome, ShotOutcome::Exchange(_)) {
                    exchanges += 1;
                }
            }
            exchanges
        }));
    }
    let mut total = 0;
    for task in tasks {
        total += task.await.unwrap();
    }

    let session = session.lock().await;
    assert_eq!(session.shots_fired(Side::Human), total);
    let opponent = session.shots_fired(Side::Opponent);
    assert!(opponent == total || (opponent + 1 == total && session.winner() == Some(Side::Human)));
}
