//! Replication tests.
//!
//! Peers stay in sync by exchanging snapshots or replaying action logs.
//! These tests check that both paths reproduce the same state, and that
//! undo restores exact earlier states.

use spice_road::core::{Action, GameConfig, GameRng, PlayerId, SnapshotError};
use spice_road::session::{GameSession, GameSnapshot, HISTORY_CAPACITY};
use spice_road::ReplayError;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Pick a legal action, never cancelling a pending choice.
fn pick(session: &GameSession, rng: &mut GameRng) -> Option<Action> {
    let actions: Vec<Action> = session
        .legal_actions()
        .into_iter()
        .filter(|a| *a != Action::CancelPending)
        .collect();
    rng.choose(&actions).cloned()
}

/// Apply `steps` random legal actions.
fn play(session: &mut GameSession, rng: &mut GameRng, steps: usize) {
    for _ in 0..steps {
        if session.is_game_over() {
            break;
        }
        let Some(action) = pick(session, rng) else {
            break;
        };
        let player = session.current_player();
        let result = session.apply(player, &action);
        assert!(result.success, "{action}: {}", result.message);
    }
}

/// Test a snapshot survives the byte encoding unchanged.
#[test]
fn test_snapshot_bytes_roundtrip() {
    init_logging();
    let mut session = GameSession::setup_game(4, 2718).unwrap();
    play(&mut session, &mut GameRng::new(1), 40);

    let snapshot = session.export_snapshot();
    let bytes = snapshot.to_bytes().unwrap();
    let decoded = GameSnapshot::from_bytes(&bytes).unwrap();

    assert_eq!(decoded, snapshot);
    decoded.validate(session.catalog()).unwrap();
}

/// Test a peer that imports a snapshot stays in lockstep with the host.
#[test]
fn test_imported_peer_stays_in_lockstep() {
    init_logging();
    let mut host = GameSession::setup_game(3, 99).unwrap();
    play(&mut host, &mut GameRng::new(2), 25);

    let bytes = host.export_snapshot().to_bytes().unwrap();
    let mut peer = GameSession::setup_game(3, 5).unwrap();
    peer.import_snapshot(GameSnapshot::from_bytes(&bytes).unwrap())
        .unwrap();
    assert_eq!(peer.state(), host.state());

    let mut rng = GameRng::new(3);
    for _ in 0..30 {
        if host.is_game_over() {
            break;
        }
        let Some(action) = pick(&host, &mut rng) else {
            break;
        };
        let player = host.current_player();
        let on_host = host.apply(player, &action);
        let on_peer = peer.apply(player, &action);

        assert_eq!(on_host, on_peer);
        assert_eq!(host.state(), peer.state());
    }
}

/// Test joining from a snapshot without a local session.
#[test]
fn test_join_from_snapshot() {
    let mut host = GameSession::setup_game(2, 11).unwrap();
    play(&mut host, &mut GameRng::new(4), 10);

    let joined = GameSession::from_snapshot(host.export_snapshot()).unwrap();
    assert_eq!(joined.state(), host.state());
    assert_eq!(joined.config(), host.config());
    assert!(!joined.can_undo());
}

/// Test replaying the action log rebuilds the same state.
#[test]
fn test_replay_action_log() {
    init_logging();
    for seed in [1u64, 7, 42] {
        let mut session = GameSession::setup_game(5, seed).unwrap();
        play(&mut session, &mut GameRng::new(seed), 120);

        let replayed =
            GameSession::replay(session.config().clone(), session.action_log().iter()).unwrap();
        assert_eq!(replayed.state(), session.state());
    }
}

/// Test replay stops at the first rejected record.
#[test]
fn test_replay_rejects_tampered_log() {
    let mut session = GameSession::setup_game(2, 8).unwrap();
    assert!(session.acquire_merchant_card(0).success);
    assert!(session.next_turn().success);

    let mut records: Vec<_> = session.action_log().iter().cloned().collect();
    records[1].action = Action::Rest;

    let err = GameSession::replay(session.config().clone(), records.iter()).unwrap_err();
    match err {
        ReplayError::Rejected { index, player, .. } => {
            assert_eq!(index, 1);
            assert_eq!(player, PlayerId::new(0));
        }
        other => panic!("unexpected error: {other}"),
    }
}

/// Test a snapshot whose cards are duplicated is refused.
#[test]
fn test_corrupt_snapshot_rejected() {
    let host = GameSession::setup_game(2, 8).unwrap();
    let mut snapshot = host.export_snapshot();
    let card = snapshot.state.market.merchant_row()[0].card;
    snapshot.state.players[PlayerId::new(0)].add_to_hand(card);

    let mut peer = GameSession::setup_game(2, 8).unwrap();
    let before = peer.state().clone();
    assert!(peer.import_snapshot(snapshot).is_err());
    assert_eq!(*peer.state(), before);
}

/// Test garbage bytes decode to an error, not a panic.
#[test]
fn test_garbage_bytes_rejected() {
    assert!(matches!(
        GameSnapshot::from_bytes(&[0xff, 0x01, 0x02]),
        Err(SnapshotError::Decode(_))
    ));
}

/// Test undo walks back through exact earlier states.
#[test]
fn test_undo_restores_exact_states() {
    let mut session = GameSession::setup_game(3, 64).unwrap();
    let mut rng = GameRng::new(5);
    let mut seen = Vec::new();

    for _ in 0..6 {
        seen.push(session.state().clone());
        let action = pick(&session, &mut rng).unwrap();
        let player = session.current_player();
        assert!(session.apply(player, &action).success);
    }

    while let Some(expected) = seen.pop() {
        session.undo().unwrap();
        assert_eq!(*session.state(), expected);
    }
    assert!(!session.can_undo());
}

/// Test undo depth is bounded.
#[test]
fn test_undo_depth_bounded() {
    let mut session = GameSession::setup_game(2, 64).unwrap();
    for _ in 0..HISTORY_CAPACITY + 4 {
        assert!(session.next_turn().success);
    }

    for _ in 0..HISTORY_CAPACITY {
        assert!(session.undo().is_ok());
    }
    assert!(session.undo().is_err());
}

/// Test a game configured with a custom threshold replicates it.
#[test]
fn test_custom_config_travels_with_snapshot() {
    let config = GameConfig::builder()
        .player_count(2)
        .seed(3)
        .victory_cards_needed(2)
        .build()
        .unwrap();
    let host = GameSession::new(config).unwrap();

    let mut peer = GameSession::setup_game(2, 3).unwrap();
    peer.import_snapshot(host.export_snapshot()).unwrap();

    assert_eq!(peer.config().victory_cards_needed(), 2);
    assert_eq!(peer.state().victory_cards_needed, 2);
}
