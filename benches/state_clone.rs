//! Benchmarks for the operations replication leans on.
//!
//! Undo checkpoints clone the state on every accepted action, and peers
//! exchange snapshots, so both need to stay cheap as the game grows.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use spice_road::core::{Action, GameRng};
use spice_road::session::{GameSession, GameSnapshot};

/// A 4-player session a few rounds in.
fn midgame() -> GameSession {
    let mut session = GameSession::setup_game(4, 42).unwrap();
    let mut rng = GameRng::new(7);
    for _ in 0..80 {
        let actions: Vec<Action> = session
            .legal_actions()
            .into_iter()
            .filter(|a| *a != Action::CancelPending)
            .collect();
        let Some(action) = rng.choose(&actions).cloned() else {
            break;
        };
        let player = session.current_player();
        session.apply(player, &action);
    }
    session
}

fn bench_state_clone(c: &mut Criterion) {
    let session = midgame();

    c.bench_function("state_clone", |b| {
        b.iter(|| black_box(session.state().clone()));
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let session = midgame();
    let bytes = session.export_snapshot().to_bytes().unwrap();

    c.bench_function("snapshot_encode", |b| {
        b.iter(|| black_box(session.export_snapshot().to_bytes().unwrap()));
    });

    c.bench_function("snapshot_decode_validate", |b| {
        b.iter(|| {
            let snapshot = GameSnapshot::from_bytes(black_box(&bytes)).unwrap();
            snapshot.validate(session.catalog()).unwrap();
            black_box(snapshot)
        });
    });
}

fn bench_legal_actions(c: &mut Criterion) {
    let session = midgame();

    c.bench_function("legal_actions", |b| {
        b.iter(|| black_box(session.legal_actions()));
    });
}

criterion_group!(benches, bench_state_clone, bench_snapshot, bench_legal_actions);
criterion_main!(benches);
