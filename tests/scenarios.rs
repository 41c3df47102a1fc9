//! End-to-end runs through the public API

use std::collections::HashSet;

use trencher_runner::Tuning;
use trencher_runner::persistence::MemoryStorage;
use trencher_runner::audio::SilentAudio;
use trencher_runner::sim::{
    Dice, GameLoop, GamePhase, GameStore, Lane, Obstacle, ObstacleKind, Spawner, TickOutcome,
    Token,
};

const FRAME: f64 = 1.0 / 60.0;

/// Draws a fixed sequence, then repeats its last value
struct Scripted(Vec<f64>);

impl Dice for Scripted {
    fn unit(&mut self) -> f64 {
        if self.0.len() > 1 {
            self.0.remove(0)
        } else {
            self.0.first().copied().unwrap_or(0.0)
        }
    }
}

fn quick_start() -> Tuning {
    Tuning {
        tick_warmup_frames: 0,
        spawn_warmup_frames: 0,
        ..Tuning::default()
    }
}

#[test]
fn obstacle_in_lane_ends_the_run() {
    let mut store = GameStore::headless(quick_start());
    store.start_run();
    let ahead = store.player().position + 10.0;
    store.spawn_obstacle(Obstacle {
        id: "obstacle-0".into(),
        kind: ObstacleKind::RedCandle,
        lane: store.player().lane,
        position: ahead,
    });

    let mut game_loop = GameLoop::new();
    let mut outcome = TickOutcome::Idle;
    for _ in 0..1000 {
        outcome = game_loop.tick(&mut store, FRAME);
        if store.phase() != GamePhase::Playing {
            break;
        }
    }

    assert_eq!(outcome, TickOutcome::Died(ObstacleKind::RedCandle));
    assert_eq!(store.phase(), GamePhase::GameOver);
    assert_eq!(
        store.state().death_message,
        ObstacleKind::RedCandle.death_message()
    );
    // Died on the way in, never passed through
    assert!(store.player().position < ahead);
}

#[test]
fn three_tokens_make_exactly_point_three() {
    let storage = MemoryStorage::with_raw("0.2");
    let mut store = GameStore::new(
        quick_start(),
        Box::new(storage.clone()),
        Box::new(SilentAudio),
    );
    store.start_run();
    assert_eq!(store.player().bag, 0.0);

    for i in 0..3 {
        let id = format!("token-{i}");
        store.spawn_token(Token {
            id: id.clone(),
            lane: Lane::Center,
            position: 30.0,
        });
        assert!(store.collect_token(&id));
    }

    assert_eq!(store.player().bag, 0.3);
    assert_eq!(store.high_score(), 0.3);
    assert_eq!(storage.raw().as_deref(), Some("0.3"));
}

#[test]
fn speed_ramp_settles_on_max() {
    let mut store = GameStore::headless(Tuning::default());
    store.start_run();
    assert_eq!(store.player().speed, store.tuning().initial_speed);
    for _ in 0..10_000 {
        store.increase_speed();
    }
    assert_eq!(store.player().speed, store.tuning().max_speed);
}

#[test]
fn forced_cluster_spans_lanes() {
    let mut store = GameStore::headless(quick_start());
    store.start_run();
    // Obstacle lane and kind, then cluster roll, size roll and lane roll
    let mut spawner = Spawner::with_dice(Scripted(vec![0.0, 0.0, 0.1, 0.4, 0.5]));
    let report = spawner.update(&mut store);

    let tuning = store.tuning().clone();
    let tokens = &store.state().tokens;
    assert_eq!(report.tokens, tokens.len());
    assert!((3..=5).contains(&tokens.len()));

    let lanes: HashSet<Lane> = tokens.iter().map(|t| t.lane).collect();
    assert!(lanes.len() >= 2);

    let base = store.player().position + tuning.token_initial_offset + tuning.token_spacing;
    for (i, token) in tokens.iter().enumerate() {
        let offset = if i % 2 == 0 { 0.0 } else { tuning.cluster_stagger };
        assert!((token.position - (base + offset)).abs() < 1e-4);
    }
}

#[test]
fn game_over_keeps_best_across_runs() {
    let storage = MemoryStorage::new();
    let mut store = GameStore::new(
        quick_start(),
        Box::new(storage.clone()),
        Box::new(SilentAudio),
    );
    store.start_run();
    for i in 0..5 {
        let id = format!("token-{i}");
        store.spawn_token(Token {
            id: id.clone(),
            lane: Lane::Left,
            position: 30.0,
        });
        store.collect_token(&id);
    }
    store.trigger_game_over(Some(ObstacleKind::SellWall));
    assert_eq!(store.high_score(), 0.5);

    store.start_run();
    store.trigger_game_over(None);
    assert_eq!(store.high_score(), 0.5);
    assert!(!store.last_run().is_some_and(|run| run.new_best));

    // A fresh store reads the persisted value back
    let reloaded = GameStore::new(quick_start(), Box::new(storage), Box::new(SilentAudio));
    assert_eq!(reloaded.high_score(), 0.5);
}
