//! Per-frame simulation tick
//!
//! Advances the player, steps the speed ramp, resolves collisions and
//! periodically sweeps entities that fell behind. Only runs while the store
//! is `Playing`; ending a run stops it on the very next frame.

use super::collision::{collides_with_obstacle, collides_with_token};
use super::guard::{self, FrameReading, Forward, Rejected};
use super::state::{GamePhase, ObstacleKind};
use super::store::GameStore;

/// What a single tick did
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// Not playing, nothing simulated
    Idle,
    /// Still inside the start-of-run settle window
    WarmingUp,
    /// An input failed validation; the frame was dropped
    Skipped(Rejected),
    /// The player hit an obstacle and the run ended
    Died(ObstacleKind),
    Advanced {
        moved: f64,
        collected: usize,
        swept: usize,
    },
}

/// Frame-driven game loop. Counters are private and reset with each run.
#[derive(Debug, Default)]
pub struct GameLoop {
    run_id: Option<u64>,
    /// Playing frames seen this run
    warmup: u32,
    /// Ticks simulated this run
    ticks: u64,
}

impl GameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ticks simulated in the current run
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Advance one frame of `delta` seconds
    pub fn tick(&mut self, store: &mut GameStore, delta: f64) -> TickOutcome {
        if store.phase() != GamePhase::Playing {
            return TickOutcome::Idle;
        }

        let run_id = store.state().run_id;
        if self.run_id != Some(run_id) {
            self.run_id = Some(run_id);
            self.warmup = 0;
            self.ticks = 0;
        }

        self.warmup = self.warmup.saturating_add(1);
        if self.warmup < store.tuning().tick_warmup_frames {
            return TickOutcome::WarmingUp;
        }

        let max_delta = store.tuning().max_frame_delta;
        let reading = match FrameReading::read(store.player(), delta, max_delta) {
            Ok(reading) => reading,
            Err(e) => {
                log::warn!("Skipping frame: {e}");
                return TickOutcome::Skipped(e);
            }
        };

        // Speed is a fraction of the reference rate, so movement per second
        // is independent of the real frame rate
        let displacement =
            reading.player.speed * store.tuning().reference_frame_rate * reading.delta;
        let moved = match Forward::new(displacement) {
            Ok(forward) => {
                store.update_position(forward);
                forward.get()
            }
            Err(e) => {
                log::warn!("Skipping movement: {e}");
                0.0
            }
        };

        store.increase_speed();

        if let Some(kind) = first_obstacle_hit(store) {
            store.trigger_game_over(Some(kind));
            return TickOutcome::Died(kind);
        }

        let mut collected = 0;
        for id in token_hits(store) {
            if store.collect_token(&id) {
                collected += 1;
            }
        }

        self.ticks += 1;
        let swept = self.maintain(store);

        TickOutcome::Advanced {
            moved,
            collected,
            swept,
        }
    }

    /// Low-frequency cleanup, once every `cleanup_interval` ticks
    fn maintain(&mut self, store: &mut GameStore) -> usize {
        let interval = u64::from(store.tuning().cleanup_interval);
        if interval == 0 || self.ticks % interval != 0 {
            return 0;
        }
        if let Err(e) = guard::finite("player position", store.player().position) {
            log::warn!("Skipping cleanup: {e}");
            return 0;
        }
        let behind = store.tuning().cleanup_behind_distance;
        let swept = store.cleanup_obstacles(behind) + store.cleanup_tokens(behind);
        if swept > 0 {
            log::trace!("Swept {swept} entities behind the player");
        }
        swept
    }
}

/// Kind of the first live obstacle the player overlaps
fn first_obstacle_hit(store: &GameStore) -> Option<ObstacleKind> {
    let player = store.player();
    store.state().obstacles.iter().find_map(|obstacle| {
        if let Err(e) = guard::finite("obstacle position", obstacle.position) {
            log::warn!("Collision check failed for {}: {e}", obstacle.id);
            return None;
        }
        collides_with_obstacle(player, obstacle).then_some(obstacle.kind)
    })
}

/// Ids of every live token the player overlaps
fn token_hits(store: &GameStore) -> Vec<String> {
    let player = store.player();
    store
        .state()
        .tokens
        .iter()
        .filter(|token| match guard::finite("token position", token.position) {
            Ok(_) => collides_with_token(player, token),
            Err(e) => {
                log::warn!("Token check failed for {}: {e}", token.id);
                false
            }
        })
        .map(|token| token.id.clone())
        .collect()
}
