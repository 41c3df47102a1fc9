//! Procedural obstacle and token placement
//!
//! Two cursors trail the lookahead window: one for obstacles, spaced tighter
//! as speed rises, and one for token trigger points at a fixed spacing. The
//! spawner only reads the store and writes through `spawn_obstacle` /
//! `spawn_token`; its cursors are private and reset on every new run.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::guard::PlayerReading;
use super::lane::Lane;
use super::state::{GamePhase, Obstacle, ObstacleKind, Token};
use super::store::GameStore;
use crate::tuning::Tuning;

/// Source of uniform draws in `[0, 1)`
pub trait Dice {
    fn unit(&mut self) -> f64;
}

impl Dice for Pcg32 {
    fn unit(&mut self) -> f64 {
        self.random::<f64>()
    }
}

/// Frames between diagnostic log lines (~2 seconds)
const DEBUG_LOG_INTERVAL: u64 = 120;

/// What one `update` call placed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpawnReport {
    pub obstacles: usize,
    pub tokens: usize,
}

#[derive(Debug)]
pub struct Spawner<D = Pcg32> {
    dice: D,
    /// Position of the last obstacle
    last_obstacle: f64,
    /// Position of the last token trigger point
    last_token: f64,
    obstacle_counter: u64,
    token_counter: u64,
    /// Run the cursors belong to
    run_id: Option<u64>,
    /// Playing frames seen this run
    frames: u32,
    debug_frames: u64,
}

impl Spawner<Pcg32> {
    pub fn seeded(seed: u64) -> Self {
        Self::with_dice(Pcg32::seed_from_u64(seed))
    }
}

impl<D: Dice> Spawner<D> {
    pub fn with_dice(dice: D) -> Self {
        Self {
            dice,
            last_obstacle: 0.0,
            last_token: 0.0,
            obstacle_counter: 0,
            token_counter: 0,
            run_id: None,
            frames: 0,
            debug_frames: 0,
        }
    }

    pub fn last_obstacle(&self) -> f64 {
        self.last_obstacle
    }

    pub fn last_token(&self) -> f64 {
        self.last_token
    }

    /// Per-frame entry point
    pub fn update(&mut self, store: &mut GameStore) -> SpawnReport {
        if store.phase() != GamePhase::Playing {
            return SpawnReport::default();
        }

        let reading = match PlayerReading::read(store.player()) {
            Ok(reading) => reading,
            Err(e) => {
                log::warn!("Spawner skipping frame: {e}");
                return SpawnReport::default();
            }
        };

        let run_id = store.state().run_id;
        if self.run_id != Some(run_id) {
            self.begin_run(run_id, reading.position, store.tuning());
        }

        self.frames = self.frames.saturating_add(1);
        if self.frames < store.tuning().spawn_warmup_frames {
            return SpawnReport::default();
        }

        let tuning = store.tuning().clone();
        self.log_diagnostics(store, &reading, &tuning);

        SpawnReport {
            obstacles: self.spawn_obstacles(store, &reading, &tuning),
            tokens: self.spawn_tokens(store, &reading, &tuning),
        }
    }

    fn begin_run(&mut self, run_id: u64, position: f64, tuning: &Tuning) {
        self.run_id = Some(run_id);
        self.frames = 0;
        self.last_obstacle = position + tuning.obstacle_initial_offset;
        self.last_token = position + tuning.token_initial_offset;
        log::debug!(
            "Spawner cursors reset for run {run_id}: obstacles at {}, tokens at {}",
            self.last_obstacle,
            self.last_token
        );
    }

    fn log_diagnostics(&mut self, store: &GameStore, reading: &PlayerReading, tuning: &Tuning) {
        self.debug_frames += 1;
        if self.debug_frames % DEBUG_LOG_INTERVAL == 0 {
            let spacing = tuning.obstacle_spacing(reading.speed);
            log::debug!(
                "Spawner: position={:.1} speed={:.4} last_obstacle={:.1} spacing={:.1} due={} live_obstacles={}",
                reading.position,
                reading.speed,
                self.last_obstacle,
                spacing,
                reading.position + tuning.spawn_lookahead > self.last_obstacle + spacing,
                store.state().obstacles.len()
            );
        }
    }

    fn spawn_obstacles(
        &mut self,
        store: &mut GameStore,
        reading: &PlayerReading,
        tuning: &Tuning,
    ) -> usize {
        self.last_obstacle = self.last_obstacle.max(reading.position);

        let spacing = tuning.obstacle_spacing(reading.speed);
        let horizon = reading.position + tuning.spawn_lookahead;
        if horizon <= self.last_obstacle + spacing {
            return 0;
        }

        // Catch up if the cursor fell far behind the window
        let position = (self.last_obstacle + spacing).max(horizon - tuning.obstacle_late_margin);
        let lane = self.roll_lane();
        let Some(kind) = self.roll_kind(tuning) else {
            log::warn!("Obstacle weight table is empty, nothing to spawn");
            return 0;
        };

        let obstacle = Obstacle {
            id: format!("obstacle-{}", self.obstacle_counter),
            kind,
            lane,
            position,
        };
        self.obstacle_counter += 1;
        log::debug!("Spawning {kind:?} in {lane:?} at {position:.1}");
        store.spawn_obstacle(obstacle);
        self.last_obstacle = position;
        1
    }

    fn spawn_tokens(
        &mut self,
        store: &mut GameStore,
        reading: &PlayerReading,
        tuning: &Tuning,
    ) -> usize {
        self.last_token = self.last_token.max(reading.position);

        let horizon = reading.position + tuning.spawn_lookahead;
        if horizon <= self.last_token + tuning.token_spacing {
            return 0;
        }

        let position = self.last_token + tuning.token_spacing;
        let spawned = if self.dice.unit() < tuning.cluster_probability {
            self.spawn_cluster(store, position, tuning)
        } else {
            0
        };
        self.last_token = position;
        spawned
    }

    /// Place a staggered cluster starting at `position`. Every two tokens
    /// step one lane to the right (wrapping); every second token sits
    /// `cluster_stagger` further down the track.
    pub fn spawn_cluster(
        &mut self,
        store: &mut GameStore,
        position: f64,
        tuning: &Tuning,
    ) -> usize {
        let span = tuning.cluster_max_tokens.saturating_sub(tuning.cluster_min_tokens) + 1;
        let extra = ((self.dice.unit() * span as f64) as u32).min(span - 1);
        let count = tuning.cluster_min_tokens + extra;
        let first_lane = self.roll_lane();

        for i in 0..count as usize {
            let token = Token {
                id: format!("token-{}", self.token_counter),
                lane: first_lane.wrapping_add(i / 2),
                position: position + (i % 2) as f64 * tuning.cluster_stagger,
            };
            self.token_counter += 1;
            store.spawn_token(token);
        }
        log::debug!("Spawned {count} tokens from {first_lane:?} at {position:.1}");
        count as usize
    }

    fn roll_lane(&mut self) -> Lane {
        let index = ((self.dice.unit() * 3.0) as usize).min(2);
        Lane::from_index(index).unwrap_or_default()
    }

    /// Weighted pick over the active table
    fn roll_kind(&mut self, tuning: &Tuning) -> Option<ObstacleKind> {
        let total = tuning.total_obstacle_weight();
        if total <= 0.0 {
            return None;
        }
        let mut roll = self.dice.unit() * total;
        let mut fallback = None;
        for entry in tuning.obstacle_weights.iter().filter(|w| w.weight > 0.0) {
            fallback.get_or_insert(entry.kind);
            roll -= entry.weight;
            if roll <= 0.0 {
                return Some(entry.kind);
            }
        }
        fallback
    }
}
