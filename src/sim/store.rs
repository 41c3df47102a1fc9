//! Game state store
//!
//! Single owner of the run state. All writes go through the methods here;
//! each write bumps the revision and notifies subscribers. The game loop and
//! spawner read through `state()` instead of subscribing.
//!
//! Run-only writes (position, speed, entity collections) are meant for the
//! `Playing` phase. The store does not check this; its frame-driven callers
//! gate on the phase before touching it.

use super::guard::Forward;
use super::lane::LaneShift;
use super::state::{
    GamePhase, GameState, Obstacle, ObstacleKind, Player, RunSummary, Snapshot, Token,
    death_message,
};
use crate::audio::{AudioSink, SilentAudio, SoundEffect};
use crate::highscores::HighScore;
use crate::persistence::{MemoryStorage, ScoreStorage};
use crate::round_tenths;
use crate::tuning::Tuning;

/// Handle returned by `subscribe`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&GameState)>;

pub struct GameStore {
    state: GameState,
    tuning: Tuning,
    high_score: HighScore,
    audio: Box<dyn AudioSink>,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u64,
    revision: u64,
    last_run: Option<RunSummary>,
    /// Best bag when the current run started
    best_at_start: f64,
}

impl std::fmt::Debug for GameStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameStore")
            .field("state", &self.state)
            .field("high_score", &self.high_score)
            .field("revision", &self.revision)
            .finish_non_exhaustive()
    }
}

impl GameStore {
    /// Build a store, loading the best bag from `storage`
    pub fn new(tuning: Tuning, storage: Box<dyn ScoreStorage>, audio: Box<dyn AudioSink>) -> Self {
        Self {
            state: GameState::new(tuning.initial_speed),
            high_score: HighScore::load(storage),
            tuning,
            audio,
            listeners: Vec::new(),
            next_listener: 0,
            revision: 0,
            last_run: None,
            best_at_start: 0.0,
        }
    }

    /// Store with in-memory storage and no sound
    pub fn headless(tuning: Tuning) -> Self {
        Self::new(tuning, Box::new(MemoryStorage::new()), Box::new(SilentAudio))
    }

    // === Reads ===

    /// Imperative read path for per-frame consumers
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn player(&self) -> &Player {
        &self.state.player
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn high_score(&self) -> f64 {
        self.high_score.best()
    }

    /// Summary of the most recent finished run
    pub fn last_run(&self) -> Option<&RunSummary> {
        self.last_run.as_ref()
    }

    /// Number of writes so far. Unchanged means nothing to redraw.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Owned copy of everything a renderer or HUD shows
    pub fn snapshot(&self) -> Snapshot {
        let state = &self.state;
        Snapshot {
            game_state: state.phase,
            lane: state.player.lane,
            speed: state.player.speed,
            player_position: state.player.position,
            distance: state.player.distance,
            bag: state.player.bag,
            active_obstacles: state.obstacles.clone(),
            active_tokens: state.tokens.clone(),
            death_message: state.death_message.clone(),
            high_score: self.high_score.best(),
        }
    }

    // === Change notification ===

    /// Call `listener` after every write
    pub fn subscribe(&mut self, listener: impl FnMut(&GameState) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: ListenerId) {
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
    }

    fn commit(&mut self) {
        self.revision += 1;
        for (_, listener) in &mut self.listeners {
            listener(&self.state);
        }
    }

    // === Run lifecycle ===

    /// Reset run fields and enter `Playing`
    pub fn start_run(&mut self) {
        self.reset_run(self.tuning.start_position);
        self.state.phase = GamePhase::Playing;
        self.state.run_id += 1;
        self.best_at_start = self.high_score.best();
        log::info!("Run {} started", self.state.run_id);
        self.audio.start_loop();
        self.commit();
    }

    /// Reset run fields and return to the title screen
    pub fn reset_to_menu(&mut self) {
        self.reset_run(0.0);
        self.state.phase = GamePhase::Menu;
        log::info!("Back to menu");
        self.audio.stop_loop();
        self.commit();
    }

    fn reset_run(&mut self, position: f64) {
        self.state.player = Player::new(self.tuning.initial_speed, position);
        self.state.obstacles.clear();
        self.state.tokens.clear();
        self.state.death_message.clear();
    }

    /// End the run. `None` reports the generic reason.
    pub fn trigger_game_over(&mut self, cause: Option<ObstacleKind>) {
        let message = death_message(cause);
        let bag = self.state.player.bag;
        self.high_score.submit(bag);
        let new_best = bag > self.best_at_start;

        self.state.phase = GamePhase::GameOver;
        self.state.death_message = message.to_string();
        self.last_run = Some(RunSummary {
            bag,
            distance: self.state.player.distance,
            cause,
            message: message.to_string(),
            new_best,
        });
        log::info!(
            "Run {} over: {message} (bag {bag}, distance {:.1}{})",
            self.state.run_id,
            self.state.player.distance,
            if new_best { ", new best" } else { "" }
        );
        self.audio.stop_loop();
        self.commit();
    }

    // === Player ===

    /// Move one lane; nothing is written at the edges
    pub fn switch_lane(&mut self, shift: LaneShift) {
        let lane = self.state.player.lane;
        let target = lane.shifted(shift);
        if target != lane {
            self.state.player.lane = target;
            self.commit();
        }
    }

    /// Step the FOMO curve; a no-op at the cap
    pub fn increase_speed(&mut self) {
        let player = &mut self.state.player;
        if player.speed < self.tuning.max_speed {
            player.speed = (player.speed + self.tuning.speed_increment).min(self.tuning.max_speed);
            self.commit();
        }
    }

    /// Advance position and distance together
    pub fn update_position(&mut self, forward: Forward) {
        let player = &mut self.state.player;
        player.position += forward.get();
        player.distance += forward.get();
        self.commit();
    }

    /// Collect a live token. Returns false (and writes nothing) for unknown ids.
    pub fn collect_token(&mut self, token_id: &str) -> bool {
        let Some(index) = self.state.tokens.iter().position(|t| t.id == token_id) else {
            return false;
        };
        self.state.tokens.remove(index);

        let bag = round_tenths(self.state.player.bag + self.tuning.token_value);
        self.state.player.bag = bag;
        self.audio.play(SoundEffect::Coin);
        if self.high_score.submit(bag) {
            log::debug!("New best bag {bag}");
        }
        self.commit();
        true
    }

    // === Entities ===

    /// Append an obstacle. Duplicate ids are refused.
    pub fn spawn_obstacle(&mut self, obstacle: Obstacle) -> bool {
        if self.state.obstacles.iter().any(|o| o.id == obstacle.id) {
            log::warn!("Refusing duplicate obstacle id {}", obstacle.id);
            return false;
        }
        self.state.obstacles.push(obstacle);
        self.commit();
        true
    }

    /// Append a token. Duplicate ids are refused.
    pub fn spawn_token(&mut self, token: Token) -> bool {
        if self.state.tokens.iter().any(|t| t.id == token.id) {
            log::warn!("Refusing duplicate token id {}", token.id);
            return false;
        }
        self.state.tokens.push(token);
        self.commit();
        true
    }

    /// Drop one obstacle by id. Returns false for unknown ids.
    pub fn remove_obstacle(&mut self, obstacle_id: &str) -> bool {
        let before = self.state.obstacles.len();
        self.state.obstacles.retain(|o| o.id != obstacle_id);
        let removed = self.state.obstacles.len() != before;
        if removed {
            self.commit();
        }
        removed
    }

    /// Drop one token by id without scoring it
    pub fn remove_token(&mut self, token_id: &str) -> bool {
        let before = self.state.tokens.len();
        self.state.tokens.retain(|t| t.id != token_id);
        let removed = self.state.tokens.len() != before;
        if removed {
            self.commit();
        }
        removed
    }

    /// Drop obstacles at or beyond `behind` units behind the player.
    /// Returns how many went; writes nothing when none did.
    pub fn cleanup_obstacles(&mut self, behind: f64) -> usize {
        let cutoff = self.state.player.position - behind;
        let before = self.state.obstacles.len();
        self.state.obstacles.retain(|o| o.position > cutoff);
        let removed = before - self.state.obstacles.len();
        if removed > 0 {
            self.commit();
        }
        removed
    }

    /// Token counterpart of `cleanup_obstacles`
    pub fn cleanup_tokens(&mut self, behind: f64) -> usize {
        let cutoff = self.state.player.position - behind;
        let before = self.state.tokens.len();
        self.state.tokens.retain(|t| t.position > cutoff);
        let removed = before - self.state.tokens.len();
        if removed > 0 {
            self.commit();
        }
        removed
    }
}
