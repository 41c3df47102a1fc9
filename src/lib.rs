//! Trencher Runner - endless runner core for the Trencher mini-game
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (store, spawner, collisions, game loop)
//! - `tuning`: Data-driven game balance
//! - `highscores`: Best bag that outlives a run
//! - `persistence`: Storage backends for the best bag
//! - `audio`: Fire-and-forget audio collaborator
//! - `input`: Keyboard/touch to lane shift mapping

pub mod audio;
pub mod highscores;
pub mod input;
pub mod persistence;
pub mod sim;
pub mod tuning;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use highscores::HighScore;
pub use tuning::Tuning;

/// Spatial model shared by every component
pub mod consts {
    /// Lateral (x) coordinate of each lane: left, center, right
    pub const LANE_POSITIONS: [f32; 3] = [-5.0, 0.0, 5.0];
    /// Visual width of a lane
    pub const LANE_WIDTH: f32 = 3.0;

    /// Longitudinal distance under which player and obstacle overlap
    pub const COLLISION_DISTANCE: f64 = 2.0;
    /// Tokens are collected from further away than obstacles kill
    pub const TOKEN_COLLISION_MULTIPLIER: f64 = 1.5;

    /// Collection radius for tokens
    #[inline]
    pub fn token_collision_distance() -> f64 {
        COLLISION_DISTANCE * TOKEN_COLLISION_MULTIPLIER
    }
}

/// Round to one decimal place (bag arithmetic)
#[inline]
pub fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
