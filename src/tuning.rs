//! Data-driven game balance
//!
//! Every balance number lives here so a page can ship a JSON override
//! without touching the simulation. `Tuning::default()` is the shipped feel.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::state::ObstacleKind;

/// One row of the weighted obstacle table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KindWeight {
    pub kind: ObstacleKind,
    pub weight: f64,
}

/// Rejected tuning values
#[derive(Debug, Error, PartialEq)]
pub enum TuningError {
    #[error("{0} must be finite and non-negative")]
    Invalid(&'static str),
    #[error("initial speed {initial} exceeds max speed {max}")]
    SpeedRange { initial: f64, max: f64 },
    #[error("cluster size range {min}..={max} is empty")]
    ClusterRange { min: u32, max: u32 },
    #[error("obstacle weight table has no positive weight")]
    EmptyWeights,
}

/// Balance table for a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    /// Speed at run start, as a fraction of the reference frame rate
    pub initial_speed: f64,
    /// Speed cap for the FOMO curve
    pub max_speed: f64,
    /// Added to speed every playing tick
    pub speed_increment: f64,
    /// Bag gained per token
    pub token_value: f64,
    /// Longitudinal position a run starts at (keeps the camera on the track)
    pub start_position: f64,

    // === Game loop ===
    /// Frame rate that `speed` is expressed against
    pub reference_frame_rate: f64,
    /// Largest frame delta the loop will integrate (seconds)
    pub max_frame_delta: f64,
    /// Playing frames the loop waits before moving the player
    pub tick_warmup_frames: u32,
    /// Cleanup sweep runs every this many ticks
    pub cleanup_interval: u32,
    /// Entities further than this behind the player are swept
    pub cleanup_behind_distance: f64,

    // === Spawner ===
    /// Playing frames the spawner waits before spawning
    pub spawn_warmup_frames: u32,
    /// How far ahead of the player entities appear
    pub spawn_lookahead: f64,
    /// Obstacle spacing at speed zero
    pub obstacle_base_spacing: f64,
    /// Obstacle spacing never drops below this
    pub obstacle_min_spacing: f64,
    /// Spacing lost per unit of speed
    pub obstacle_speed_factor: f64,
    /// A late obstacle is placed no closer than `lookahead - margin`
    pub obstacle_late_margin: f64,
    /// Obstacle cursor offset from the player on run start
    pub obstacle_initial_offset: f64,
    /// Token cursor offset from the player on run start
    pub token_initial_offset: f64,
    /// Fixed distance between token trigger points
    pub token_spacing: f64,
    /// Chance a token trigger point spawns a cluster
    pub cluster_probability: f64,
    pub cluster_min_tokens: u32,
    pub cluster_max_tokens: u32,
    /// Longitudinal offset of every second token in a cluster
    pub cluster_stagger: f64,
    /// Active obstacle kinds. Kinds left out never spawn.
    pub obstacle_weights: Vec<KindWeight>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            initial_speed: 0.2,
            max_speed: 0.35,
            speed_increment: 0.0005,
            token_value: 0.1,
            start_position: 20.0,

            reference_frame_rate: 60.0,
            max_frame_delta: 0.1,
            tick_warmup_frames: 5,
            cleanup_interval: 60,
            cleanup_behind_distance: 30.0,

            spawn_warmup_frames: 10,
            spawn_lookahead: 50.0,
            obstacle_base_spacing: 20.0,
            obstacle_min_spacing: 12.0,
            obstacle_speed_factor: 10.0,
            obstacle_late_margin: 10.0,
            obstacle_initial_offset: 30.0,
            token_initial_offset: 20.0,
            token_spacing: 15.0,
            cluster_probability: 0.7,
            cluster_min_tokens: 3,
            cluster_max_tokens: 5,
            cluster_stagger: 1.5,
            // RugPit stays out of rotation
            obstacle_weights: vec![
                KindWeight { kind: ObstacleKind::RedCandle, weight: 50.0 },
                KindWeight { kind: ObstacleKind::SellWall, weight: 50.0 },
            ],
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override and validate it
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning
            .validate()
            .map_err(<serde_json::Error as serde::de::Error>::custom)?;
        Ok(tuning)
    }

    /// Obstacle spacing at the given speed
    pub fn obstacle_spacing(&self, speed: f64) -> f64 {
        (self.obstacle_base_spacing - speed * self.obstacle_speed_factor)
            .max(self.obstacle_min_spacing)
    }

    /// Sum of all positive weights in the obstacle table
    pub fn total_obstacle_weight(&self) -> f64 {
        self.obstacle_weights
            .iter()
            .map(|w| w.weight.max(0.0))
            .sum()
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        let non_negative = [
            ("initial_speed", self.initial_speed),
            ("max_speed", self.max_speed),
            ("speed_increment", self.speed_increment),
            ("start_position", self.start_position),
            ("reference_frame_rate", self.reference_frame_rate),
            ("max_frame_delta", self.max_frame_delta),
            ("cleanup_behind_distance", self.cleanup_behind_distance),
            ("spawn_lookahead", self.spawn_lookahead),
            ("obstacle_base_spacing", self.obstacle_base_spacing),
            ("obstacle_speed_factor", self.obstacle_speed_factor),
            ("obstacle_late_margin", self.obstacle_late_margin),
            ("obstacle_initial_offset", self.obstacle_initial_offset),
            ("token_initial_offset", self.token_initial_offset),
            ("cluster_stagger", self.cluster_stagger),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(TuningError::Invalid(name));
            }
        }
        // Zero spacing would spawn forever in one frame
        if !(self.obstacle_min_spacing.is_finite() && self.obstacle_min_spacing > 0.0) {
            return Err(TuningError::Invalid("obstacle_min_spacing"));
        }
        if !(self.token_spacing.is_finite() && self.token_spacing > 0.0) {
            return Err(TuningError::Invalid("token_spacing"));
        }
        if !(self.token_value.is_finite() && self.token_value >= 0.0) {
            return Err(TuningError::Invalid("token_value"));
        }
        if !(0.0..=1.0).contains(&self.cluster_probability) {
            return Err(TuningError::Invalid("cluster_probability"));
        }
        if self.initial_speed > self.max_speed {
            return Err(TuningError::SpeedRange {
                initial: self.initial_speed,
                max: self.max_speed,
            });
        }
        if self.cluster_min_tokens == 0 || self.cluster_min_tokens > self.cluster_max_tokens {
            return Err(TuningError::ClusterRange {
                min: self.cluster_min_tokens,
                max: self.cluster_max_tokens,
            });
        }
        if self.total_obstacle_weight() <= 0.0 {
            return Err(TuningError::EmptyWeights);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(Tuning::default().validate(), Ok(()));
    }

    #[test]
    fn test_default_excludes_reserved_kind() {
        let tuning = Tuning::default();
        assert!(
            tuning
                .obstacle_weights
                .iter()
                .all(|w| w.kind != ObstacleKind::RugPit)
        );
        assert_eq!(tuning.total_obstacle_weight(), 100.0);
    }

    #[test]
    fn test_spacing_shrinks_with_speed() {
        let tuning = Tuning::default();
        assert!((tuning.obstacle_spacing(0.0) - 20.0).abs() < 1e-6);
        assert!((tuning.obstacle_spacing(0.35) - 16.5).abs() < 1e-4);
        // Clamped to the minimum
        assert_eq!(tuning.obstacle_spacing(5.0), 12.0);
    }

    #[test]
    fn test_partial_json_override() {
        let tuning = Tuning::from_json(r#"{ "max_speed": 0.5, "token_spacing": 10.0 }"#).unwrap();
        assert_eq!(tuning.max_speed, 0.5);
        assert_eq!(tuning.token_spacing, 10.0);
        assert_eq!(tuning.initial_speed, 0.2);
    }

    #[test]
    fn test_json_override_rejects_invalid_values() {
        assert!(Tuning::from_json(r#"{ "initial_speed": 1.0 }"#).is_err());
        assert!(Tuning::from_json(r#"{ "obstacle_weights": [] }"#).is_err());
        assert!(Tuning::from_json(r#"{ "cluster_min_tokens": 6 }"#).is_err());
    }

    #[test]
    fn test_weight_table_names_kinds() {
        let tuning = Tuning::from_json(
            r#"{ "obstacle_weights": [ { "kind": "RugPit", "weight": 1.0 } ] }"#,
        )
        .unwrap();
        assert_eq!(tuning.obstacle_weights[0].kind, ObstacleKind::RugPit);
    }
}
