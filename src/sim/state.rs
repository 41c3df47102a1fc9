//! Run state and entity types
//!
//! Plain data owned by `GameStore`. Renderers only ever see these through
//! `Snapshot` or shared references.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::lane::Lane;

/// Top-level game phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GamePhase {
    /// Title screen, nothing simulates
    #[default]
    Menu,
    /// Active run
    Playing,
    /// Run ended by a collision
    GameOver,
}

/// Obstacle variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Tall candle in one lane
    RedCandle,
    /// Wall blocking one lane
    SellWall,
    /// Pit in the floor. Defined but kept out of the default rotation.
    RugPit,
}

/// Death reason when the cause is unknown
pub const GENERIC_DEATH_MESSAGE: &str = "REKT";

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 3] = [
        ObstacleKind::RedCandle,
        ObstacleKind::SellWall,
        ObstacleKind::RugPit,
    ];

    /// Shape tag used by renderers to pick a model
    pub fn tag(self) -> &'static str {
        match self {
            ObstacleKind::RedCandle => "hazard-tall",
            ObstacleKind::SellWall => "hazard-wall",
            ObstacleKind::RugPit => "hazard-pit",
        }
    }

    /// Game-over banner for deaths caused by this kind
    pub fn death_message(self) -> &'static str {
        match self {
            ObstacleKind::RedCandle => "LIQUIDATED BY RED CANDLE",
            ObstacleKind::SellWall => "CRUSHED BY SELL WALL",
            ObstacleKind::RugPit => "RUGGED INTO THE VOID",
        }
    }
}

/// Death message for an optional cause
pub fn death_message(cause: Option<ObstacleKind>) -> &'static str {
    cause.map_or(GENERIC_DEATH_MESSAGE, ObstacleKind::death_message)
}

/// An obstacle entity. Position is fixed at spawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Obstacle {
    pub id: String,
    pub kind: ObstacleKind,
    pub lane: Lane,
    pub position: f64,
}

impl Obstacle {
    pub fn world_position(&self) -> Vec3 {
        self.lane.world_position(self.position)
    }
}

/// A collectible token. Position is fixed at spawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub id: String,
    pub lane: Lane,
    pub position: f64,
}

impl Token {
    pub fn world_position(&self) -> Vec3 {
        self.lane.world_position(self.position)
    }
}

/// The runner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub lane: Lane,
    /// Longitudinal position, never decreases during a run
    pub position: f64,
    /// Fraction of the reference frame rate moved per frame
    pub speed: f64,
    /// Distance covered this run
    pub distance: f64,
    /// Accumulated reward, always a multiple of one tenth
    pub bag: f64,
}

impl Player {
    pub fn new(speed: f64, position: f64) -> Self {
        Self {
            lane: Lane::Center,
            position,
            speed,
            distance: 0.0,
            bag: 0.0,
        }
    }

    pub fn world_position(&self) -> Vec3 {
        self.lane.world_position(self.position)
    }
}

/// Outcome of a finished run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub bag: f64,
    pub distance: f64,
    /// Obstacle kind that ended the run, if known
    pub cause: Option<ObstacleKind>,
    pub message: String,
    /// Whether this run set a new best bag
    pub new_best: bool,
}

/// Complete run state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    pub player: Player,
    /// Live obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    /// Live tokens in spawn order
    pub tokens: Vec<Token>,
    pub death_message: String,
    /// Bumped on every `start_run`, lets frame-driven components notice retries
    pub run_id: u64,
}

impl GameState {
    pub fn new(initial_speed: f64) -> Self {
        Self {
            phase: GamePhase::Menu,
            player: Player::new(initial_speed, 0.0),
            obstacles: Vec::new(),
            tokens: Vec::new(),
            death_message: String::new(),
            run_id: 0,
        }
    }
}

/// Read-only view handed to renderers and the HUD
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub game_state: GamePhase,
    pub lane: Lane,
    pub speed: f64,
    pub player_position: f64,
    pub distance: f64,
    pub bag: f64,
    pub active_obstacles: Vec<Obstacle>,
    pub active_tokens: Vec<Token>,
    pub death_message: String,
    pub high_score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_death_messages() {
        assert_eq!(death_message(Some(ObstacleKind::RedCandle)), "LIQUIDATED BY RED CANDLE");
        assert_eq!(death_message(Some(ObstacleKind::SellWall)), "CRUSHED BY SELL WALL");
        assert_eq!(death_message(Some(ObstacleKind::RugPit)), "RUGGED INTO THE VOID");
        assert_eq!(death_message(None), GENERIC_DEATH_MESSAGE);
    }

    #[test]
    fn test_kind_tags_are_distinct() {
        let tags: Vec<_> = ObstacleKind::ALL.iter().map(|k| k.tag()).collect();
        assert_eq!(tags, ["hazard-tall", "hazard-wall", "hazard-pit"]);
    }

    #[test]
    fn test_snapshot_uses_camel_case() {
        let snapshot = Snapshot {
            game_state: GamePhase::GameOver,
            lane: Lane::Right,
            speed: 0.25,
            player_position: 40.0,
            distance: 20.0,
            bag: 0.3,
            active_obstacles: vec![Obstacle {
                id: "obstacle-0".into(),
                kind: ObstacleKind::SellWall,
                lane: Lane::Left,
                position: 42.0,
            }],
            active_tokens: Vec::new(),
            death_message: "CRUSHED BY SELL WALL".into(),
            high_score: 1.2,
        };
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["gameState"], "gameOver");
        assert_eq!(json["lane"], 2);
        assert_eq!(json["activeObstacles"][0]["kind"], "SellWall");
        assert_eq!(json["highScore"], 1.2);
    }
}
