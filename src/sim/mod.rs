//! Runner simulation
//!
//! All gameplay logic lives here:
//! - Single-threaded, one tick per host frame
//! - Seeded RNG only (spawner)
//! - Entities kept in spawn order
//! - No rendering or platform dependencies

pub mod collision;
pub mod guard;
pub mod lane;
pub mod session;
pub mod spawner;
pub mod state;
pub mod store;
pub mod tick;

pub use collision::{collides_with_obstacle, collides_with_token};
pub use guard::{Forward, Rejected};
pub use lane::{Lane, LaneShift};
pub use session::{FrameReport, Session};
pub use spawner::{Dice, SpawnReport, Spawner};
pub use state::{
    GamePhase, GameState, Obstacle, ObstacleKind, Player, RunSummary, Snapshot, Token,
};
pub use store::{GameStore, ListenerId};
pub use tick::{GameLoop, TickOutcome};
