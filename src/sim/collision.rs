//! Player/entity overlap tests
//!
//! Lanes must match exactly; along the track the distance test is strict,
//! so an entity exactly at the threshold does not touch the player.

use super::lane::Lane;
use super::state::{Obstacle, Player, Token};
use crate::consts::{COLLISION_DISTANCE, token_collision_distance};

/// Same lane and closer than `threshold` along the track
#[inline]
pub fn overlaps(player_lane: Lane, player_pos: f64, lane: Lane, pos: f64, threshold: f64) -> bool {
    player_lane == lane && (player_pos - pos).abs() < threshold
}

pub fn collides_with_obstacle(player: &Player, obstacle: &Obstacle) -> bool {
    overlaps(
        player.lane,
        player.position,
        obstacle.lane,
        obstacle.position,
        COLLISION_DISTANCE,
    )
}

/// Uses the wider collection radius
pub fn collides_with_token(player: &Player, token: &Token) -> bool {
    overlaps(
        player.lane,
        player.position,
        token.lane,
        token.position,
        token_collision_distance(),
    )
}
