//! Numeric validation boundary
//!
//! Every number the game loop and spawner pull from the store or the host
//! passes through here first. A rejected value skips the frame (or the one
//! entity) instead of poisoning position or speed with NaN.

use thiserror::Error;

use super::state::Player;

/// A value that failed validation
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum Rejected {
    #[error("{field} is not finite ({value})")]
    NonFinite { field: &'static str, value: f64 },
    #[error("{field} is negative ({value})")]
    Negative { field: &'static str, value: f64 },
}

/// Accept a finite value
pub fn finite(field: &'static str, value: f64) -> Result<f64, Rejected> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Rejected::NonFinite { field, value })
    }
}

/// Accept a finite, non-negative value
pub fn non_negative(field: &'static str, value: f64) -> Result<f64, Rejected> {
    let value = finite(field, value)?;
    if value < 0.0 {
        return Err(Rejected::Negative { field, value });
    }
    Ok(value)
}

/// Validated player kinematics
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerReading {
    pub position: f64,
    pub speed: f64,
}

impl PlayerReading {
    pub fn read(player: &Player) -> Result<Self, Rejected> {
        Ok(Self {
            position: finite("player position", player.position)?,
            speed: non_negative("player speed", player.speed)?,
        })
    }
}

/// Everything one game loop tick consumes, validated together
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReading {
    pub player: PlayerReading,
    /// Frame delta clamped into `[0, max_delta]`
    pub delta: f64,
}

impl FrameReading {
    pub fn read(player: &Player, delta: f64, max_delta: f64) -> Result<Self, Rejected> {
        Ok(Self {
            player: PlayerReading::read(player)?,
            // A backwards clock stalls movement for one frame
            delta: finite("frame delta", delta)?.max(0.0).min(max_delta),
        })
    }
}

/// Forward displacement: finite and never negative
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Forward(f64);

impl Forward {
    pub const ZERO: Forward = Forward(0.0);

    pub fn new(delta: f64) -> Result<Self, Rejected> {
        non_negative("forward displacement", delta).map(Forward)
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_rejects_bad_deltas() {
        assert!(Forward::new(-0.5).is_err());
        assert!(Forward::new(f64::NAN).is_err());
        assert!(Forward::new(f64::INFINITY).is_err());
        assert_eq!(Forward::new(0.0).unwrap(), Forward::ZERO);
        assert_eq!(Forward::new(3.5).unwrap().get(), 3.5);
    }

    #[test]
    fn test_frame_reading_clamps_delta() {
        let player = Player::new(0.2, 20.0);
        let reading = FrameReading::read(&player, 2.0, 0.1).unwrap();
        assert_eq!(reading.delta, 0.1);
        assert_eq!(reading.player.position, 20.0);
    }

    #[test]
    fn test_frame_reading_rejects_nan() {
        let mut player = Player::new(f64::NAN, 20.0);
        assert!(matches!(
            FrameReading::read(&player, 0.016, 0.1),
            Err(Rejected::NonFinite { field: "player speed", .. })
        ));

        player.speed = 0.2;
        assert!(FrameReading::read(&player, f64::NAN, 0.1).is_err());
    }

    #[test]
    fn test_negative_delta_clamps_to_zero() {
        let player = Player::new(0.2, 20.0);
        let reading = FrameReading::read(&player, -0.016, 0.1).unwrap();
        assert_eq!(reading.delta, 0.0);
    }
}
