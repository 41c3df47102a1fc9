//! Lane coordinate system
//!
//! Three discrete tracks. Shifts move one lane at a time and clamp at the
//! edges; spawner cluster layouts use the wrapping variant instead.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::LANE_POSITIONS;

/// One of the three tracks, serialized as its index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Lane {
    Left,
    #[default]
    Center,
    Right,
}

/// Requested lane change direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaneShift {
    /// Toward lane index 0
    Left,
    /// Toward lane index 2
    Right,
}

impl LaneShift {
    pub fn delta(self) -> i8 {
        match self {
            LaneShift::Left => -1,
            LaneShift::Right => 1,
        }
    }
}

impl Lane {
    pub const ALL: [Lane; 3] = [Lane::Left, Lane::Center, Lane::Right];

    pub fn index(self) -> usize {
        match self {
            Lane::Left => 0,
            Lane::Center => 1,
            Lane::Right => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Lateral coordinate of this lane
    pub fn x(self) -> f32 {
        LANE_POSITIONS[self.index()]
    }

    /// Move one lane in `shift`'s direction, staying put at the edges
    pub fn shifted(self, shift: LaneShift) -> Self {
        let target = (self.index() as i8 + shift.delta()).clamp(0, 2);
        Self::ALL[target as usize]
    }

    /// Advance `steps` lanes to the right, wrapping past the right edge
    pub fn wrapping_add(self, steps: usize) -> Self {
        Self::ALL[(self.index() + steps) % Self::ALL.len()]
    }

    /// World-space point on this lane at longitudinal position `z`.
    /// Render space is `f32`; the track axis itself is `f64`.
    pub fn world_position(self, z: f64) -> Vec3 {
        Vec3::new(self.x(), 0.0, z as f32)
    }
}

impl From<Lane> for u8 {
    fn from(lane: Lane) -> Self {
        lane.index() as u8
    }
}

impl TryFrom<u8> for Lane {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Lane::from_index(value as usize).ok_or_else(|| format!("lane index out of range: {value}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_shift_clamps_at_edges() {
        assert_eq!(Lane::Left.shifted(LaneShift::Left), Lane::Left);
        assert_eq!(Lane::Right.shifted(LaneShift::Right), Lane::Right);
        assert_eq!(Lane::Center.shifted(LaneShift::Left), Lane::Left);
        assert_eq!(Lane::Center.shifted(LaneShift::Right), Lane::Right);
    }

    #[test]
    fn test_wrapping_add() {
        assert_eq!(Lane::Right.wrapping_add(1), Lane::Left);
        assert_eq!(Lane::Center.wrapping_add(2), Lane::Left);
        assert_eq!(Lane::Left.wrapping_add(3), Lane::Left);
    }

    #[test]
    fn test_lane_coordinates() {
        assert_eq!(Lane::Left.x(), -5.0);
        assert_eq!(Lane::Center.x(), 0.0);
        assert_eq!(Lane::Right.world_position(12.0), Vec3::new(5.0, 0.0, 12.0));
    }

    #[test]
    fn test_lane_serializes_as_index() {
        assert_eq!(serde_json::to_string(&Lane::Right).unwrap(), "2");
        let lane: Lane = serde_json::from_str("0").unwrap();
        assert_eq!(lane, Lane::Left);
        assert!(serde_json::from_str::<Lane>("3").is_err());
    }

    proptest! {
        #[test]
        fn shifts_stay_in_range(moves in proptest::collection::vec(any::<bool>(), 0..64)) {
            let mut lane = Lane::Center;
            for right in moves {
                let shift = if right { LaneShift::Right } else { LaneShift::Left };
                let before = lane.index() as i32;
                lane = lane.shifted(shift);
                let after = lane.index() as i32;
                prop_assert!(after <= 2);
                prop_assert!((after - before).abs() <= 1);
            }
        }
    }
}
