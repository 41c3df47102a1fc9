//! Player input mapping
//!
//! Arrow keys and screen-half taps turn into lane shifts. Left always
//! means toward lane index 0. Input is ignored unless a run is active.

use crate::sim::lane::LaneShift;
use crate::sim::state::GamePhase;

/// Something the page asks the store to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    StartRun,
    ResetToMenu,
    SwitchLane(LaneShift),
}

/// Map a `KeyboardEvent.key` value
pub fn key_command(key: &str, phase: GamePhase) -> Option<Command> {
    if phase != GamePhase::Playing {
        return None;
    }
    match key {
        "ArrowLeft" => Some(Command::SwitchLane(LaneShift::Left)),
        "ArrowRight" => Some(Command::SwitchLane(LaneShift::Right)),
        _ => None,
    }
}

/// Map a tap at horizontal position `x` on a screen `width` wide
pub fn touch_command(x: f32, width: f32, phase: GamePhase) -> Option<Command> {
    if phase != GamePhase::Playing || !x.is_finite() || !width.is_finite() || width <= 0.0 {
        return None;
    }
    let shift = if x < width / 2.0 {
        LaneShift::Left
    } else {
        LaneShift::Right
    };
    Some(Command::SwitchLane(shift))
}
