//! Trencher runner native entry point
//!
//! The game itself runs in the browser. Natively this plays a headless run
//! with a simple autopilot so the simulation can be watched through logs
//! (`RUST_LOG=debug`).

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use trencher_runner::input::Command;
    use trencher_runner::sim::{GameStore, Session, TickOutcome};
    use trencher_runner::Tuning;

    env_logger::init();
    log::info!("Trencher runner (native) starting...");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(42);
    let mut session = Session::new(GameStore::headless(Tuning::default()), seed);
    session.apply(Command::StartRun);

    const FRAME: f64 = 1.0 / 60.0;
    const MAX_FRAMES: u32 = 60 * 60 * 5;
    for frame in 0..MAX_FRAMES {
        if let Some(shift) = autopilot(session.store()) {
            session.apply(Command::SwitchLane(shift));
        }
        let report = session.frame(FRAME);
        if let TickOutcome::Died(kind) = report.tick {
            log::info!("Died to {kind:?} after {frame} frames");
            break;
        }
    }

    match session.store().last_run() {
        Some(summary) => println!(
            "{} | bag {:.1} | distance {:.1} | best {:.1}",
            summary.message,
            summary.bag,
            summary.distance,
            session.store().high_score()
        ),
        None => println!(
            "Survived {MAX_FRAMES} frames | bag {:.1} | distance {:.1}",
            session.store().player().bag,
            session.store().player().distance
        ),
    }
}

/// Sidestep when an obstacle is close ahead in the current lane
#[cfg(not(target_arch = "wasm32"))]
fn autopilot(store: &trencher_runner::sim::GameStore) -> Option<trencher_runner::sim::LaneShift> {
    use trencher_runner::sim::{Lane, LaneShift};

    const LOOKAHEAD: f64 = 8.0;
    let player = store.player();
    let state = store.state();
    let blocked = |lane: Lane| {
        state.obstacles.iter().any(|o| {
            o.lane == lane
                && o.position > player.position - 2.0
                && o.position - player.position < LOOKAHEAD
        })
    };
    if !blocked(player.lane) {
        return None;
    }
    [LaneShift::Left, LaneShift::Right]
        .into_iter()
        .filter(|shift| player.lane.shifted(*shift) != player.lane)
        .find(|shift| !blocked(player.lane.shifted(*shift)))
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is trencher_runner::web::wasm_main
}
