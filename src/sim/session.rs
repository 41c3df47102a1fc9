//! One game: store, spawner and loop driven together once per frame

use rand_pcg::Pcg32;

use super::spawner::{Dice, SpawnReport, Spawner};
use super::store::GameStore;
use super::tick::{GameLoop, TickOutcome};
use crate::input::Command;

/// Result of one host frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    pub tick: TickOutcome,
    pub spawned: SpawnReport,
}

#[derive(Debug)]
pub struct Session<D = Pcg32> {
    store: GameStore,
    spawner: Spawner<D>,
    game_loop: GameLoop,
}

impl Session<Pcg32> {
    pub fn new(store: GameStore, seed: u64) -> Self {
        Self::with_spawner(store, Spawner::seeded(seed))
    }
}

impl<D: Dice> Session<D> {
    pub fn with_spawner(store: GameStore, spawner: Spawner<D>) -> Self {
        Self {
            store,
            spawner,
            game_loop: GameLoop::new(),
        }
    }

    /// Read access for renderers; writes go through `apply`
    pub fn store(&self) -> &GameStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut GameStore {
        &mut self.store
    }

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::StartRun => self.store.start_run(),
            Command::ResetToMenu => self.store.reset_to_menu(),
            Command::SwitchLane(shift) => self.store.switch_lane(shift),
        }
    }

    /// Host frame callback. The tick runs first, then the spawner.
    pub fn frame(&mut self, delta: f64) -> FrameReport {
        let tick = self.game_loop.tick(&mut self.store, delta);
        let spawned = self.spawner.update(&mut self.store);
        FrameReport { tick, spawned }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::lane::{Lane, LaneShift};
    use crate::sim::state::GamePhase;
    use crate::tuning::Tuning;

    #[test]
    fn test_commands_reach_store() {
        let mut session = Session::new(GameStore::headless(Tuning::default()), 1);
        session.apply(Command::StartRun);
        assert_eq!(session.store().phase(), GamePhase::Playing);
        session.apply(Command::SwitchLane(LaneShift::Right));
        assert_eq!(session.store().player().lane, Lane::Right);
        session.apply(Command::ResetToMenu);
        assert_eq!(session.store().phase(), GamePhase::Menu);
    }

    #[test]
    fn test_menu_frames_do_nothing() {
        let mut session = Session::new(GameStore::headless(Tuning::default()), 1);
        let revision = session.store().revision();
        let report = session.frame(1.0 / 60.0);
        assert_eq!(report.tick, TickOutcome::Idle);
        assert_eq!(report.spawned, SpawnReport::default());
        assert_eq!(session.store().revision(), revision);
    }

    #[test]
    fn test_session_is_deterministic_per_seed() {
        let run = |seed| {
            let mut session = Session::new(GameStore::headless(Tuning::default()), seed);
            session.apply(Command::StartRun);
            for _ in 0..300 {
                session.frame(1.0 / 60.0);
            }
            session.store().snapshot()
        };
        assert_eq!(run(99), run(99));
    }

    #[test]
    fn test_run_eventually_ends_without_steering() {
        let mut session = Session::new(GameStore::headless(Tuning::default()), 3);
        session.apply(Command::StartRun);
        let mut frames = 0;
        while session.store().phase() == GamePhase::Playing && frames < 100_000 {
            session.frame(1.0 / 60.0);
            frames += 1;
        }
        assert_eq!(session.store().phase(), GamePhase::GameOver);
        assert!(session.store().last_run().is_some());
    }
}
