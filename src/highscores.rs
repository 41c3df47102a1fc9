//! Best bag across runs
//!
//! Loaded once when the store is built and written through immediately
//! every time a run beats it. Storage failures are logged and never reach
//! gameplay; the in-memory value stays authoritative.

use crate::persistence::ScoreStorage;

pub struct HighScore {
    best: f64,
    storage: Box<dyn ScoreStorage>,
}

impl std::fmt::Debug for HighScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HighScore").field("best", &self.best).finish()
    }
}

impl HighScore {
    /// Load the best bag from `storage`, falling back to zero
    pub fn load(storage: Box<dyn ScoreStorage>) -> Self {
        let best = match storage.load() {
            Ok(Some(best)) => {
                log::info!("Loaded best bag {best}");
                best
            }
            Ok(None) => {
                log::info!("No best bag stored, starting fresh");
                0.0
            }
            Err(e) => {
                log::warn!("Failed to load best bag: {e}");
                0.0
            }
        };
        Self { best, storage }
    }

    pub fn best(&self) -> f64 {
        self.best
    }

    /// Record `bag` if it beats the best. Returns true when it did.
    pub fn submit(&mut self, bag: f64) -> bool {
        if bag.is_nan() || bag <= self.best {
            return false;
        }
        self.best = bag;
        if let Err(e) = self.storage.save(bag) {
            log::warn!("Failed to persist best bag {bag}: {e}");
        }
        true
    }
}
