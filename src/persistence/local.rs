use super::{HIGH_SCORE_KEY, ScoreStorage, StorageError, parse_score};

/// Browser LocalStorage backend
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(StorageError::Unavailable)
    }
}

impl ScoreStorage for LocalStorage {
    fn load(&self) -> Result<Option<f64>, StorageError> {
        let storage = Self::storage()?;
        match storage.get_item(HIGH_SCORE_KEY) {
            Ok(Some(raw)) => parse_score(&raw).map(Some),
            Ok(None) => Ok(None),
            Err(_) => Err(StorageError::Unavailable),
        }
    }

    fn save(&mut self, best: f64) -> Result<(), StorageError> {
        let storage = Self::storage()?;
        storage
            .set_item(HIGH_SCORE_KEY, &best.to_string())
            .map_err(|e| StorageError::Write(format!("{e:?}")))
    }
}
