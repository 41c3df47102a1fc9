//! Best-bag persistence
//!
//! A single numeric value under one key. The browser build keeps it in
//! LocalStorage; everything else uses an in-memory cell.

#[cfg(target_arch = "wasm32")]
mod local;
mod memory;

#[cfg(target_arch = "wasm32")]
pub use local::LocalStorage;
pub use memory::MemoryStorage;

use thiserror::Error;

/// Storage key for the best bag
pub const HIGH_SCORE_KEY: &str = "trencher-high-score";

/// Storage collaborator failures
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage unavailable")]
    Unavailable,
    #[error("stored value {0:?} is not a number")]
    Parse(String),
    #[error("write failed: {0}")]
    Write(String),
}

/// Key/value store for the best bag
pub trait ScoreStorage {
    /// Stored best bag, `None` when nothing was saved yet
    fn load(&self) -> Result<Option<f64>, StorageError>;

    /// Persist the best bag immediately
    fn save(&mut self, best: f64) -> Result<(), StorageError>;
}

/// Parse a stored numeric string. Non-finite values count as corrupt.
pub(crate) fn parse_score(raw: &str) -> Result<f64, StorageError> {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(StorageError::Parse(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_score() {
        assert_eq!(parse_score("0.3").unwrap(), 0.3);
        assert_eq!(parse_score(" 12 ").unwrap(), 12.0);
        assert!(matches!(parse_score("NaN"), Err(StorageError::Parse(_))));
        assert!(matches!(parse_score("lots"), Err(StorageError::Parse(_))));
    }
}
