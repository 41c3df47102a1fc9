use std::cell::RefCell;
use std::rc::Rc;

use super::{ScoreStorage, StorageError, parse_score};

/// In-memory storage holding the value as the same numeric string the
/// browser keeps. Clones share the cell, so a test can keep a handle and
/// inspect what the store wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    value: Rc<RefCell<Option<String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that already holds `raw`
    pub fn with_raw(raw: &str) -> Self {
        Self {
            value: Rc::new(RefCell::new(Some(raw.to_string()))),
        }
    }

    /// Raw stored string
    pub fn raw(&self) -> Option<String> {
        self.value.borrow().clone()
    }
}

impl ScoreStorage for MemoryStorage {
    fn load(&self) -> Result<Option<f64>, StorageError> {
        self.value.borrow().as_deref().map(parse_score).transpose()
    }

    fn save(&mut self, best: f64) -> Result<(), StorageError> {
        *self.value.borrow_mut() = Some(best.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_loads_none() {
        assert_eq!(MemoryStorage::new().load().unwrap(), None);
    }

    #[test]
    fn test_save_is_visible_through_clone() {
        let handle = MemoryStorage::new();
        let mut storage = handle.clone();
        storage.save(0.7).unwrap();
        assert_eq!(handle.raw().as_deref(), Some("0.7"));
        assert_eq!(handle.load().unwrap(), Some(0.7));
    }

    #[test]
    fn test_corrupt_value_is_an_error() {
        let storage = MemoryStorage::with_raw("moon");
        assert!(storage.load().is_err());
    }
}
