//! In-memory Plan Storage Adapter
//!
//! Backs tests and degraded hosts with no filesystem. Same contract as
//! the file adapter, one mutex-guarded slot.

use std::sync::Mutex;

use crate::ports::{PlanStorage, StorageError};

/// In-memory storage for the plan document.
#[derive(Debug, Default)]
pub struct InMemoryPlanStorage {
    slot: Mutex<Option<String>>,
}

impl InMemoryPlanStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates the slot, for tests that start from a stored plan.
    pub fn with_stored(json: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Some(json.into())),
        }
    }
}

impl PlanStorage for InMemoryPlanStorage {
    fn read(&self) -> Result<Option<String>, StorageError> {
        Ok(self.slot.lock().unwrap().clone())
    }

    fn write(&self, json: &str) -> Result<(), StorageError> {
        *self.slot.lock().unwrap() = Some(json.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        *self.slot.lock().unwrap() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty_unless_prepopulated() {
        assert_eq!(InMemoryPlanStorage::new().read().unwrap(), None);
        assert_eq!(
            InMemoryPlanStorage::with_stored("{}").read().unwrap().as_deref(),
            Some("{}")
        );
    }

    #[test]
    fn write_read_clear_cycle() {
        let storage = InMemoryPlanStorage::new();
        storage.write("a").unwrap();
        assert_eq!(storage.read().unwrap().as_deref(), Some("a"));
        storage.clear().unwrap();
        assert_eq!(storage.read().unwrap(), None);
    }
}
