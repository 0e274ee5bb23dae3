//! Task store trait
//!
//! Defines the persistence seam the repository writes through.

use std::sync::Mutex;

use super::model::Task;
use crate::{Error, Result};

/// Storage interface for the task snapshot
///
/// `save` replaces the whole snapshot; a partially written snapshot must
/// never be observable by a later `load`.
pub trait TaskStore {
    /// Persist the full task collection, overwriting any previous snapshot
    fn save(&self, tasks: &[Task]) -> Result<()>;

    /// Load the persisted collection, empty if nothing was ever saved
    fn load(&self) -> Result<Vec<Task>>;
}

/// In-memory store, used by tests and ephemeral sessions
#[derive(Default)]
pub struct MemoryTaskStore {
    snapshot: Mutex<Vec<Task>>,
}

impl MemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TaskStore for MemoryTaskStore {
    fn save(&self, tasks: &[Task]) -> Result<()> {
        let mut snapshot = self
            .snapshot
            .lock()
            .map_err(|_| Error::Storage("memory store lock poisoned".to_string()))?;
        *snapshot = tasks.to_vec();
        Ok(())
    }

    fn load(&self) -> Result<Vec<Task>> {
        let snapshot = self
            .snapshot
            .lock()
            .map_err(|_| Error::Storage("memory store lock poisoned".to_string()))?;
        Ok(snapshot.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryTaskStore::new();
        assert!(store.load().unwrap().is_empty());

        let tasks = vec![Task::new("Task 1"), Task::new("Task 2")];
        store.save(&tasks).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, tasks);
    }

    #[test]
    fn test_memory_store_save_overwrites() {
        let store = MemoryTaskStore::new();
        store.save(&[Task::new("Old")]).unwrap();
        store.save(&[Task::new("New")]).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].name, "New");
    }
}
