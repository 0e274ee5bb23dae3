//! File-based task storage implementation
//!
//! Stores the task snapshot as JSON in a file on disk.

use std::fs;
use std::path::{Path, PathBuf};

use super::model::Task;
use super::store::TaskStore;
use crate::{Error, Result};

/// File-backed task store using JSON
pub struct FileTaskStore {
    /// Path to the JSON file
    path: PathBuf,
}

impl FileTaskStore {
    /// Create a store for the given path
    ///
    /// The file is created on first save; a missing file loads as empty.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TaskStore for FileTaskStore {
    fn save(&self, tasks: &[Task]) -> Result<()> {
        let content = serde_json::to_string_pretty(tasks)?;

        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        // Write through a sibling temp file so a crash mid-write never
        // leaves a truncated snapshot behind.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn load(&self) -> Result<Vec<Task>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path).map_err(|e| {
            Error::Storage(format!("Failed to read {}: {}", self.path.display(), e))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            Error::CorruptData(format!("Failed to parse {}: {}", self.path.display(), e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskStatus;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_store() -> (FileTaskStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("tasks.json");
        (FileTaskStore::new(path), temp_dir)
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let (store, _temp) = create_test_store();
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_load_round_trip() {
        let (store, _temp) = create_test_store();

        let tasks = vec![
            Task::new("Task 1")
                .with_description("First")
                .with_due_date(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()),
            Task::new("Task 2").with_status(TaskStatus::Completed),
            Task::new("Task 3"),
        ];
        store.save(&tasks).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, tasks);
    }

    #[test]
    fn test_order_preserved_across_instances() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("tasks.json");

        let tasks = vec![Task::new("First"), Task::new("Second"), Task::new("Third")];
        FileTaskStore::new(&path).save(&tasks).unwrap();

        let loaded = FileTaskStore::new(&path).load().unwrap();
        let names: Vec<&str> = loaded.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["First", "Second", "Third"]);
    }

    #[test]
    fn test_save_creates_parent_directory() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("dir").join("tasks.json");

        let store = FileTaskStore::new(&path);
        store.save(&[Task::new("Test task")]).unwrap();

        assert!(path.exists());
        assert_eq!(store.load().unwrap().len(), 1);
    }

    #[test]
    fn test_corrupt_file_is_corrupt_data_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("tasks.json");
        fs::write(&path, "not json at all").unwrap();

        let result = FileTaskStore::new(&path).load();
        match result.unwrap_err() {
            Error::CorruptData(_) => {}
            e => panic!("Expected CorruptData error, got: {:?}", e),
        }
    }

    #[test]
    fn test_save_overwrites_previous_snapshot() {
        let (store, _temp) = create_test_store();

        store.save(&[Task::new("Old 1"), Task::new("Old 2")]).unwrap();
        store.save(&[Task::new("New")]).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].name, "New");
    }
}
