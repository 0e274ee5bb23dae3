//! Task repository
//!
//! The in-memory authority over the task collection. It owns the ordered
//! list, the edit cursor, and the persistence store, and it is the sole
//! writer to that store. Every mutating operation persists the full
//! collection before returning, and a failed save rolls the in-memory
//! change back, so the list and the snapshot never diverge observably.

use uuid::Uuid;

use super::model::{StatusFilter, Task, TaskDraft, TaskStatus};
use super::store::TaskStore;
use crate::{Error, Result};

/// Repository over an ordered task collection
///
/// Insertion order is creation order and is preserved across save/load
/// round trips. Mutating operations take `&mut self`, so each one is an
/// atomic unit by construction.
pub struct TaskRepository {
    tasks: Vec<Task>,
    /// At most one task is being edited at a time
    editing: Option<Uuid>,
    store: Box<dyn TaskStore>,
}

impl TaskRepository {
    /// Open a repository over the given store, loading its snapshot once
    ///
    /// A corrupt snapshot degrades to an empty collection with a logged
    /// warning; the session stays usable.
    pub fn open(store: Box<dyn TaskStore>) -> Result<Self> {
        let tasks = match store.load() {
            Ok(tasks) => tasks,
            Err(Error::CorruptData(msg)) => {
                tracing::warn!("Discarding corrupt task snapshot: {msg}");
                Vec::new()
            }
            Err(e) => return Err(e),
        };
        Ok(Self {
            tasks,
            editing: None,
            store,
        })
    }

    fn persist(&self) -> Result<()> {
        self.store.save(&self.tasks)
    }

    fn validated_name(draft: &TaskDraft) -> Result<String> {
        let name = draft.name.trim();
        if name.is_empty() {
            return Err(Error::InvalidInput("task name is required".to_string()));
        }
        Ok(name.to_string())
    }

    /// Create a task from the draft, append it, and persist
    ///
    /// The id and creation time are assigned here, never taken from the
    /// caller.
    pub fn create(&mut self, draft: TaskDraft) -> Result<Task> {
        let name = Self::validated_name(&draft)?;
        let mut task = Task::new(name).with_status(draft.status);
        task.description = draft.description.trim().to_string();
        task.due_date = draft.due_date;
        task.reminder = draft.reminder;

        self.tasks.push(task.clone());
        if let Err(e) = self.persist() {
            self.tasks.pop();
            return Err(e);
        }
        Ok(task)
    }

    /// Replace every field except `id` and `createdAt` on the matching task
    ///
    /// The task keeps its position in the collection. Clears the edit
    /// cursor when it pointed at this task.
    pub fn update(&mut self, id: Uuid, draft: TaskDraft) -> Result<Task> {
        let name = Self::validated_name(&draft)?;
        let index = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(Error::TaskNotFound(id))?;
        let previous = self.tasks[index].clone();

        let task = &mut self.tasks[index];
        task.name = name;
        task.description = draft.description.trim().to_string();
        task.due_date = draft.due_date;
        task.reminder = draft.reminder;
        task.status = draft.status;
        let updated = task.clone();

        if let Err(e) = self.persist() {
            self.tasks[index] = previous;
            return Err(e);
        }
        if self.editing == Some(id) {
            self.editing = None;
        }
        Ok(updated)
    }

    /// Remove the task if present and report whether anything was removed
    ///
    /// An absent id is not an error; deleting twice is the same as
    /// deleting once. Clears the edit cursor when it pointed at this task.
    pub fn delete(&mut self, id: Uuid) -> Result<bool> {
        let Some(index) = self.tasks.iter().position(|t| t.id == id) else {
            return Ok(false);
        };
        let removed = self.tasks.remove(index);
        if let Err(e) = self.persist() {
            self.tasks.insert(index, removed);
            return Err(e);
        }
        if self.editing == Some(id) {
            self.editing = None;
        }
        Ok(true)
    }

    /// Flip the task between pending and completed, returning the new status
    pub fn toggle_status(&mut self, id: Uuid) -> Result<TaskStatus> {
        let index = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(Error::TaskNotFound(id))?;
        let status = self.tasks[index].status.toggled();
        self.tasks[index].status = status;
        if let Err(e) = self.persist() {
            self.tasks[index].status = status.toggled();
            return Err(e);
        }
        Ok(status)
    }

    /// Get a task by id
    pub fn find(&self, id: Uuid) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Tasks matching the status filter and case-insensitive search term
    ///
    /// Lazy and recomputed on every call; iteration order is the
    /// collection order. An empty term matches everything.
    pub fn query(&self, filter: StatusFilter, term: &str) -> impl Iterator<Item = &Task> {
        let term = term.to_lowercase();
        self.tasks.iter().filter(move |task| {
            filter.matches(task.status)
                && (term.is_empty()
                    || task.name.to_lowercase().contains(&term)
                    || task.description.to_lowercase().contains(&term))
        })
    }

    /// The full collection in creation order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Mark a task as being edited and return it for form prefill
    pub fn begin_edit(&mut self, id: Uuid) -> Result<&Task> {
        let index = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(Error::TaskNotFound(id))?;
        self.editing = Some(id);
        Ok(&self.tasks[index])
    }

    /// The task currently being edited, if any
    pub fn editing(&self) -> Option<Uuid> {
        self.editing
    }

    /// Abandon the in-progress edit
    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }
}
