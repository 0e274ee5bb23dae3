//! Task module
//!
//! This module contains task-related types and logic.

mod file_store;
mod model;
mod reminder;
mod repository;
mod store;

pub use file_store::FileTaskStore;
pub use model::*;
pub use reminder::{upcoming_reminders, REMINDER_WINDOW_MINUTES};
pub use repository::TaskRepository;
pub use store::{MemoryTaskStore, TaskStore};
