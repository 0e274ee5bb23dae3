//! Core library for Taskdeck
//!
//! This crate contains the core business logic, including:
//! - The task model and repository
//! - Reminder detection
//! - Persistence stores

pub mod error;
pub mod task;

pub use error::Error;
pub type Result<T> = std::result::Result<T, Error>;
