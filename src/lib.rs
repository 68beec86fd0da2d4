//! todo-or-not - a tiny interactive task tracker
//!
//! Keeps a flat list of short-text tasks, each with a dense numeric id and a
//! completion flag, persisted to a `;`-delimited text file in the user's
//! home directory. A read-eval-print loop drives all mutations.

pub mod persist;
pub mod repl;
pub mod store;
pub mod validate;

// Re-exports
pub use persist::StoreFile;
pub use repl::{parse_command, Command, Repl};
pub use store::{StoreError, Task, TaskStatus, TaskStore};

/// Result type alias
pub type Result<T> = anyhow::Result<T>;
