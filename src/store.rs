//! In-memory task list and its mutation operations
//!
//! Ids are dense and contiguous starting at 1. Deleting a task renumbers
//! every task above it so the "id = list position" property survives every
//! mutation. The store is plain owned state passed by reference into the
//! command loop; there is no global.

use thiserror::Error;

use crate::validate::{has_letter, DELIMITER};

/// Errors produced by store operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// Malformed input: letterless name, forbidden delimiter, bad shape
    #[error("{0}")]
    Validation(String),
    /// Well-formed id with no matching task
    #[error("no task with id {0}")]
    NotFound(u32),
}

/// Completion flag, `0` or `1` on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Incomplete,
    Complete,
}

impl TaskStatus {
    /// Numeric form used by the persistence format
    pub fn as_flag(self) -> u8 {
        match self {
            Self::Incomplete => 0,
            Self::Complete => 1,
        }
    }

    /// Parse the persisted flag; anything other than 0 or 1 is invalid
    pub fn from_flag(flag: u8) -> Option<Self> {
        match flag {
            0 => Some(Self::Incomplete),
            1 => Some(Self::Complete),
            _ => None,
        }
    }

    pub fn is_complete(self) -> bool {
        matches!(self, Self::Complete)
    }
}

impl Default for TaskStatus {
    fn default() -> Self {
        Self::Incomplete
    }
}

/// One to-do item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: u32,
    pub name: String,
    pub status: TaskStatus,
}

/// Insertion-ordered collection of tasks
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap tasks loaded from disk. Ids are taken as-is: a hand-edited file
    /// may violate contiguity, and lookups then follow first-match-wins.
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Append a new incomplete task, assigning the next id
    pub fn add(&mut self, name: &str) -> Result<&Task, StoreError> {
        validate_name(name)?;
        let id = self.tasks.last().map_or(1, |t| t.id + 1);
        self.tasks.push(Task {
            id,
            name: name.to_string(),
            status: TaskStatus::Incomplete,
        });
        // Just pushed, so last() cannot fail
        Ok(self.tasks.last().unwrap())
    }

    /// Replace the name of the first task with a matching id
    pub fn rename(&mut self, id: u32, new_name: &str) -> Result<(), StoreError> {
        validate_name(new_name)?;
        let task = self.find_mut(id)?;
        task.name = new_name.to_string();
        Ok(())
    }

    /// Remove the first task with a matching id, then renumber: every task
    /// whose id exceeds the deleted one is shifted down by one, so ids stay
    /// dense without reordering the list.
    pub fn delete(&mut self, id: u32) -> Result<Task, StoreError> {
        let pos = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(StoreError::NotFound(id))?;
        let removed = self.tasks.remove(pos);
        for task in &mut self.tasks {
            if task.id > removed.id {
                task.id -= 1;
            }
        }
        Ok(removed)
    }

    /// Mark the task complete
    pub fn complete(&mut self, id: u32) -> Result<(), StoreError> {
        self.find_mut(id)?.status = TaskStatus::Complete;
        Ok(())
    }

    /// Clear the completion flag
    pub fn uncomplete(&mut self, id: u32) -> Result<(), StoreError> {
        self.find_mut(id)?.status = TaskStatus::Incomplete;
        Ok(())
    }

    fn find_mut(&mut self, id: u32) -> Result<&mut Task, StoreError> {
        self.tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(StoreError::NotFound(id))
    }
}

/// A valid name contains at least one letter and no field delimiter.
///
/// Rejecting the delimiter is stricter than accepting it and corrupting the
/// file on reload; the persistence format has no escaping.
fn validate_name(name: &str) -> Result<(), StoreError> {
    if !has_letter(name) {
        return Err(StoreError::Validation(
            "the name must contain at least one letter".to_string(),
        ));
    }
    if name.contains(DELIMITER) {
        return Err(StoreError::Validation(format!(
            "the name must not contain '{DELIMITER}'"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(names: &[&str]) -> TaskStore {
        let mut store = TaskStore::new();
        for name in names {
            store.add(name).unwrap();
        }
        store
    }

    #[test]
    fn add_assigns_contiguous_ids() {
        let store = store_with(&["one", "two", "three"]);
        let ids: Vec<u32> = store.tasks().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert!(store.tasks().iter().all(|t| !t.status.is_complete()));
    }

    #[test]
    fn add_rejects_letterless_names() {
        let mut store = TaskStore::new();
        assert!(matches!(store.add("123"), Err(StoreError::Validation(_))));
        assert!(matches!(store.add(""), Err(StoreError::Validation(_))));
        assert!(store.is_empty());
    }

    #[test]
    fn add_rejects_delimiter_in_name() {
        let mut store = TaskStore::new();
        assert!(matches!(
            store.add("buy milk; and eggs"),
            Err(StoreError::Validation(_))
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn delete_renumbers_tasks_above() {
        let mut store = store_with(&["one", "two", "three", "four"]);
        let removed = store.delete(2).unwrap();
        assert_eq!(removed.name, "two");

        let view: Vec<(u32, &str)> = store
            .tasks()
            .iter()
            .map(|t| (t.id, t.name.as_str()))
            .collect();
        assert_eq!(view, vec![(1, "one"), (2, "three"), (3, "four")]);
    }

    #[test]
    fn delete_last_then_add_reuses_id() {
        let mut store = store_with(&["one", "two"]);
        store.delete(2).unwrap();
        let task = store.add("again").unwrap();
        assert_eq!(task.id, 2);
    }

    #[test]
    fn delete_unknown_id_is_not_found() {
        let mut store = store_with(&["one"]);
        assert_eq!(store.delete(7), Err(StoreError::NotFound(7)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn rename_replaces_name_in_place() {
        let mut store = store_with(&["one", "two"]);
        store.rename(2, "renamed").unwrap();
        assert_eq!(store.tasks()[1].name, "renamed");
        assert_eq!(store.tasks()[1].id, 2);
    }

    #[test]
    fn rename_validates_like_add() {
        let mut store = store_with(&["one"]);
        assert!(matches!(
            store.rename(1, "42"),
            Err(StoreError::Validation(_))
        ));
        assert!(matches!(
            store.rename(1, "a;b"),
            Err(StoreError::Validation(_))
        ));
        assert_eq!(store.tasks()[0].name, "one");
    }

    #[test]
    fn rename_unknown_id_is_not_found() {
        let mut store = store_with(&["one"]);
        assert_eq!(store.rename(3, "x y"), Err(StoreError::NotFound(3)));
    }

    #[test]
    fn complete_then_uncomplete_restores_status() {
        let mut store = store_with(&["one"]);
        store.complete(1).unwrap();
        assert!(store.tasks()[0].status.is_complete());
        store.complete(1).unwrap();
        assert!(store.tasks()[0].status.is_complete());
        store.uncomplete(1).unwrap();
        assert!(!store.tasks()[0].status.is_complete());
    }

    #[test]
    fn complete_unknown_id_is_not_found() {
        let mut store = store_with(&["one"]);
        assert_eq!(store.complete(2), Err(StoreError::NotFound(2)));
        assert_eq!(store.uncomplete(9), Err(StoreError::NotFound(9)));
    }

    #[test]
    fn first_match_wins_on_duplicate_ids() {
        // A hand-edited file can carry duplicate ids; operations touch the
        // first occurrence only.
        let mut store = TaskStore::from_tasks(vec![
            Task {
                id: 1,
                name: "first".to_string(),
                status: TaskStatus::Incomplete,
            },
            Task {
                id: 1,
                name: "shadow".to_string(),
                status: TaskStatus::Incomplete,
            },
        ]);
        store.complete(1).unwrap();
        assert!(store.tasks()[0].status.is_complete());
        assert!(!store.tasks()[1].status.is_complete());
    }
}
