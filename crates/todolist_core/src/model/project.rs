//! Project record.

use crate::model::task::{Task, TaskId};
use serde::{Deserialize, Serialize};

/// Integer identifier of a project inside the persisted sequence.
pub type ProjectId = u32;

/// Named container of tasks.
///
/// Serialized as `{ "title", "id", "todos" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub id: ProjectId,
    /// Ordered task sequence; position is the index used by store operations.
    pub todos: Vec<Task>,
}

impl Project {
    /// Creates a project with an empty task sequence.
    pub fn new(title: impl Into<String>, id: ProjectId) -> Self {
        Self {
            title: title.into(),
            id,
            todos: Vec::new(),
        }
    }

    /// The project every fresh store starts with.
    pub fn default_project() -> Self {
        Self::new("Project 1", 0)
    }

    /// Returns the id the next appended task should receive.
    ///
    /// Equals `todos.len()` as long as nothing was deleted, and never
    /// collides with a surviving task after deletions.
    pub fn next_task_id(&self) -> TaskId {
        self.todos
            .iter()
            .map(|task| task.id)
            .max()
            .map_or(0, |max| max.saturating_add(1))
    }

    /// Position of the task with `id`, if present.
    pub fn task_position(&self, id: TaskId) -> Option<usize> {
        self.todos.iter().position(|task| task.id == id)
    }
}
