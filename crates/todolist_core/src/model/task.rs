//! Task record and priority.
//!
//! # Invariants
//! - `done_status` starts as `false` and only changes through
//!   `Task::toggle_done`.
//! - Edits never touch `id` or `done_status`.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Integer identifier of a task inside its owning project.
pub type TaskId = u32;

/// Task priority as chosen in the task form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[default]
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing an unknown priority name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePriorityError(pub String);

impl Display for ParsePriorityError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unsupported priority `{}`; expected low|medium|high",
            self.0
        )
    }
}

impl Error for ParsePriorityError {}

impl FromStr for Priority {
    type Err = ParsePriorityError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(ParsePriorityError(value.to_string())),
        }
    }
}

/// Single actionable item inside a project.
///
/// Serialized with the field names of the stored layout:
/// `{ "title", "desc", "dueDate", "priority", "doneStatus", "id" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub title: String,
    #[serde(rename = "desc")]
    pub description: String,
    /// Opaque date string, normally `YYYY-MM-DD`. Never parsed by core.
    pub due_date: String,
    pub priority: Priority,
    pub done_status: bool,
    pub id: TaskId,
}

impl Task {
    /// Creates an open task.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        due_date: impl Into<String>,
        priority: Priority,
        id: TaskId,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            due_date: due_date.into(),
            priority,
            done_status: false,
            id,
        }
    }

    /// Overwrites the editable fields from `draft`.
    pub fn apply(&mut self, draft: &TaskDraft) {
        self.title = draft.title.clone();
        self.description = draft.description.clone();
        self.priority = draft.priority;
        self.due_date = draft.due_date.clone();
    }

    /// Flips completion and returns the new state.
    pub fn toggle_done(&mut self) -> bool {
        self.done_status = !self.done_status;
        self.done_status
    }
}

/// Form input for creating or editing a task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub due_date: String,
    pub priority: Priority,
}

impl TaskDraft {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        due_date: impl Into<String>,
        priority: Priority,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            due_date: due_date.into(),
            priority,
        }
    }

    /// Builds a task carrying this draft's fields and the given id.
    pub fn into_task(self, id: TaskId) -> Task {
        Task::new(self.title, self.description, self.due_date, self.priority, id)
    }
}
