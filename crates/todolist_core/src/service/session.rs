//! Interaction session over the state store.
//!
//! # Responsibility
//! - Hold the single "current project" selection that scopes task actions.
//! - Apply the non-empty input gate before creation and edit calls.
//! - Translate user-facing positions into validated store calls.
//!
//! # Invariants
//! - A gated action is a no-op: nothing changes and nothing is persisted.
//! - A failed store call leaves the selection as it was; the store has
//!   already undone its in-memory change.
//! - `current` is `None` only when no project exists.
//! - After `delete_project(i)`: a selection above `i` moves down by one, a
//!   selection equal to `i` keeps its position clamped to the last project.

use crate::model::project::Project;
use crate::model::task::{Task, TaskDraft};
use crate::repo::kv_repo::KvRepository;
use crate::service::store::{StoreError, TodoStore};
use crate::view::{render_projects, render_tasks, ProjectListView, TaskListView};
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type SessionResult<T> = Result<T, SessionError>;

/// Session error for actions that reached the store or need a selection.
#[derive(Debug)]
pub enum SessionError {
    /// A task action was requested while no project exists.
    NoProjectSelected,
    Store(StoreError),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoProjectSelected => write!(f, "no project selected"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::NoProjectSelected => None,
        }
    }
}

impl From<StoreError> for SessionError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Why an action was dropped by the input gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoredReason {
    EmptyTitle,
    EmptyDueDate,
}

impl Display for IgnoredReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => f.write_str("title is empty"),
            Self::EmptyDueDate => f.write_str("due date is empty"),
        }
    }
}

/// Result of a gated action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Applied,
    Ignored(IgnoredReason),
}

impl ActionOutcome {
    pub fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Interaction state: the store plus the current project selection.
pub struct Session<R: KvRepository> {
    store: TodoStore<R>,
    current: Option<usize>,
}

impl<R: KvRepository> Session<R> {
    /// Wraps `store`, selecting the first project when there is one.
    pub fn new(store: TodoStore<R>) -> Self {
        let current = (!store.projects().is_empty()).then_some(0);
        Self { store, current }
    }

    pub fn store(&self) -> &TodoStore<R> {
        &self.store
    }

    /// Task at `task_index` in the current project.
    pub fn task(&self, task_index: usize) -> SessionResult<&Task> {
        let project_index = self.require_current()?;
        Ok(self.store.task(project_index, task_index)?)
    }

    pub fn current_project_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current_project(&self) -> Option<&Project> {
        self.current.and_then(|index| self.store.project(index))
    }

    /// Makes the project at `index` the scope of task actions.
    pub fn select_project(&mut self, index: usize) -> SessionResult<()> {
        if index >= self.store.projects().len() {
            return Err(StoreError::ProjectOutOfRange {
                index,
                len: self.store.projects().len(),
            }
            .into());
        }
        self.current = Some(index);
        Ok(())
    }

    /// Creates and appends a project titled `title`.
    ///
    /// The selection does not move to the new project.
    pub fn add_project(&mut self, title: &str) -> SessionResult<ActionOutcome> {
        if title.trim().is_empty() {
            return Ok(ignored(IgnoredReason::EmptyTitle));
        }
        let project = self.store.create_project(title);
        self.store.add_project(project)?;
        if self.current.is_none() {
            self.current = Some(0);
        }
        Ok(ActionOutcome::Applied)
    }

    /// Deletes the project at `index` and re-targets the selection.
    pub fn delete_project(&mut self, index: usize) -> SessionResult<()> {
        self.store.delete_project(index)?;
        let remaining = self.store.projects().len();
        self.current = match self.current {
            _ if remaining == 0 => None,
            Some(current) if current > index => Some(current - 1),
            Some(current) => Some(current.min(remaining - 1)),
            None => Some(0),
        };
        debug!(
            "event=selection_update module=session status=ok current={:?}",
            self.current
        );
        Ok(())
    }

    /// Adds a task built from `draft` to the current project.
    pub fn add_task(&mut self, draft: TaskDraft) -> SessionResult<ActionOutcome> {
        let project_index = self.require_current()?;
        if let Some(reason) = gate_task_draft(&draft) {
            return Ok(ignored(reason));
        }
        let id = self.store.next_task_id(project_index)?;
        self.store.add_task(project_index, draft.into_task(id))?;
        Ok(ActionOutcome::Applied)
    }

    pub fn delete_task(&mut self, task_index: usize) -> SessionResult<()> {
        let project_index = self.require_current()?;
        self.store.delete_task(project_index, task_index)?;
        Ok(())
    }

    /// Replaces the editable fields of one task in the current project.
    pub fn edit_task(
        &mut self,
        task_index: usize,
        draft: &TaskDraft,
    ) -> SessionResult<ActionOutcome> {
        let project_index = self.require_current()?;
        if let Some(reason) = gate_task_draft(draft) {
            return Ok(ignored(reason));
        }
        self.store.edit_task(project_index, task_index, draft)?;
        Ok(ActionOutcome::Applied)
    }

    /// Flips completion of one task and returns the new state.
    pub fn toggle_done(&mut self, task_index: usize) -> SessionResult<bool> {
        let project_index = self.require_current()?;
        Ok(self.store.toggle_task_done(project_index, task_index)?)
    }

    pub fn project_view(&self) -> ProjectListView {
        render_projects(self.store.projects(), self.current)
    }

    pub fn task_view(&self) -> Option<TaskListView> {
        render_tasks(self.store.projects(), self.current)
    }

    fn require_current(&self) -> SessionResult<usize> {
        self.current.ok_or(SessionError::NoProjectSelected)
    }
}

fn gate_task_draft(draft: &TaskDraft) -> Option<IgnoredReason> {
    if draft.title.trim().is_empty() {
        return Some(IgnoredReason::EmptyTitle);
    }
    if draft.due_date.trim().is_empty() {
        return Some(IgnoredReason::EmptyDueDate);
    }
    None
}

fn ignored(reason: IgnoredReason) -> ActionOutcome {
    debug!("event=action_ignored module=session status=ok reason={reason:?}");
    ActionOutcome::Ignored(reason)
}
