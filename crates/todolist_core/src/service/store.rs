//! In-memory state store for projects and tasks.
//!
//! # Responsibility
//! - Be the only owner and mutator of the project sequence.
//! - Persist the full sequence after every successful mutation.
//!
//! # Invariants
//! - Out-of-range indices are rejected before anything changes, so a failed
//!   call neither mutates memory nor writes storage.
//! - New ids are `max + 1` within their sequence, which equals the position
//!   at creation time until something is deleted.
//! - A save failure is returned to the caller and the in-memory change is
//!   undone, so memory never runs ahead of storage.

use crate::model::project::{Project, ProjectId};
use crate::model::task::{Priority, Task, TaskDraft, TaskId};
use crate::repo::kv_repo::KvRepository;
use crate::repo::projects_repo::{PersistError, ProjectsRepository};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// State store error.
#[derive(Debug)]
pub enum StoreError {
    ProjectOutOfRange {
        index: usize,
        len: usize,
    },
    TaskOutOfRange {
        project_index: usize,
        index: usize,
        len: usize,
    },
    Persist(PersistError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ProjectOutOfRange { index, len } => {
                write!(f, "project index {index} out of range (len {len})")
            }
            Self::TaskOutOfRange {
                project_index,
                index,
                len,
            } => write!(
                f,
                "task index {index} out of range in project {project_index} (len {len})"
            ),
            Self::Persist(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Persist(err) => Some(err),
            _ => None,
        }
    }
}

impl From<PersistError> for StoreError {
    fn from(value: PersistError) -> Self {
        Self::Persist(value)
    }
}

/// Owner of all projects and their tasks.
pub struct TodoStore<R: KvRepository> {
    projects: Vec<Project>,
    persistence: ProjectsRepository<R>,
}

impl<R: KvRepository> TodoStore<R> {
    /// Loads stored state, or the default project when nothing is stored.
    ///
    /// # Errors
    /// - Returns `StoreError::Persist` when the stored blob cannot be read
    ///   or decoded.
    pub fn open(kv: R) -> StoreResult<Self> {
        let persistence = ProjectsRepository::new(kv);
        let projects = persistence.load()?;
        Ok(Self {
            projects,
            persistence,
        })
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn project(&self, index: usize) -> Option<&Project> {
        self.projects.get(index)
    }

    /// Task at `task_index` inside the project at `project_index`.
    pub fn task(&self, project_index: usize, task_index: usize) -> StoreResult<&Task> {
        self.check_task(project_index, task_index)?;
        Ok(&self.projects[project_index].todos[task_index])
    }

    /// Builds a project with the next free id. Does not insert it.
    pub fn create_project(&self, title: impl Into<String>) -> Project {
        Project::new(title, self.next_project_id())
    }

    /// Appends `project` and persists.
    pub fn add_project(&mut self, project: Project) -> StoreResult<()> {
        let project_id = project.id;
        self.projects.push(project);
        self.commit("project_add", |projects| {
            projects.pop();
        })?;
        info!(
            "event=project_add module=store status=ok project_id={} project_count={}",
            project_id,
            self.projects.len()
        );
        Ok(())
    }

    /// Removes the project at `index` together with its tasks and persists.
    pub fn delete_project(&mut self, index: usize) -> StoreResult<Project> {
        self.check_project(index)?;
        let removed = self.projects.remove(index);
        let restore = removed.clone();
        self.commit("project_delete", move |projects| {
            projects.insert(index, restore);
        })?;
        info!(
            "event=project_delete module=store status=ok project_id={} task_count={} project_count={}",
            removed.id,
            removed.todos.len(),
            self.projects.len()
        );
        Ok(removed)
    }

    /// Builds an open task. Pure constructor, nothing is stored.
    pub fn create_task(
        title: impl Into<String>,
        description: impl Into<String>,
        due_date: impl Into<String>,
        priority: Priority,
        id: TaskId,
    ) -> Task {
        Task::new(title, description, due_date, priority, id)
    }

    /// Appends `task` to the project at `project_index` and persists.
    pub fn add_task(&mut self, project_index: usize, task: Task) -> StoreResult<()> {
        self.check_project(project_index)?;
        let task_id = task.id;
        self.projects[project_index].todos.push(task);
        self.commit("task_add", move |projects| {
            projects[project_index].todos.pop();
        })?;
        info!(
            "event=task_add module=store status=ok project_index={} task_id={}",
            project_index, task_id
        );
        Ok(())
    }

    /// Removes one task and persists.
    pub fn delete_task(&mut self, project_index: usize, task_index: usize) -> StoreResult<Task> {
        self.check_task(project_index, task_index)?;
        let removed = self.projects[project_index].todos.remove(task_index);
        let restore = removed.clone();
        self.commit("task_delete", move |projects| {
            projects[project_index].todos.insert(task_index, restore);
        })?;
        info!(
            "event=task_delete module=store status=ok project_index={} task_id={}",
            project_index, removed.id
        );
        Ok(removed)
    }

    /// Overwrites title, description, priority and due date of one task.
    ///
    /// `id` and `done_status` are left untouched.
    pub fn edit_task(
        &mut self,
        project_index: usize,
        task_index: usize,
        draft: &TaskDraft,
    ) -> StoreResult<()> {
        self.check_task(project_index, task_index)?;
        let task = &mut self.projects[project_index].todos[task_index];
        let previous = task.clone();
        task.apply(draft);
        let task_id = task.id;
        self.commit("task_edit", move |projects| {
            projects[project_index].todos[task_index] = previous;
        })?;
        info!(
            "event=task_edit module=store status=ok project_index={} task_id={}",
            project_index, task_id
        );
        Ok(())
    }

    /// Flips completion of one task, persists, and returns the new state.
    pub fn toggle_task_done(&mut self, project_index: usize, task_index: usize) -> StoreResult<bool> {
        self.check_task(project_index, task_index)?;
        let task = &mut self.projects[project_index].todos[task_index];
        let done = task.toggle_done();
        let task_id = task.id;
        self.commit("task_toggle", move |projects| {
            projects[project_index].todos[task_index].toggle_done();
        })?;
        info!(
            "event=task_toggle module=store status=ok project_index={} task_id={} done={}",
            project_index, task_id, done
        );
        Ok(done)
    }

    /// Id the next project built by `create_project` receives.
    pub fn next_project_id(&self) -> ProjectId {
        self.projects
            .iter()
            .map(|project| project.id)
            .max()
            .map_or(0, |max| max.saturating_add(1))
    }

    /// Id the next task appended to the project at `project_index` should get.
    pub fn next_task_id(&self, project_index: usize) -> StoreResult<TaskId> {
        self.check_project(project_index)?;
        Ok(self.projects[project_index].next_task_id())
    }

    /// Current position of the project with `id`.
    pub fn project_position(&self, id: ProjectId) -> Option<usize> {
        self.projects.iter().position(|project| project.id == id)
    }

    /// Current position of the task with `id` inside one project.
    pub fn task_position(&self, project_index: usize, id: TaskId) -> Option<usize> {
        self.projects.get(project_index)?.task_position(id)
    }

    fn check_project(&self, index: usize) -> StoreResult<()> {
        if index >= self.projects.len() {
            return Err(StoreError::ProjectOutOfRange {
                index,
                len: self.projects.len(),
            });
        }
        Ok(())
    }

    fn check_task(&self, project_index: usize, index: usize) -> StoreResult<()> {
        self.check_project(project_index)?;
        let len = self.projects[project_index].todos.len();
        if index >= len {
            return Err(StoreError::TaskOutOfRange {
                project_index,
                index,
                len,
            });
        }
        Ok(())
    }

    // Saves the whole sequence; on failure `undo` reverts the change just made.
    fn commit(
        &mut self,
        event: &'static str,
        undo: impl FnOnce(&mut Vec<Project>),
    ) -> StoreResult<()> {
        match self.persistence.save(&self.projects) {
            Ok(()) => Ok(()),
            Err(err) => {
                undo(&mut self.projects);
                error!(
                    "event={} module=store status=error error_code=persist_failed rolled_back=true error={}",
                    event, err
                );
                Err(StoreError::Persist(err))
            }
        }
    }
}
