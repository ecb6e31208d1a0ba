//! Core of the todolist application: projects, tasks, and their storage.
//! This crate is the single owner of the project tree and its invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod view;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::project::{Project, ProjectId};
pub use model::task::{ParsePriorityError, Priority, Task, TaskDraft, TaskId};
pub use repo::kv_repo::{KvRepository, RepoError, RepoResult, SqliteKvRepository};
pub use repo::projects_repo::{PersistError, PersistResult, ProjectsRepository, PROJECTS_KEY};
pub use service::session::{
    ActionOutcome, IgnoredReason, Session, SessionError, SessionResult,
};
pub use service::store::{StoreError, StoreResult, TodoStore};
pub use view::{render_projects, render_tasks, ProjectListView, ProjectRow, TaskListView, TaskRow};
