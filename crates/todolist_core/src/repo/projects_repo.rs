//! Persistence adapter for the full project sequence.
//!
//! # Responsibility
//! - Serialize every project and task into one JSON blob under
//!   [`PROJECTS_KEY`].
//! - Provide the default state when nothing has been stored yet.
//!
//! # Invariants
//! - `save` always writes the complete sequence.
//! - A malformed blob is reported, never replaced with the default.

use crate::model::project::Project;
use crate::repo::kv_repo::{KvRepository, RepoError};
use log::{debug, error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage key holding the serialized project sequence.
pub const PROJECTS_KEY: &str = "projects";

pub type PersistResult<T> = Result<T, PersistError>;

/// Failure while loading or saving the project blob.
#[derive(Debug)]
pub enum PersistError {
    Repo(RepoError),
    /// Stored blob could not be decoded.
    Corrupt(serde_json::Error),
    Serialize(serde_json::Error),
}

impl Display for PersistError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::Corrupt(err) => write!(f, "stored `{PROJECTS_KEY}` blob is malformed: {err}"),
            Self::Serialize(err) => write!(f, "failed to serialize projects: {err}"),
        }
    }
}

impl Error for PersistError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::Corrupt(err) | Self::Serialize(err) => Some(err),
        }
    }
}

impl From<RepoError> for PersistError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Loads and saves the project sequence through a key-value repository.
pub struct ProjectsRepository<R: KvRepository> {
    kv: R,
}

impl<R: KvRepository> ProjectsRepository<R> {
    pub fn new(kv: R) -> Self {
        Self { kv }
    }

    /// Reads the stored sequence, or `[Project 1]` when nothing is stored.
    ///
    /// # Errors
    /// - `PersistError::Corrupt` when the stored blob does not decode.
    /// - `PersistError::Repo` when the underlying read fails.
    pub fn load(&self) -> PersistResult<Vec<Project>> {
        let Some(blob) = self.kv.get(PROJECTS_KEY)? else {
            info!("event=projects_load module=persist status=ok source=default");
            return Ok(vec![Project::default_project()]);
        };

        match serde_json::from_str::<Vec<Project>>(&blob) {
            Ok(projects) => {
                info!(
                    "event=projects_load module=persist status=ok source=stored project_count={}",
                    projects.len()
                );
                Ok(projects)
            }
            Err(err) => {
                error!(
                    "event=projects_load module=persist status=error error_code=blob_corrupt bytes={}",
                    blob.len()
                );
                Err(PersistError::Corrupt(err))
            }
        }
    }

    /// Overwrites the stored blob with the whole `projects` sequence.
    pub fn save(&self, projects: &[Project]) -> PersistResult<()> {
        let blob = serde_json::to_string(projects).map_err(PersistError::Serialize)?;
        self.kv.put(PROJECTS_KEY, &blob)?;
        debug!(
            "event=projects_save module=persist status=ok project_count={} bytes={}",
            projects.len(),
            blob.len()
        );
        Ok(())
    }
}
