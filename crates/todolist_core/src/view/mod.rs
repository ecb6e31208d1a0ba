//! Read-only projections of the project tree for display.
//!
//! Every call rebuilds its view from the given snapshot; nothing is cached
//! between renders.

use crate::model::project::{Project, ProjectId};
use crate::model::task::{Priority, TaskId};
use std::fmt::{Display, Formatter};

/// One row in the project list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRow {
    /// Position used by select/delete actions.
    pub index: usize,
    pub id: ProjectId,
    pub title: String,
    pub task_count: usize,
    pub is_current: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectListView {
    pub rows: Vec<ProjectRow>,
}

/// One row in the task list of the selected project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRow {
    /// Position used by edit/delete/toggle actions.
    pub index: usize,
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub due_date: String,
    pub priority: Priority,
    pub done: bool,
}

impl TaskRow {
    /// Label of the completion toggle: `Done` for open tasks, `Undo` otherwise.
    pub fn toggle_label(&self) -> &'static str {
        if self.done {
            "Undo"
        } else {
            "Done"
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskListView {
    pub project_index: usize,
    pub project_title: String,
    pub rows: Vec<TaskRow>,
}

/// Builds the project list, marking `current` when it is in range.
pub fn render_projects(projects: &[Project], current: Option<usize>) -> ProjectListView {
    let rows = projects
        .iter()
        .enumerate()
        .map(|(index, project)| ProjectRow {
            index,
            id: project.id,
            title: project.title.clone(),
            task_count: project.todos.len(),
            is_current: current == Some(index),
        })
        .collect();
    ProjectListView { rows }
}

/// Builds the task list of the selected project.
///
/// Returns `None` when nothing is selected or the selection is stale.
pub fn render_tasks(projects: &[Project], current: Option<usize>) -> Option<TaskListView> {
    let project_index = current?;
    let project = projects.get(project_index)?;
    let rows = project
        .todos
        .iter()
        .enumerate()
        .map(|(index, task)| TaskRow {
            index,
            id: task.id,
            title: task.title.clone(),
            description: task.description.clone(),
            due_date: task.due_date.clone(),
            priority: task.priority,
            done: task.done_status,
        })
        .collect();
    Some(TaskListView {
        project_index,
        project_title: project.title.clone(),
        rows,
    })
}

impl Display for ProjectListView {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.rows.is_empty() {
            return writeln!(f, "(no projects)");
        }
        for row in &self.rows {
            let marker = if row.is_current { '*' } else { ' ' };
            writeln!(
                f,
                "{marker} [{}] {} ({} tasks)",
                row.index, row.title, row.task_count
            )?;
        }
        Ok(())
    }
}

impl Display for TaskListView {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{} [{}]", self.project_title, self.project_index)?;
        if self.rows.is_empty() {
            return writeln!(f, "  (no tasks)");
        }
        for row in &self.rows {
            let check = if row.done { 'x' } else { ' ' };
            writeln!(
                f,
                "  [{}] [{check}] {}  due {}  {}  <{}>",
                row.index,
                row.title,
                row.due_date,
                row.priority,
                row.toggle_label()
            )?;
            if !row.description.is_empty() {
                writeln!(f, "        {}", row.description)?;
            }
        }
        Ok(())
    }
}
