//! Command-line surface.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use todolist_core::{Priority, Task, TaskDraft};

#[derive(Debug, Parser)]
#[command(name = "todolist", version, about = "Manage projects and their to-do tasks")]
pub struct Cli {
    /// Directory holding the database (defaults to the user data dir).
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Absolute directory for rolling log files (defaults to `<data dir>/logs`).
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List projects.
    Projects,
    /// Add or remove a project.
    #[command(subcommand)]
    Project(ProjectCommand),
    /// List tasks of one project.
    Tasks(ProjectScope),
    /// Add, edit, remove or complete a task.
    #[command(subcommand)]
    Task(TaskCommand),
}

#[derive(Debug, Subcommand)]
pub enum ProjectCommand {
    Add { title: String },
    Rm { index: usize },
}

#[derive(Debug, Clone, Copy, Args)]
pub struct ProjectScope {
    /// Project position.
    #[arg(long, short, default_value_t = 0)]
    pub project: usize,
}

#[derive(Debug, Subcommand)]
pub enum TaskCommand {
    Add {
        #[command(flatten)]
        scope: ProjectScope,
        #[command(flatten)]
        fields: TaskFields,
    },
    Edit {
        #[command(flatten)]
        scope: ProjectScope,
        /// Task position inside the project.
        index: usize,
        #[command(flatten)]
        fields: EditFields,
    },
    Rm {
        #[command(flatten)]
        scope: ProjectScope,
        index: usize,
    },
    /// Toggle completion.
    Done {
        #[command(flatten)]
        scope: ProjectScope,
        index: usize,
    },
}

#[derive(Debug, Args)]
pub struct TaskFields {
    pub title: String,
    #[arg(long)]
    pub due: String,
    #[arg(long, default_value = "")]
    pub desc: String,
    #[arg(long, default_value_t = Priority::Low)]
    pub priority: Priority,
}

impl TaskFields {
    pub fn into_draft(self) -> TaskDraft {
        TaskDraft::new(self.title, self.desc, self.due, self.priority)
    }
}

/// Edit input; omitted fields keep the task's current values.
#[derive(Debug, Args)]
pub struct EditFields {
    pub title: Option<String>,
    #[arg(long)]
    pub due: Option<String>,
    #[arg(long)]
    pub desc: Option<String>,
    #[arg(long)]
    pub priority: Option<Priority>,
}

impl EditFields {
    pub fn into_draft(self, current: &Task) -> TaskDraft {
        TaskDraft::new(
            self.title.unwrap_or_else(|| current.title.clone()),
            self.desc.unwrap_or_else(|| current.description.clone()),
            self.due.unwrap_or_else(|| current.due_date.clone()),
            self.priority.unwrap_or(current.priority),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command, TaskCommand};
    use clap::Parser;
    use todolist_core::{Priority, Task};

    #[test]
    fn parses_task_add_with_defaults() {
        let cli = Cli::parse_from(["todolist", "task", "add", "Buy milk", "--due", "2024-01-01"]);
        let Command::Task(TaskCommand::Add { scope, fields }) = cli.command else {
            panic!("unexpected command");
        };
        assert_eq!(scope.project, 0);
        let draft = fields.into_draft();
        assert_eq!(draft.title, "Buy milk");
        assert_eq!(draft.description, "");
        assert_eq!(draft.priority, Priority::Low);
    }

    #[test]
    fn parses_task_edit_with_priority_and_project() {
        let cli = Cli::parse_from([
            "todolist", "task", "edit", "-p", "1", "0", "Buy bread", "--due", "2024-02-01",
            "--priority", "HIGH",
        ]);
        let Command::Task(TaskCommand::Edit { scope, index, fields }) = cli.command else {
            panic!("unexpected command");
        };
        assert_eq!(scope.project, 1);
        assert_eq!(index, 0);
        assert_eq!(fields.priority, Some(Priority::High));
    }

    #[test]
    fn task_edit_keeps_fields_that_were_not_given() {
        let current = Task::new("Paint", "fence, two coats", "2024-04-01", Priority::High, 0);
        let cli = Cli::parse_from(["todolist", "task", "edit", "0", "Paint shed", "--due", "2024-05-05"]);
        let Command::Task(TaskCommand::Edit { fields, .. }) = cli.command else {
            panic!("unexpected command");
        };

        let draft = fields.into_draft(&current);

        assert_eq!(draft.title, "Paint shed");
        assert_eq!(draft.due_date, "2024-05-05");
        assert_eq!(draft.description, "fence, two coats");
        assert_eq!(draft.priority, Priority::High);
    }

    #[test]
    fn task_edit_with_only_index_reproduces_current_task() {
        let current = Task::new("Paint", "fence", "2024-04-01", Priority::Medium, 0);
        let cli = Cli::parse_from(["todolist", "task", "edit", "0", "--desc", ""]);
        let Command::Task(TaskCommand::Edit { fields, .. }) = cli.command else {
            panic!("unexpected command");
        };

        let draft = fields.into_draft(&current);

        assert_eq!(draft.title, "Paint");
        assert_eq!(draft.description, "");
        assert_eq!(draft.due_date, "2024-04-01");
        assert_eq!(draft.priority, Priority::Medium);
    }

    #[test]
    fn global_flags_are_accepted_after_subcommand() {
        let cli = Cli::parse_from(["todolist", "projects", "--data-dir", "/tmp/todo"]);
        assert_eq!(cli.data_dir.as_deref(), Some(std::path::Path::new("/tmp/todo")));
    }
}
