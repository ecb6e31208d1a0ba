//! `todolist` command-line host.
//!
//! # Responsibility
//! - Resolve configuration, start logging, and open the single store.
//! - Apply one session action per invocation and print the re-rendered views.

mod cli;
mod config;

use clap::Parser;
use cli::{Cli, Command, ProjectCommand, ProjectScope, TaskCommand};
use config::CliConfig;
use log::info;
use std::error::Error;
use std::process::ExitCode;
use todolist_core::db::open_db;
use todolist_core::{init_logging, ActionOutcome, Session, SqliteKvRepository, TodoStore};

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            let mut source = err.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = CliConfig::resolve(&cli);
    init_logging(&config.log_level, &config.log_dir)?;
    info!(
        "event=cli_start module=cli status=ok db_path={}",
        config.db_path.display()
    );

    let conn = open_db(&config.db_path)?;
    let store = TodoStore::open(SqliteKvRepository::new(&conn))?;
    let mut session = Session::new(store);

    match cli.command {
        Command::Projects => print_projects(&session),
        Command::Project(ProjectCommand::Add { title }) => {
            report(session.add_project(&title)?);
            print_projects(&session);
        }
        Command::Project(ProjectCommand::Rm { index }) => {
            session.delete_project(index)?;
            print_projects(&session);
        }
        Command::Tasks(scope) => {
            select(&mut session, scope)?;
            print_tasks(&session);
        }
        Command::Task(TaskCommand::Add { scope, fields }) => {
            select(&mut session, scope)?;
            report(session.add_task(fields.into_draft())?);
            print_tasks(&session);
        }
        Command::Task(TaskCommand::Edit {
            scope,
            index,
            fields,
        }) => {
            select(&mut session, scope)?;
            let draft = fields.into_draft(session.task(index)?);
            report(session.edit_task(index, &draft)?);
            print_tasks(&session);
        }
        Command::Task(TaskCommand::Rm { scope, index }) => {
            select(&mut session, scope)?;
            session.delete_task(index)?;
            print_tasks(&session);
        }
        Command::Task(TaskCommand::Done { scope, index }) => {
            select(&mut session, scope)?;
            session.toggle_done(index)?;
            print_tasks(&session);
        }
    }

    Ok(())
}

fn select(
    session: &mut Session<SqliteKvRepository<'_>>,
    scope: ProjectScope,
) -> Result<(), Box<dyn Error>> {
    session.select_project(scope.project)?;
    Ok(())
}

// Gated actions are not failures: say why and keep the exit status clean.
fn report(outcome: ActionOutcome) {
    if let ActionOutcome::Ignored(reason) = outcome {
        eprintln!("ignored: {reason}");
    }
}

fn print_projects(session: &Session<SqliteKvRepository<'_>>) {
    print!("{}", session.project_view());
}

fn print_tasks(session: &Session<SqliteKvRepository<'_>>) {
    match session.task_view() {
        Some(view) => print!("{view}"),
        None => println!("(no project selected)"),
    }
}
