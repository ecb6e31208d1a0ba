mod support;

use rusqlite::Connection;
use support::FlakyKv;
use todolist_core::db::open_db_in_memory;
use todolist_core::{
    ActionOutcome, IgnoredReason, KvRepository, Priority, Project, Session, SessionError,
    SqliteKvRepository, StoreError, TaskDraft, TodoStore, PROJECTS_KEY,
};

fn open_session(conn: &Connection) -> Session<SqliteKvRepository<'_>> {
    Session::new(TodoStore::open(SqliteKvRepository::new(conn)).unwrap())
}

fn milk() -> TaskDraft {
    TaskDraft::new("Buy milk", "", "2024-01-01", Priority::Low)
}

fn with_projects<'c>(conn: &'c Connection, titles: &[&str]) -> Session<SqliteKvRepository<'c>> {
    let mut session = open_session(conn);
    for title in titles {
        assert!(session.add_project(title).unwrap().is_applied());
    }
    session
}

#[test]
fn fresh_session_selects_default_project() {
    let conn = open_db_in_memory().unwrap();
    let session = open_session(&conn);

    assert_eq!(session.current_project_index(), Some(0));
    assert_eq!(session.current_project().unwrap().title, "Project 1");
}

#[test]
fn add_project_to_default_state() {
    let conn = open_db_in_memory().unwrap();
    let mut session = open_session(&conn);

    let outcome = session.add_project("Work").unwrap();

    assert_eq!(outcome, ActionOutcome::Applied);
    assert_eq!(
        session.store().projects(),
        [Project::new("Project 1", 0), Project::new("Work", 1)]
    );
    assert_eq!(session.current_project_index(), Some(0));
}

#[test]
fn add_then_delete_task_empties_project_again() {
    let conn = open_db_in_memory().unwrap();
    let mut session = open_session(&conn);

    assert!(session.add_task(milk()).unwrap().is_applied());
    assert_eq!(session.current_project().unwrap().todos[0].id, 0);

    session.delete_task(0).unwrap();

    assert!(session.current_project().unwrap().todos.is_empty());
}

#[test]
fn edit_task_replaces_fields_only() {
    let conn = open_db_in_memory().unwrap();
    let mut session = open_session(&conn);
    session.add_task(milk()).unwrap();

    let outcome = session
        .edit_task(0, &TaskDraft::new("Buy bread", "", "2024-02-01", Priority::High))
        .unwrap();

    assert!(outcome.is_applied());
    let task = &session.current_project().unwrap().todos[0];
    assert_eq!(task.title, "Buy bread");
    assert_eq!(task.description, "");
    assert_eq!(task.due_date, "2024-02-01");
    assert_eq!(task.priority, Priority::High);
    assert!(!task.done_status);
    assert_eq!(task.id, 0);
}

#[test]
fn blank_input_is_ignored_without_persisting() {
    let conn = open_db_in_memory().unwrap();
    let mut session = open_session(&conn);

    assert_eq!(
        session.add_project("   ").unwrap(),
        ActionOutcome::Ignored(IgnoredReason::EmptyTitle)
    );
    assert_eq!(
        session
            .add_task(TaskDraft::new("Buy milk", "", "", Priority::Low))
            .unwrap(),
        ActionOutcome::Ignored(IgnoredReason::EmptyDueDate)
    );
    assert_eq!(session.store().projects().len(), 1);
    assert!(session.store().projects()[0].todos.is_empty());
    assert_eq!(
        SqliteKvRepository::new(&conn).get(PROJECTS_KEY).unwrap(),
        None
    );
}

#[test]
fn blank_edit_keeps_existing_task() {
    let conn = open_db_in_memory().unwrap();
    let mut session = open_session(&conn);
    session.add_task(milk()).unwrap();

    let outcome = session
        .edit_task(0, &TaskDraft::new("", "", "2024-02-01", Priority::High))
        .unwrap();

    assert_eq!(outcome, ActionOutcome::Ignored(IgnoredReason::EmptyTitle));
    assert_eq!(session.current_project().unwrap().todos[0].title, "Buy milk");
}

#[test]
fn task_actions_follow_selected_project() {
    let conn = open_db_in_memory().unwrap();
    let mut session = with_projects(&conn, &["Work"]);

    session.select_project(1).unwrap();
    session.add_task(milk()).unwrap();

    assert!(session.store().projects()[0].todos.is_empty());
    assert_eq!(session.store().projects()[1].todos.len(), 1);
    assert!(session.toggle_done(0).unwrap());
    assert!(session.store().projects()[1].todos[0].done_status);
}

#[test]
fn select_out_of_range_keeps_selection() {
    let conn = open_db_in_memory().unwrap();
    let mut session = open_session(&conn);

    assert!(matches!(
        session.select_project(3),
        Err(SessionError::Store(_))
    ));
    assert_eq!(session.current_project_index(), Some(0));
}

#[test]
fn deleting_before_selection_moves_it_down() {
    let conn = open_db_in_memory().unwrap();
    let mut session = with_projects(&conn, &["Work", "Home"]);
    session.select_project(2).unwrap();

    session.delete_project(0).unwrap();

    assert_eq!(session.current_project_index(), Some(1));
    assert_eq!(session.current_project().unwrap().title, "Home");
}

#[test]
fn deleting_selected_project_keeps_position() {
    let conn = open_db_in_memory().unwrap();
    let mut session = with_projects(&conn, &["Work", "Home"]);
    session.select_project(1).unwrap();

    session.delete_project(1).unwrap();

    assert_eq!(session.current_project_index(), Some(1));
    assert_eq!(session.current_project().unwrap().title, "Home");
}

#[test]
fn deleting_selected_last_project_clamps() {
    let conn = open_db_in_memory().unwrap();
    let mut session = with_projects(&conn, &["Work"]);
    session.select_project(1).unwrap();

    session.delete_project(1).unwrap();

    assert_eq!(session.current_project_index(), Some(0));
}

#[test]
fn deleting_after_selection_leaves_it() {
    let conn = open_db_in_memory().unwrap();
    let mut session = with_projects(&conn, &["Work", "Home"]);

    session.delete_project(2).unwrap();

    assert_eq!(session.current_project_index(), Some(0));
}

#[test]
fn deleting_every_project_clears_selection() {
    let conn = open_db_in_memory().unwrap();
    let mut session = open_session(&conn);

    session.delete_project(0).unwrap();

    assert_eq!(session.current_project_index(), None);
    assert!(matches!(
        session.add_task(milk()),
        Err(SessionError::NoProjectSelected)
    ));
    assert!(session.task_view().is_none());

    session.add_project("Fresh").unwrap();
    assert_eq!(session.current_project_index(), Some(0));
    assert_eq!(session.current_project().unwrap().id, 0);
}

#[test]
fn empty_project_list_survives_reload() {
    let conn = open_db_in_memory().unwrap();
    open_session(&conn).delete_project(0).unwrap();

    let reopened = open_session(&conn);

    assert!(reopened.store().projects().is_empty());
    assert_eq!(reopened.current_project_index(), None);
}

#[test]
fn views_reflect_latest_state() {
    let conn = open_db_in_memory().unwrap();
    let mut session = with_projects(&conn, &["Work"]);
    session.add_task(milk()).unwrap();

    let projects = session.project_view();
    assert_eq!(projects.rows.len(), 2);
    assert!(projects.rows[0].is_current);
    assert_eq!(projects.rows[0].task_count, 1);
    assert!(!projects.rows[1].is_current);

    let tasks = session.task_view().unwrap();
    assert_eq!(tasks.project_title, "Project 1");
    assert_eq!(tasks.rows[0].toggle_label(), "Done");

    session.toggle_done(0).unwrap();
    assert_eq!(session.task_view().unwrap().rows[0].toggle_label(), "Undo");
}

#[test]
fn failed_project_delete_keeps_selection_valid() {
    let conn = open_db_in_memory().unwrap();
    let kv = FlakyKv::new(SqliteKvRepository::new(&conn));
    let mut session = Session::new(TodoStore::open(&kv).unwrap());
    session.add_project("Work").unwrap();
    session.select_project(1).unwrap();

    kv.fail_writes(true);
    let err = session.delete_project(1).unwrap_err();

    assert!(matches!(err, SessionError::Store(StoreError::Persist(_))));
    assert_eq!(session.store().projects().len(), 2);
    assert_eq!(session.current_project_index(), Some(1));
    assert_eq!(session.current_project().unwrap().title, "Work");

    kv.fail_writes(false);
    assert!(session.add_task(milk()).unwrap().is_applied());
    assert_eq!(session.store().projects()[1].todos.len(), 1);
}

#[test]
fn task_lookup_follows_selection() {
    let conn = open_db_in_memory().unwrap();
    let mut session = with_projects(&conn, &["Work"]);
    session.select_project(1).unwrap();
    session.add_task(milk()).unwrap();

    assert_eq!(session.task(0).unwrap().title, "Buy milk");
    assert!(matches!(
        session.task(1),
        Err(SessionError::Store(StoreError::TaskOutOfRange { index: 1, .. }))
    ));
}
