use super::ActionLogRepository;
use crate::domain::action_log::{ActionLog, ActionType};
use rusqlite::Connection;
use serde_json::json;
use std::sync::{Arc, Mutex};

fn setup_test_db() -> Arc<Mutex<Connection>> {
    let conn = Connection::open_in_memory().unwrap();
    crate::db::configure_sqlite_connection(&conn).unwrap();
    crate::db::init_schema(&conn).unwrap();
    Arc::new(Mutex::new(conn))
}

#[test]
fn test_insert_and_find_by_id() {
    let repo = ActionLogRepository::new(setup_test_db());

    let log = ActionLog::new(ActionType::SetOverride, "operator")
        .with_student(5)
        .with_payload(json!({"manual_class": "나"}));
    let id = repo.insert(&log).unwrap();

    let found = repo.find_by_id(&id).unwrap().unwrap();
    assert_eq!(found.action_type, ActionType::SetOverride);
    assert_eq!(found.student_id, Some(5));
    assert_eq!(found.payload_json, Some(json!({"manual_class": "나"})));
}

#[test]
fn test_find_by_id_missing() {
    let repo = ActionLogRepository::new(setup_test_db());
    assert!(repo.find_by_id("nope").unwrap().is_none());
}

#[test]
fn test_find_by_student_and_recent() {
    let repo = ActionLogRepository::new(setup_test_db());
    repo.insert(&ActionLog::new(ActionType::AddStudent, "op").with_student(1)).unwrap();
    repo.insert(&ActionLog::new(ActionType::SetOverride, "op").with_student(1)).unwrap();
    repo.insert(&ActionLog::new(ActionType::ClearOverrides, "op")).unwrap();

    assert_eq!(repo.find_by_student(1).unwrap().len(), 2);
    assert_eq!(repo.find_recent(2).unwrap().len(), 2);
    assert_eq!(repo.count_by_type(ActionType::ClearOverrides).unwrap(), 1);
}
