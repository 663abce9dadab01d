//! Record lifecycle over a scripted driver: hydration, dirty-field
//! write-back, id adoption, and deletion, asserting the exact SQL the
//! session hands the driver.

mod common;

use activerow::{OrmError, Session, Value};
use common::{FakeDriver, FakeHandle};

fn scripted_session() -> (Session, FakeHandle) {
    let (driver, handle) = FakeDriver::new();
    (Session::new(Box::new(driver)), handle)
}

#[test]
fn test_find_one_hydrates_the_scripted_row() {
    let (session, handle) = scripted_session();
    handle.script_row(vec![
        ("id", Value::Int(3)),
        ("name", Value::Text("Fred".to_string())),
    ]);

    let record = session
        .table("widget")
        .eq("name", "Fred")
        .find_one()
        .unwrap()
        .unwrap();

    assert_eq!(
        handle.last_statement(),
        Some((
            "SELECT * FROM `widget` WHERE `name` = ? LIMIT 1".to_string(),
            vec![Value::Text("Fred".to_string())],
        ))
    );
    assert_eq!(record.id(), Some(&Value::Int(3)));
    assert_eq!(record.get("name"), Some(&Value::Text("Fred".to_string())));
    assert!(!record.is_new());
    assert!(record.dirty_fields().is_empty());
}

#[test]
fn test_find_one_returns_none_when_nothing_matches() {
    let (session, handle) = scripted_session();
    handle.script_rows(vec![]);

    let found = session.table("widget").eq("id", 99).find_one().unwrap();
    assert!(found.is_none());
}

#[test]
fn test_saving_a_new_record_inserts_and_adopts_the_id() {
    let (session, handle) = scripted_session();
    handle.set_last_insert_id(7i64);

    let mut record = session.table("widget").create();
    record.set("name", "Fred");
    record.set("age", 10);
    assert!(record.save().unwrap());

    assert_eq!(
        handle.last_statement(),
        Some((
            "INSERT INTO `widget` (`name`, `age`) VALUES (?, ?)".to_string(),
            vec![Value::Text("Fred".to_string()), Value::Int(10)],
        ))
    );
    assert_eq!(record.id(), Some(&Value::Int(7)));
    assert!(!record.is_new());
    assert!(record.dirty_fields().is_empty());

    // Nothing dirty: saving again is a no-op.
    assert!(!record.save().unwrap());
    assert_eq!(handle.statement_count(), 1);
}

#[test]
fn test_saving_an_empty_new_record_inserts_defaults() {
    let (session, handle) = scripted_session();

    let mut record = session.table("widget").create();
    assert!(record.save().unwrap());

    assert_eq!(
        handle.last_statement(),
        Some(("INSERT INTO `widget` DEFAULT VALUES".to_string(), vec![]))
    );
}

#[test]
fn test_saving_an_existing_record_updates_only_dirty_fields() {
    let (session, handle) = scripted_session();
    handle.script_row(vec![
        ("id", Value::Int(3)),
        ("name", Value::Text("Fred".to_string())),
        ("age", Value::Int(10)),
    ]);

    let mut record = session.table("widget").find_one_by_id(3).unwrap().unwrap();
    record.set("age", 11);
    assert!(record.save().unwrap());

    assert_eq!(
        handle.last_statement(),
        Some((
            "UPDATE `widget` SET `age` = ? WHERE `id` = ?".to_string(),
            vec![Value::Int(11), Value::Int(3)],
        ))
    );
}

#[test]
fn test_expression_fields_render_inline_instead_of_binding() {
    let (session, handle) = scripted_session();

    let mut record = session.table("widget").create();
    record.set("name", "Fred");
    record.set_expr("added", "datetime('now')");
    assert!(record.save().unwrap());

    assert_eq!(
        handle.last_statement(),
        Some((
            "INSERT INTO `widget` (`name`, `added`) VALUES (?, datetime('now'))".to_string(),
            vec![Value::Text("Fred".to_string())],
        ))
    );
}

#[test]
fn test_failed_save_keeps_fields_dirty_for_retry() {
    let (session, handle) = scripted_session();

    let mut record = session.table("widget").create();
    record.set("name", "Fred");

    handle.fail_next();
    let err = record.save().unwrap_err();
    assert!(err.is_database());
    assert_eq!(record.dirty_fields(), ["name".to_string()]);
    assert!(record.is_new());

    assert!(record.save().unwrap());
    assert_eq!(
        handle.last_statement(),
        Some((
            "INSERT INTO `widget` (`name`) VALUES (?)".to_string(),
            vec![Value::Text("Fred".to_string())],
        ))
    );
    assert!(record.dirty_fields().is_empty());
}

#[test]
fn test_updating_without_an_id_value_is_a_build_error() {
    let (session, handle) = scripted_session();
    handle.script_row(vec![("name", Value::Text("Fred".to_string()))]);

    let mut record = session
        .table("widget")
        .eq("name", "Fred")
        .find_one()
        .unwrap()
        .unwrap();
    record.set("age", 11);

    assert!(matches!(record.save(), Err(OrmError::Build(_))));
    assert_eq!(record.dirty_fields(), ["age".to_string()]);
}

#[test]
fn test_delete_removes_the_row_by_id() {
    let (session, handle) = scripted_session();
    handle.script_row(vec![("id", Value::Int(3))]);

    let record = session.table("widget").find_one_by_id(3).unwrap().unwrap();
    assert_eq!(record.delete().unwrap(), 1);

    assert_eq!(
        handle.last_statement(),
        Some((
            "DELETE FROM `widget` WHERE `id` = ?".to_string(),
            vec![Value::Int(3)],
        ))
    );
}

#[test]
fn test_configured_id_column_drives_updates_and_deletes() {
    let (driver, handle) = FakeDriver::new();
    let config = activerow::Config::new()
        .driver("fake")
        .id_override("widget", "widget_id");
    let session = Session::with_config(Box::new(driver), config);

    handle.script_row(vec![
        ("widget_id", Value::Int(9)),
        ("name", Value::Text("Fred".to_string())),
    ]);

    let mut record = session.table("widget").find_one_by_id(9).unwrap().unwrap();
    assert_eq!(
        handle.last_statement(),
        Some((
            "SELECT * FROM `widget` WHERE `widget_id` = ? LIMIT 1".to_string(),
            vec![Value::Int(9)],
        ))
    );

    record.set("name", "Barney");
    record.save().unwrap();
    assert_eq!(
        handle.last_statement(),
        Some((
            "UPDATE `widget` SET `name` = ? WHERE `widget_id` = ?".to_string(),
            vec![Value::Text("Barney".to_string()), Value::Int(9)],
        ))
    );
}

#[test]
fn test_delete_many_reuses_the_finder_conditions() {
    let (session, handle) = scripted_session();
    handle.set_affected(4);

    let deleted = session
        .table("widget")
        .lt("age", 10)
        .delete_many()
        .unwrap();

    assert_eq!(deleted, 4);
    assert_eq!(
        handle.last_statement(),
        Some((
            "DELETE FROM `widget` WHERE `age` < ?".to_string(),
            vec![Value::Int(10)],
        ))
    );
}
