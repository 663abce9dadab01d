//! Naming conventions and relationship helpers.
//!
//! Tables are named after types (`CarTyre` works against `car_tyre`),
//! foreign keys after tables (`widget` rows point elsewhere through
//! `widget_id`), and many-to-many join tables concatenate both table
//! names in alphabetical order. The relationship helpers start a
//! [`Finder`] from a hydrated [`Record`] following those conventions;
//! every convention can be overridden per call.

use heck::ToSnakeCase;

use crate::session::{Finder, Record};
use crate::value::Value;

/// Table name for a type name: path separators become underscores and
/// CapWords become snake_case. `models::CarTyre` maps to
/// `models_car_tyre`.
pub fn table_name_for(type_name: &str) -> String {
    type_name.replace("::", "_").to_snake_case()
}

/// Conventional foreign key column pointing at a table: `{table}_id`.
pub fn foreign_key_for(table: &str) -> String {
    format!("{}_id", table)
}

/// Conventional join table for a many-to-many relationship: both table
/// names, alphabetically ordered, joined with an underscore.
pub fn join_table_for(first: &str, second: &str) -> String {
    let mut names = [first, second];
    names.sort_unstable();
    names.join("_")
}

fn id_of(record: &Record<'_>) -> Value {
    record.id().cloned().unwrap_or(Value::Null)
}

/// Rows of `associated_table` holding this record's id in their
/// foreign key. One matching row expected; finish with `find_one`.
pub fn has_one<'s>(
    record: &Record<'s>,
    associated_table: &str,
    foreign_key: Option<&str>,
) -> Finder<'s> {
    has_many(record, associated_table, foreign_key)
}

/// Rows of `associated_table` holding this record's id in their
/// foreign key. Finish with `find_many`.
pub fn has_many<'s>(
    record: &Record<'s>,
    associated_table: &str,
    foreign_key: Option<&str>,
) -> Finder<'s> {
    let foreign_key = match foreign_key {
        Some(column) => column.to_string(),
        None => foreign_key_for(record.table()),
    };
    record
        .session()
        .table(associated_table)
        .eq(&foreign_key, id_of(record))
}

/// The row of `associated_table` this record points at through a
/// foreign key on its own table.
pub fn belongs_to<'s>(
    record: &Record<'s>,
    associated_table: &str,
    foreign_key: Option<&str>,
) -> Finder<'s> {
    let foreign_key = match foreign_key {
        Some(column) => column.to_string(),
        None => foreign_key_for(associated_table),
    };
    let pointed_id = record.get(&foreign_key).cloned().unwrap_or(Value::Null);
    record
        .session()
        .table(associated_table)
        .where_id_is(pointed_id)
}

/// Rows of `associated_table` reachable through an intermediate join
/// table. Every name defaults to convention: the join table from
/// [`join_table_for`], each key from [`foreign_key_for`].
pub fn has_many_through<'s>(
    record: &Record<'s>,
    associated_table: &str,
    join_table: Option<&str>,
    key_to_base: Option<&str>,
    key_to_associated: Option<&str>,
) -> Finder<'s> {
    let base_table = record.table().to_string();
    let join_table = match join_table {
        Some(table) => table.to_string(),
        None => join_table_for(&base_table, associated_table),
    };
    let key_to_base = match key_to_base {
        Some(column) => column.to_string(),
        None => foreign_key_for(&base_table),
    };
    let key_to_associated = match key_to_associated {
        Some(column) => column.to_string(),
        None => foreign_key_for(associated_table),
    };
    let associated_id = record
        .session()
        .config()
        .id_column_for(associated_table)
        .to_string();

    record
        .session()
        .table(associated_table)
        .select(&format!("{}.*", associated_table))
        .join(
            &join_table,
            (
                format!("{}.{}", associated_table, associated_id),
                "=".to_string(),
                format!("{}.{}", join_table, key_to_associated),
            ),
        )
        .eq(&format!("{}.{}", join_table, key_to_base), id_of(record))
}
