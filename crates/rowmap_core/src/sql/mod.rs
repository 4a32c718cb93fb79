//! SQL statement construction from model descriptors.
//!
//! # Responsibility
//! - Build INSERT/UPDATE/DELETE statements from a descriptor and a live
//!   struct instance.
//! - Build SELECT/DROP text for id lookups, full-table reads and drops.
//!
//! # Invariants
//! - Generated DML binds values as parameters; `Statement::literal` is the
//!   same statement with values rendered by the coercion policy and is
//!   never executed.
//! - Primary-key checks run before any text is produced.

mod ddl;

pub use ddl::{create_script, split_statements};

use crate::coerce::{bind_value, is_unassigned_key, render_literal, TypeClass};
use crate::error::ConfigurationError;
use crate::model::Model;
use crate::schema::ModelDescriptor;
use rusqlite::types::Value;

/// A generated statement with its bound values.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    /// Executable text with `?` placeholders.
    pub sql: String,
    /// Same statement with values inlined as literals.
    pub literal: String,
    pub params: Vec<Value>,
}

#[derive(Default)]
struct StatementBuf {
    sql: String,
    literal: String,
    params: Vec<Value>,
}

impl StatementBuf {
    fn text(&mut self, fragment: &str) {
        self.sql.push_str(fragment);
        self.literal.push_str(fragment);
    }

    fn value(&mut self, class: TypeClass, value: Value) {
        self.sql.push('?');
        self.literal.push_str(&render_literal(class, &value));
        self.params.push(bind_value(class, value));
    }

    fn finish(self) -> Statement {
        Statement {
            sql: self.sql,
            literal: self.literal,
            params: self.params,
        }
    }
}

fn read_value<T: Model>(
    descriptor: &ModelDescriptor,
    object: &T,
    attribute: &str,
) -> Result<Value, ConfigurationError> {
    object
        .read_field(attribute)
        .ok_or_else(|| ConfigurationError::UnmappedAttribute {
            model: descriptor.model_name(),
            attribute: attribute.to_string(),
        })
}

/// Builds an INSERT for `object`.
///
/// A primary key whose value is null or not strictly greater than zero is
/// left out so the database can assign it.
pub fn insert<T: Model>(
    descriptor: &ModelDescriptor,
    object: &T,
) -> Result<Statement, ConfigurationError> {
    let table = descriptor.table_name()?;
    let mut columns = Vec::new();
    let mut values = Vec::new();

    for (attribute, column) in descriptor.columns() {
        let value = read_value(descriptor, object, attribute)?;
        if column.primary_key && is_unassigned_key(&value) {
            continue;
        }
        columns.push(column.name.as_str());
        values.push((column.type_class(), value));
    }

    let mut buf = StatementBuf::default();
    buf.text(&format!("INSERT INTO {table}"));
    if columns.is_empty() {
        buf.text(" DEFAULT VALUES;");
        return Ok(buf.finish());
    }

    buf.text(&format!(" ({}) VALUES (", columns.join(", ")));
    for (index, (class, value)) in values.into_iter().enumerate() {
        if index > 0 {
            buf.text(", ");
        }
        buf.value(class, value);
    }
    buf.text(");");
    Ok(buf.finish())
}

/// Builds an UPDATE assigning every mapped column, pinned by the primary key.
pub fn update<T: Model>(
    descriptor: &ModelDescriptor,
    object: &T,
) -> Result<Statement, ConfigurationError> {
    let key = descriptor.primary_key()?;
    let table = descriptor.table_name()?;
    let key_value = read_value(descriptor, object, key.attribute)?;

    let mut buf = StatementBuf::default();
    buf.text(&format!("UPDATE {table} SET "));
    for (index, (attribute, column)) in descriptor.columns().enumerate() {
        if index > 0 {
            buf.text(", ");
        }
        let value = read_value(descriptor, object, attribute)?;
        buf.text(&format!("{} = ", column.name));
        buf.value(column.type_class(), value);
    }
    buf.text(&format!(" WHERE {} = ", key.column.name));
    buf.value(TypeClass::Numeric, key_value);
    buf.text(";");
    Ok(buf.finish())
}

/// Builds a DELETE for the row identified by `object`'s primary key.
pub fn delete<T: Model>(
    descriptor: &ModelDescriptor,
    object: &T,
) -> Result<Statement, ConfigurationError> {
    let key = descriptor.primary_key()?;
    let table = descriptor.table_name()?;
    let key_value = read_value(descriptor, object, key.attribute)?;

    let mut buf = StatementBuf::default();
    buf.text(&format!("DELETE FROM {table} WHERE {} = ", key.column.name));
    buf.value(TypeClass::Numeric, key_value);
    buf.text(";");
    Ok(buf.finish())
}

/// `SELECT * FROM <table> WHERE <pk> = <id>` with the id inlined.
pub fn select_by_id(descriptor: &ModelDescriptor, id: i64) -> Result<String, ConfigurationError> {
    let key = descriptor.primary_key()?;
    let table = descriptor.table_name()?;
    Ok(format!(
        "SELECT * FROM {table} WHERE {} = {id}",
        key.column.name
    ))
}

/// `SELECT * FROM <table>` with an optional `LIMIT`.
pub fn select_all(
    descriptor: &ModelDescriptor,
    limit: Option<u32>,
) -> Result<String, ConfigurationError> {
    let table = descriptor.table_name()?;
    Ok(match limit {
        Some(limit) => format!("SELECT * FROM {table} LIMIT {limit}"),
        None => format!("SELECT * FROM {table}"),
    })
}

pub fn drop_table(descriptor: &ModelDescriptor) -> Result<String, ConfigurationError> {
    let table = descriptor.table_name()?;
    Ok(format!("DROP TABLE IF EXISTS {table};"))
}
