//! Result materializer: rows into struct instances.
//!
//! # Invariants
//! - Every row yields a fresh `T::default()` populated through the
//!   field-column map; driver values are passed to `write_field` as-is.
//! - Rows are consumed in cursor order.

use crate::error::{OrmError, OrmResult};
use crate::model::Model;
use crate::schema::ModelDescriptor;
use rusqlite::types::Value;
use rusqlite::{Row, Rows};

/// Builds one `T` from the current row.
pub fn materialize_row<T: Model>(
    descriptor: &ModelDescriptor,
    row: &Row<'_>,
    sql: &str,
) -> OrmResult<T> {
    let mut object = T::default();
    for (attribute, column) in descriptor.fields().iter() {
        let value: Value = row.get(column).map_err(|err| OrmError::sql(sql, err))?;
        object
            .write_field(attribute, value)
            .map_err(|err| OrmError::from_field(descriptor.model_name(), err))?;
    }
    Ok(object)
}

/// Advances the cursor once; `None` when it holds no rows.
pub fn materialize_first<T: Model>(
    descriptor: &ModelDescriptor,
    rows: &mut Rows<'_>,
    sql: &str,
) -> OrmResult<Option<T>> {
    match rows.next().map_err(|err| OrmError::sql(sql, err))? {
        Some(row) => materialize_row(descriptor, row, sql).map(Some),
        None => Ok(None),
    }
}

/// Drains the cursor.
pub fn materialize_all<T: Model>(
    descriptor: &ModelDescriptor,
    rows: &mut Rows<'_>,
    sql: &str,
) -> OrmResult<Vec<T>> {
    let mut objects = Vec::new();
    while let Some(row) = rows.next().map_err(|err| OrmError::sql(sql, err))? {
        objects.push(materialize_row(descriptor, row, sql)?);
    }
    Ok(objects)
}
