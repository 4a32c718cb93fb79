//! Declarative mapping metadata for persisted structs.
//!
//! # Responsibility
//! - Define the `Model` contract every mapped struct implements.
//! - Carry table/column metadata as `const` data next to the struct.
//! - Provide attribute read/write hooks used by statement building and
//!   row materialization.
//!
//! # Invariants
//! - `COLUMNS` lists attributes in declaration order.
//! - `read_field`/`write_field` accept exactly the attributes named in
//!   `COLUMNS`; anything else is reported as unmapped.
//! - `Default` is the no-argument constructor used for materialization.

use rusqlite::types::{FromSql, FromSqlError, Value, ValueRef};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Declared SQL type used when a column does not specify one.
pub const DEFAULT_SQL_TYPE: &str = "VARCHAR(255)";

/// Column metadata attached to one struct attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMeta {
    /// Struct attribute name, as accepted by `read_field`/`write_field`.
    pub attribute: &'static str,
    /// Database column name, taken verbatim.
    pub column: &'static str,
    /// Declared SQL type.
    pub sql_type: &'static str,
    pub not_null: bool,
    pub primary_key: bool,
}

impl ColumnMeta {
    /// Creates metadata for a nullable, non-key `VARCHAR(255)` column.
    pub const fn new(attribute: &'static str, column: &'static str) -> Self {
        Self {
            attribute,
            column,
            sql_type: DEFAULT_SQL_TYPE,
            not_null: false,
            primary_key: false,
        }
    }

    pub const fn sql_type(mut self, sql_type: &'static str) -> Self {
        self.sql_type = sql_type;
        self
    }

    pub const fn not_null(mut self) -> Self {
        self.not_null = true;
        self
    }

    pub const fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }
}

/// A struct whose instances correspond to rows of one table.
///
/// # Example
///
/// ```
/// use rowmap_core::model::{assign, ColumnMeta, FieldError, Model};
/// use rusqlite::types::Value;
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Person {
///     id: i64,
///     name: String,
/// }
///
/// impl Model for Person {
///     const TABLE_NAME: &'static str = "PEOPLE";
///     const COLUMNS: &'static [ColumnMeta] = &[
///         ColumnMeta::new("id", "id").sql_type("INTEGER").not_null().primary_key(),
///         ColumnMeta::new("name", "name"),
///     ];
///
///     fn read_field(&self, attribute: &str) -> Option<Value> {
///         match attribute {
///             "id" => Some(Value::from(self.id)),
///             "name" => Some(Value::from(self.name.clone())),
///             _ => None,
///         }
///     }
///
///     fn write_field(&mut self, attribute: &str, value: Value) -> Result<(), FieldError> {
///         match attribute {
///             "id" => assign(attribute, &mut self.id, value),
///             "name" => assign(attribute, &mut self.name, value),
///             _ => Err(FieldError::Unmapped(attribute.to_string())),
///         }
///     }
/// }
///
/// assert_eq!(Person::COLUMNS.len(), 2);
/// ```
pub trait Model: Default + 'static {
    /// Table the struct maps to. Empty means "no table metadata".
    const TABLE_NAME: &'static str;
    /// Per-attribute column metadata in declaration order.
    const COLUMNS: &'static [ColumnMeta];

    /// Returns the current value of `attribute`, or `None` when the
    /// attribute is not mapped.
    fn read_field(&self, attribute: &str) -> Option<Value>;

    /// Assigns a driver-returned value to `attribute`.
    fn write_field(&mut self, attribute: &str, value: Value) -> Result<(), FieldError>;

    /// Rust type name used in diagnostics.
    fn model_name() -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Failure reported by `Model::write_field`.
#[derive(Debug)]
pub enum FieldError {
    /// The attribute is not declared by the model.
    Unmapped(String),
    /// The value is not assignment-compatible with the attribute type.
    Conversion {
        attribute: String,
        source: FromSqlError,
    },
}

impl Display for FieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unmapped(attribute) => write!(f, "attribute `{attribute}` is not mapped"),
            Self::Conversion { attribute, source } => {
                write!(f, "cannot assign value to `{attribute}`: {source}")
            }
        }
    }
}

impl Error for FieldError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Unmapped(_) => None,
            Self::Conversion { source, .. } => Some(source),
        }
    }
}

/// Converts a driver value into `slot` using the driver's own conversion
/// rules (`FromSql`), so the receiving type decides compatibility.
pub fn assign<T: FromSql>(attribute: &str, slot: &mut T, value: Value) -> Result<(), FieldError> {
    *slot = T::column_result(ValueRef::from(&value)).map_err(|source| FieldError::Conversion {
        attribute: attribute.to_string(),
        source,
    })?;
    Ok(())
}
