//! Type coercion policy between struct values and SQL.
//!
//! # Responsibility
//! - Classify declared column types as numeric, boolean or opaque.
//! - Render values as SQL literal text for statement diagnostics.
//! - Normalize values before they are bound to a generated statement.
//!
//! # Invariants
//! - Classification is prefix-based for numeric types, so `INTEGER(11)` is
//!   numeric.
//! - Opaque literals are not escaped; literal text is never executed.

use rusqlite::types::Value;

const NUMERIC_TYPE_PREFIXES: &[&str] = &[
    "SMALLINT",
    "INTEGER",
    "BIGINT",
    "NUMERIC",
    "DECIMAL",
    "FLOAT",
    "REAL",
    "DOUBLE PRECISION",
    "DOUBLE",
    "NUMBER",
    "INT",
    "TINYINT",
];

const BOOLEAN_TYPE: &str = "BOOLEAN";

/// How values of a declared column type are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeClass {
    Numeric,
    Boolean,
    Opaque,
}

impl TypeClass {
    pub fn classify(sql_type: &str) -> Self {
        let normalized = sql_type.trim().to_ascii_uppercase();
        if NUMERIC_TYPE_PREFIXES
            .iter()
            .any(|prefix| normalized.starts_with(prefix))
        {
            Self::Numeric
        } else if normalized == BOOLEAN_TYPE {
            Self::Boolean
        } else {
            Self::Opaque
        }
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Numeric)
    }
}

/// Renders `value` as SQL literal text for a column of class `class`.
pub fn render_literal(class: TypeClass, value: &Value) -> String {
    match class {
        TypeClass::Numeric => match value {
            Value::Null => "NULL".to_string(),
            Value::Integer(number) => number.to_string(),
            Value::Real(number) => number.to_string(),
            Value::Text(text) => text.clone(),
            Value::Blob(bytes) => blob_literal(bytes),
        },
        TypeClass::Boolean => match value {
            Value::Null => "NULL".to_string(),
            Value::Integer(number) => bool_literal(*number != 0),
            Value::Real(number) => bool_literal(*number != 0.0),
            Value::Text(text) => bool_literal(text.eq_ignore_ascii_case("true") || text == "1"),
            Value::Blob(bytes) => blob_literal(bytes),
        },
        TypeClass::Opaque => match value {
            Value::Null => "''".to_string(),
            Value::Integer(number) => format!("\"{number}\""),
            Value::Real(number) => format!("\"{number}\""),
            Value::Text(text) => format!("\"{text}\""),
            Value::Blob(bytes) => blob_literal(bytes),
        },
    }
}

/// Normalizes `value` before binding it to a column of class `class`.
///
/// Mirrors `render_literal`: booleans become 0/1 and a null opaque value
/// becomes empty text.
pub fn bind_value(class: TypeClass, value: Value) -> Value {
    match (class, value) {
        (TypeClass::Boolean, Value::Integer(number)) => Value::Integer(i64::from(number != 0)),
        (TypeClass::Boolean, Value::Real(number)) => Value::Integer(i64::from(number != 0.0)),
        (TypeClass::Boolean, Value::Text(text)) => {
            Value::Integer(i64::from(text.eq_ignore_ascii_case("true") || text == "1"))
        }
        (TypeClass::Opaque, Value::Null) => Value::Text(String::new()),
        (_, value) => value,
    }
}

/// Returns whether `value` is a primary key the database should assign,
/// i.e. null or not strictly greater than zero.
pub fn is_unassigned_key(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Integer(number) => *number <= 0,
        Value::Real(number) => *number <= 0.0,
        Value::Text(_) | Value::Blob(_) => false,
    }
}

fn bool_literal(value: bool) -> String {
    let literal = if value { "1" } else { "0" };
    literal.to_string()
}

fn blob_literal(bytes: &[u8]) -> String {
    let hex: String = bytes.iter().map(|byte| format!("{byte:02X}")).collect();
    format!("X'{hex}'")
}
