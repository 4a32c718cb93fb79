//! Error taxonomy for mapping and query execution.
//!
//! # Responsibility
//! - Separate schema/programmer mistakes (`ConfigurationError`) from
//!   driver-reported failures (`OrmError::Sql`).
//! - Attach the offending SQL text to every driver failure.
//!
//! # Invariants
//! - Configuration errors are raised before any SQL is issued.
//! - "No matching row" is never an error; it is `Ok(None)`.

use crate::model::FieldError;
use rusqlite::types::FromSqlError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type OrmResult<T> = Result<T, OrmError>;

/// Schema or model declaration problems. Never retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    MissingTableName {
        model: &'static str,
    },
    MissingPrimaryKey {
        table: String,
    },
    AmbiguousPrimaryKey {
        table: String,
        count: usize,
    },
    NonNumericPrimaryKey {
        table: String,
        column: String,
        sql_type: String,
    },
    UnmappedAttribute {
        model: &'static str,
        attribute: String,
    },
    DuplicateAttribute {
        model: &'static str,
        attribute: String,
    },
    UnsupportedColumnType {
        table: String,
        column: String,
        sql_type: String,
        dialect: &'static str,
    },
    InvalidUrl(String),
}

impl Display for ConfigurationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingTableName { model } => {
                write!(f, "model `{model}` does not declare a table name")
            }
            Self::MissingPrimaryKey { table } => {
                write!(f, "table `{table}` must declare exactly one primary key, found none")
            }
            Self::AmbiguousPrimaryKey { table, count } => write!(
                f,
                "table `{table}` must declare exactly one primary key, found {count}"
            ),
            Self::NonNumericPrimaryKey {
                table,
                column,
                sql_type,
            } => write!(
                f,
                "primary key `{table}.{column}` has non-numeric type `{sql_type}`"
            ),
            Self::UnmappedAttribute { model, attribute } => {
                write!(f, "attribute `{attribute}` of `{model}` has no column mapping")
            }
            Self::DuplicateAttribute { model, attribute } => {
                write!(f, "attribute `{attribute}` of `{model}` is declared twice")
            }
            Self::UnsupportedColumnType {
                table,
                column,
                sql_type,
                dialect,
            } => write!(
                f,
                "column `{table}.{column}` uses `{sql_type}`, which {dialect} cannot store as a structured date"
            ),
            Self::InvalidUrl(url) => write!(f, "unsupported connection url `{url}`"),
        }
    }
}

impl Error for ConfigurationError {}

/// Top-level error returned by every facade operation.
#[derive(Debug)]
pub enum OrmError {
    Configuration(ConfigurationError),
    /// The provider could not hand out a connection.
    Connection(rusqlite::Error),
    /// The driver rejected a generated or caller-supplied statement.
    Sql {
        sql: String,
        source: rusqlite::Error,
    },
    /// A row value was not assignment-compatible with its attribute.
    FieldConversion {
        model: &'static str,
        attribute: String,
        source: FromSqlError,
    },
}

impl OrmError {
    pub(crate) fn sql(sql: impl Into<String>, source: rusqlite::Error) -> Self {
        Self::Sql {
            sql: sql.into(),
            source,
        }
    }

    pub(crate) fn from_field(model: &'static str, err: FieldError) -> Self {
        match err {
            FieldError::Unmapped(attribute) => {
                Self::Configuration(ConfigurationError::UnmappedAttribute { model, attribute })
            }
            FieldError::Conversion { attribute, source } => Self::FieldConversion {
                model,
                attribute,
                source,
            },
        }
    }

    /// Returns the configuration error, if this is one.
    pub fn as_configuration(&self) -> Option<&ConfigurationError> {
        match self {
            Self::Configuration(err) => Some(err),
            _ => None,
        }
    }
}

impl Display for OrmError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Configuration(err) => write!(f, "configuration error: {err}"),
            Self::Connection(err) => write!(f, "failed to acquire connection: {err}"),
            Self::Sql { sql, source } => write!(f, "{source} (sql: {sql})"),
            Self::FieldConversion {
                model,
                attribute,
                source,
            } => write!(f, "cannot assign `{model}.{attribute}`: {source}"),
        }
    }
}

impl Error for OrmError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Configuration(err) => Some(err),
            Self::Connection(err) => Some(err),
            Self::Sql { source, .. } => Some(source),
            Self::FieldConversion { source, .. } => Some(source),
        }
    }
}

impl From<ConfigurationError> for OrmError {
    fn from(value: ConfigurationError) -> Self {
        Self::Configuration(value)
    }
}
