//! Minimal object-relational mapping for plain Rust structs.
//!
//! Structs implement [`Model`] to declare their table and columns; an
//! [`Orm`] bound to an [`OrmConfig`] then inserts, updates, deletes and
//! fetches them without hand-written SQL for the common cases.

pub mod coerce;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod model;
pub mod query;
pub mod schema;
pub mod sql;

pub use config::{ConnectionSettings, OrmConfig};
pub use db::{ConnectionProvider, Dialect, SqliteFileProvider};
pub use error::{ConfigurationError, OrmError, OrmResult};
pub use logging::{default_log_level, init_logging, logging_status, LogTarget};
pub use model::{assign, ColumnMeta, FieldError, Model};
pub use query::Orm;
pub use schema::{ColumnDescriptor, FieldColumnMap, ModelDescriptor, TableDescriptor};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
