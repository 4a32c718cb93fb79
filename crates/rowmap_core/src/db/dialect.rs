//! SQL dialect variants and their behavior table.
//!
//! # Invariants
//! - Dialects only affect generated DDL and registration guards; statement
//!   execution is dialect-agnostic.

/// Closed set of recognized SQL dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// Embedded single-file database.
    Sqlite,
    MySql,
    MariaDb,
    /// Any other client/server database.
    Generic,
}

// Message text of the SQLite JDBC driver; rusqlite does not raise it.
const SQLITE_SPURIOUS_DDL_ERROR: &str = "The prepared statement has been finalized";

impl Dialect {
    /// Detects the dialect from a connection URL such as
    /// `jdbc:sqlite:app.db` or `jdbc:mysql://localhost/app`.
    pub fn from_url(url: &str) -> Self {
        let upper = url.to_ascii_uppercase();
        if upper.contains("SQLITE") {
            Self::Sqlite
        } else if upper.contains("MARIADB") {
            Self::MariaDb
        } else if upper.contains("MYSQL") {
            Self::MySql
        } else {
            Self::Generic
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Sqlite => "sqlite",
            Self::MySql => "mysql",
            Self::MariaDb => "mariadb",
            Self::Generic => "generic",
        }
    }

    /// Column constraint appended to a primary-key column in DDL.
    pub fn primary_key_clause(self) -> &'static str {
        match self {
            // SQLite assigns INTEGER PRIMARY KEY values without a modifier.
            Self::Sqlite => " PRIMARY KEY",
            Self::MySql | Self::MariaDb | Self::Generic => " AUTO_INCREMENT PRIMARY KEY",
        }
    }

    pub fn supports_structured_dates(self) -> bool {
        !matches!(self, Self::Sqlite)
    }

    /// Returns whether a driver error raised while applying DDL is known to
    /// be spurious for this dialect and can be ignored.
    pub fn is_spurious_ddl_error(self, message: &str) -> bool {
        match self {
            Self::Sqlite => message.starts_with(SQLITE_SPURIOUS_DDL_ERROR),
            Self::MySql | Self::MariaDb | Self::Generic => false,
        }
    }
}

/// Returns whether `sql_type` declares a date or time column.
pub fn is_temporal_type(sql_type: &str) -> bool {
    let upper = sql_type.trim().to_ascii_uppercase();
    ["DATE", "TIME", "DATETIME", "TIMESTAMP"]
        .iter()
        .any(|prefix| upper.starts_with(prefix))
}
