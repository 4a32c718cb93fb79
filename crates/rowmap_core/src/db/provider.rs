//! Connection providers.
//!
//! # Responsibility
//! - Hand out one physical connection per logical operation.
//! - Configure SQLite connections opened from a URL or path.
//!
//! # Invariants
//! - Providers never cache or share a connection between acquisitions.
//! - Returned SQLite connections have `foreign_keys=ON` and a busy timeout.

use crate::error::ConfigurationError;
use log::{debug, error};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);
const MEMORY_TARGET: &str = ":memory:";

/// Sole source of connections for the query facade.
///
/// Implementations must be safe for concurrent acquisition when the facade
/// is shared across threads. Any `Fn() -> rusqlite::Result<Connection>`
/// closure is a provider, which covers caller-managed data sources.
pub trait ConnectionProvider: Send + Sync {
    fn acquire(&self) -> rusqlite::Result<Connection>;
}

impl<F> ConnectionProvider for F
where
    F: Fn() -> rusqlite::Result<Connection> + Send + Sync,
{
    fn acquire(&self) -> rusqlite::Result<Connection> {
        self()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum SqliteTarget {
    File(PathBuf),
    Memory,
}

/// Opens SQLite connections to a database file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqliteFileProvider {
    target: SqliteTarget,
}

impl SqliteFileProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            target: SqliteTarget::File(path.into()),
        }
    }

    /// Provider for `:memory:` databases. Every acquisition yields a fresh,
    /// empty database.
    pub fn in_memory() -> Self {
        Self {
            target: SqliteTarget::Memory,
        }
    }

    /// Parses `jdbc:sqlite:<path>`, `sqlite:<path>` or `sqlite://<path>`.
    pub fn from_url(url: &str) -> Result<Self, ConfigurationError> {
        let trimmed = url.trim();
        let without_jdbc = strip_prefix_ignore_case(trimmed, "jdbc:").unwrap_or(trimmed);
        let location = strip_prefix_ignore_case(without_jdbc, "sqlite:")
            .ok_or_else(|| ConfigurationError::InvalidUrl(url.to_string()))?;
        let location = location.strip_prefix("//").unwrap_or(location);

        if location.is_empty() || location == MEMORY_TARGET {
            return Ok(Self::in_memory());
        }
        Ok(Self::new(location))
    }

    /// Database file path, or `None` for in-memory targets.
    pub fn path(&self) -> Option<&Path> {
        match &self.target {
            SqliteTarget::File(path) => Some(path.as_path()),
            SqliteTarget::Memory => None,
        }
    }

    fn mode(&self) -> &'static str {
        match self.target {
            SqliteTarget::File(_) => "file",
            SqliteTarget::Memory => "memory",
        }
    }
}

impl ConnectionProvider for SqliteFileProvider {
    fn acquire(&self) -> rusqlite::Result<Connection> {
        let started_at = Instant::now();
        let opened = match &self.target {
            SqliteTarget::File(path) => Connection::open(path),
            SqliteTarget::Memory => Connection::open_in_memory(),
        };

        let conn = opened.and_then(|conn| {
            bootstrap_connection(&conn)?;
            Ok(conn)
        });

        match &conn {
            Ok(_) => debug!(
                "event=db_open module=db status=ok mode={} duration_ms={}",
                self.mode(),
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=db_open module=db status=error mode={} duration_ms={} error_code=db_open_failed error={}",
                self.mode(),
                started_at.elapsed().as_millis(),
                err
            ),
        }
        conn
    }
}

fn bootstrap_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    Ok(())
}

fn strip_prefix_ignore_case<'a>(value: &'a str, prefix: &str) -> Option<&'a str> {
    let head = value.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        Some(&value[prefix.len()..])
    } else {
        None
    }
}
