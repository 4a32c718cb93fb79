//! Query facade orchestrating descriptors, statements and materialization.
//!
//! # Responsibility
//! - Expose CRUD and fetch entry points over any registered `Model`.
//! - Acquire one connection per operation and release it before returning.
//!
//! # Invariants
//! - Configuration errors surface before a connection is acquired.
//! - Single-row fetches return `Ok(None)` when nothing matches.
//! - Log events carry table names, row counts and durations, never values.

use super::materialize::{materialize_all, materialize_first};
use crate::config::OrmConfig;
use crate::error::{OrmError, OrmResult};
use crate::model::Model;
use crate::schema::ModelDescriptor;
use crate::sql::{self, Statement};
use log::{debug, error, info, trace, warn};
use rusqlite::{params_from_iter, Connection};
use std::time::Instant;

/// CRUD entry points bound to one configuration.
#[derive(Debug, Clone, Copy)]
pub struct Orm<'cfg> {
    config: &'cfg OrmConfig,
}

impl<'cfg> Orm<'cfg> {
    pub fn new(config: &'cfg OrmConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &'cfg OrmConfig {
        self.config
    }

    /// Acquires a raw connection from the configured provider.
    pub fn connection(&self) -> OrmResult<Connection> {
        self.config.provider().acquire().map_err(|err| {
            error!(
                "event=connection_acquire module=query status=error error_code=acquire_failed error={}",
                err
            );
            OrmError::Connection(err)
        })
    }

    /// Inserts `object`. Returns whether at least one row was written.
    pub fn insert<T: Model>(&self, object: &T) -> OrmResult<bool> {
        let descriptor = self.config.descriptor::<T>()?;
        let statement = sql::insert(&descriptor, object)?;
        Ok(self.execute("insert", &descriptor, &statement)? > 0)
    }

    /// Updates the row identified by `object`'s primary key.
    ///
    /// # Errors
    /// - `ConfigurationError` unless the model has exactly one numeric key.
    pub fn save<T: Model>(&self, object: &T) -> OrmResult<bool> {
        let descriptor = self.config.descriptor::<T>()?;
        let statement = sql::update(&descriptor, object)?;
        Ok(self.execute("update", &descriptor, &statement)? > 0)
    }

    /// Alias of [`Orm::save`].
    pub fn update<T: Model>(&self, object: &T) -> OrmResult<bool> {
        self.save(object)
    }

    /// Deletes the row identified by `object`'s primary key.
    pub fn delete<T: Model>(&self, object: &T) -> OrmResult<bool> {
        let descriptor = self.config.descriptor::<T>()?;
        let statement = sql::delete(&descriptor, object)?;
        Ok(self.execute("delete", &descriptor, &statement)? > 0)
    }

    /// Runs caller-supplied SQL and materializes the first row, if any.
    pub fn fetch_single<T: Model>(&self, sql: &str) -> OrmResult<Option<T>> {
        let descriptor = self.config.descriptor::<T>()?;
        self.query_first("fetch_single", &descriptor, sql)
    }

    /// Fetches the row whose primary key equals `id`.
    pub fn fetch_by_id<T: Model>(&self, id: i64) -> OrmResult<Option<T>> {
        let descriptor = self.config.descriptor::<T>()?;
        let sql = sql::select_by_id(&descriptor, id)?;
        self.query_first("fetch_by_id", &descriptor, &sql)
    }

    /// Runs caller-supplied SQL and materializes every row.
    pub fn fetch<T: Model>(&self, sql: &str) -> OrmResult<Vec<T>> {
        let descriptor = self.config.descriptor::<T>()?;
        self.query_all("fetch", &descriptor, sql)
    }

    pub fn fetch_all<T: Model>(&self) -> OrmResult<Vec<T>> {
        let descriptor = self.config.descriptor::<T>()?;
        let sql = sql::select_all(&descriptor, None)?;
        self.query_all("fetch_all", &descriptor, &sql)
    }

    /// Like [`Orm::fetch_all`], capped at `limit` rows.
    pub fn fetch_all_limit<T: Model>(&self, limit: u32) -> OrmResult<Vec<T>> {
        let descriptor = self.config.descriptor::<T>()?;
        let sql = sql::select_all(&descriptor, Some(limit))?;
        self.query_all("fetch_all", &descriptor, &sql)
    }

    pub fn drop_table<T: Model>(&self) -> OrmResult<()> {
        let descriptor = self.config.descriptor::<T>()?;
        let sql = sql::drop_table(&descriptor)?;
        let statement = Statement {
            literal: sql.clone(),
            sql,
            params: Vec::new(),
        };
        self.execute("drop_table", &descriptor, &statement)?;
        Ok(())
    }

    /// Returns `CREATE TABLE IF NOT EXISTS` text for every registered model.
    pub fn table_create_ddl(&self) -> OrmResult<String> {
        Ok(sql::create_script(
            self.config.registry(),
            self.config.dialect(),
        )?)
    }

    /// Applies [`Orm::table_create_ddl`] one statement at a time.
    ///
    /// A driver error the dialect marks as spurious is logged and skipped.
    pub fn create_tables_if_not_exists(&self) -> OrmResult<()> {
        let script = self.table_create_ddl()?;
        let dialect = self.config.dialect();
        let started_at = Instant::now();
        let conn = self.connection()?;
        let mut applied = 0_usize;

        for statement in sql::split_statements(&script) {
            match conn.execute(statement, []) {
                Ok(_) => applied += 1,
                Err(err) if dialect.is_spurious_ddl_error(&err.to_string()) => {
                    warn!(
                        "event=schema_apply module=query status=ignored dialect={} error={}",
                        dialect.name(),
                        err
                    );
                }
                Err(err) => {
                    error!(
                        "event=schema_apply module=query status=error dialect={} error_code=ddl_failed error={}",
                        dialect.name(),
                        err
                    );
                    return Err(OrmError::sql(statement, err));
                }
            }
        }

        info!(
            "event=schema_apply module=query status=ok dialect={} statements={} duration_ms={}",
            dialect.name(),
            applied,
            started_at.elapsed().as_millis()
        );
        Ok(())
    }

    fn execute(
        &self,
        op: &str,
        descriptor: &ModelDescriptor,
        statement: &Statement,
    ) -> OrmResult<usize> {
        let started_at = Instant::now();
        trace!("event=sql_exec module=query op={op} sql={}", statement.sql);
        let conn = self.connection()?;

        match conn.execute(&statement.sql, params_from_iter(statement.params.iter())) {
            Ok(rows) => {
                debug!(
                    "event=sql_exec module=query status=ok op={} table={} rows={} duration_ms={}",
                    op,
                    descriptor.table().name,
                    rows,
                    started_at.elapsed().as_millis()
                );
                Ok(rows)
            }
            Err(err) => {
                error!(
                    "event=sql_exec module=query status=error op={} table={} duration_ms={} error_code=statement_failed error={}",
                    op,
                    descriptor.table().name,
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(OrmError::sql(statement.sql.as_str(), err))
            }
        }
    }

    fn query_first<T: Model>(
        &self,
        op: &str,
        descriptor: &ModelDescriptor,
        sql: &str,
    ) -> OrmResult<Option<T>> {
        let started_at = Instant::now();
        let conn = self.connection()?;
        let mut stmt = conn.prepare(sql).map_err(|err| OrmError::sql(sql, err))?;
        let mut rows = stmt.query([]).map_err(|err| OrmError::sql(sql, err))?;
        let object = materialize_first(descriptor, &mut rows, sql)?;

        debug!(
            "event=sql_query module=query status=ok op={} table={} found={} duration_ms={}",
            op,
            descriptor.table().name,
            object.is_some(),
            started_at.elapsed().as_millis()
        );
        Ok(object)
    }

    fn query_all<T: Model>(
        &self,
        op: &str,
        descriptor: &ModelDescriptor,
        sql: &str,
    ) -> OrmResult<Vec<T>> {
        let started_at = Instant::now();
        let conn = self.connection()?;
        let mut stmt = conn.prepare(sql).map_err(|err| OrmError::sql(sql, err))?;
        let mut rows = stmt.query([]).map_err(|err| OrmError::sql(sql, err))?;
        let objects = materialize_all(descriptor, &mut rows, sql)?;

        debug!(
            "event=sql_query module=query status=ok op={} table={} rows={} duration_ms={}",
            op,
            descriptor.table().name,
            objects.len(),
            started_at.elapsed().as_millis()
        );
        Ok(objects)
    }
}
