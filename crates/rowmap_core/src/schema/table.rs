//! Table descriptor value object and its DDL rendering.

use super::column::ColumnDescriptor;
use crate::db::dialect::Dialect;
use crate::error::ConfigurationError;

/// Full schema shape of one mapped struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDescriptor {
    pub name: String,
    /// Columns in attribute declaration order.
    pub columns: Vec<ColumnDescriptor>,
}

impl TableDescriptor {
    /// Returns the table name, failing when the model declared none.
    ///
    /// Required by every schema-level operation (DDL, fetch-all, drop).
    pub fn require_name(&self, model: &'static str) -> Result<&str, ConfigurationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ConfigurationError::MissingTableName { model });
        }
        Ok(name)
    }

    /// Renders a `CREATE TABLE IF NOT EXISTS` statement terminated by `;\n`.
    pub fn create_ddl(
        &self,
        model: &'static str,
        dialect: Dialect,
    ) -> Result<String, ConfigurationError> {
        let name = self.require_name(model)?;
        let columns = self
            .columns
            .iter()
            .map(|column| {
                let nullable = if column.not_null { "NOT NULL" } else { "NULL" };
                let key = if column.primary_key {
                    dialect.primary_key_clause()
                } else {
                    ""
                };
                format!(
                    "\t{} {} {}{}",
                    column.name, column.sql_type, nullable, key
                )
            })
            .collect::<Vec<_>>()
            .join(",\n");

        Ok(format!("CREATE TABLE IF NOT EXISTS {name}(\n{columns}\n);\n"))
    }
}
