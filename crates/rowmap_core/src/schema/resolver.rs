//! Metadata resolver: turns `Model` metadata into descriptors.
//!
//! # Responsibility
//! - Build the table descriptor and field-column map in one pass.
//! - Validate that every declared attribute is mapped and readable.
//! - Answer primary-key questions for statement construction.
//!
//! # Invariants
//! - Descriptors are immutable after `resolve` returns.
//! - Column order equals attribute declaration order.

use super::column::ColumnDescriptor;
use super::mapping::FieldColumnMap;
use super::table::TableDescriptor;
use crate::error::ConfigurationError;
use crate::model::Model;
use std::collections::HashSet;

/// Resolved mapping of one `Model` type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelDescriptor {
    model: &'static str,
    table: TableDescriptor,
    fields: FieldColumnMap,
}

/// The single primary key of a model.
#[derive(Debug, Clone, Copy)]
pub struct PrimaryKey<'a> {
    pub attribute: &'static str,
    pub column: &'a ColumnDescriptor,
}

impl ModelDescriptor {
    /// Introspects `T`'s declared metadata.
    ///
    /// # Errors
    /// - `UnmappedAttribute` when an attribute has a blank column name or
    ///   `read_field` does not recognize it.
    /// - `DuplicateAttribute` when an attribute is declared twice.
    pub fn resolve<T: Model>() -> Result<Self, ConfigurationError> {
        let model = T::model_name();
        let probe = T::default();
        let mut seen = HashSet::new();
        let mut columns = Vec::with_capacity(T::COLUMNS.len());
        let mut entries = Vec::with_capacity(T::COLUMNS.len());

        for meta in T::COLUMNS {
            if meta.column.trim().is_empty() || probe.read_field(meta.attribute).is_none() {
                return Err(ConfigurationError::UnmappedAttribute {
                    model,
                    attribute: meta.attribute.to_string(),
                });
            }
            if !seen.insert(meta.attribute) {
                return Err(ConfigurationError::DuplicateAttribute {
                    model,
                    attribute: meta.attribute.to_string(),
                });
            }
            columns.push(ColumnDescriptor::from(meta));
            entries.push((meta.attribute, meta.column));
        }

        Ok(Self {
            model,
            table: TableDescriptor {
                name: T::TABLE_NAME.to_string(),
                columns,
            },
            fields: FieldColumnMap::from_entries(entries),
        })
    }

    pub fn model_name(&self) -> &'static str {
        self.model
    }

    pub fn table(&self) -> &TableDescriptor {
        &self.table
    }

    pub fn fields(&self) -> &FieldColumnMap {
        &self.fields
    }

    /// Returns the table name or `MissingTableName`.
    pub fn table_name(&self) -> Result<&str, ConfigurationError> {
        self.table.require_name(self.model)
    }

    /// Iterates `(attribute, column)` pairs in declaration order.
    pub fn columns(&self) -> impl Iterator<Item = (&'static str, &ColumnDescriptor)> + '_ {
        self.fields
            .iter()
            .map(|(attribute, _)| attribute)
            .zip(self.table.columns.iter())
    }

    /// Returns the single numeric primary key.
    ///
    /// # Errors
    /// - `MissingPrimaryKey` / `AmbiguousPrimaryKey` unless exactly one key
    ///   is declared.
    /// - `NonNumericPrimaryKey` when the key's type is not numeric.
    pub fn primary_key(&self) -> Result<PrimaryKey<'_>, ConfigurationError> {
        let keys: Vec<_> = self
            .columns()
            .filter(|(_, column)| column.primary_key)
            .collect();

        match keys.as_slice() {
            [] => Err(ConfigurationError::MissingPrimaryKey {
                table: self.table.name.clone(),
            }),
            [(attribute, column)] => {
                if !column.type_class().is_numeric() {
                    return Err(ConfigurationError::NonNumericPrimaryKey {
                        table: self.table.name.clone(),
                        column: column.name.clone(),
                        sql_type: column.sql_type.clone(),
                    });
                }
                Ok(PrimaryKey {
                    attribute: *attribute,
                    column: *column,
                })
            }
            many => Err(ConfigurationError::AmbiguousPrimaryKey {
                table: self.table.name.clone(),
                count: many.len(),
            }),
        }
    }
}
