//! Column descriptor value object.

use crate::coerce::TypeClass;
use crate::model::ColumnMeta;

/// One database column derived from a mapped attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    /// Column name, verbatim from metadata.
    pub name: String,
    pub sql_type: String,
    pub not_null: bool,
    pub primary_key: bool,
}

impl ColumnDescriptor {
    pub fn type_class(&self) -> TypeClass {
        TypeClass::classify(&self.sql_type)
    }
}

impl From<&ColumnMeta> for ColumnDescriptor {
    fn from(meta: &ColumnMeta) -> Self {
        Self {
            name: meta.column.to_string(),
            sql_type: meta.sql_type.to_string(),
            not_null: meta.not_null,
            primary_key: meta.primary_key,
        }
    }
}
