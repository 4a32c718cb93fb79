//! Schema descriptors resolved from `Model` metadata.
//!
//! # Responsibility
//! - Describe tables and columns independently of any connection.
//! - Map struct attributes to column names and back.
//! - Hold the registered model set owned by `OrmConfig`.

pub mod column;
pub mod mapping;
pub mod registry;
pub mod resolver;
pub mod table;

pub use column::ColumnDescriptor;
pub use mapping::FieldColumnMap;
pub use registry::ModelRegistry;
pub use resolver::{ModelDescriptor, PrimaryKey};
pub use table::TableDescriptor;
