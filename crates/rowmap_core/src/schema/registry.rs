//! Registered model set keyed by type identity.
//!
//! # Responsibility
//! - Resolve each registered `Model` exactly once.
//! - Enforce dialect guards at registration time.
//! - Enumerate registered tables in registration order for DDL.
//!
//! # Invariants
//! - Registering the same type twice is a no-op returning the first
//!   descriptor.
//! - The registry is only mutated through `&mut`, i.e. at configuration
//!   time; query paths read it through shared references.

use super::resolver::ModelDescriptor;
use crate::db::dialect::{is_temporal_type, Dialect};
use crate::error::ConfigurationError;
use crate::model::Model;
use log::{info, warn};
use std::any::TypeId;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Default)]
pub struct ModelRegistry {
    ordered: Vec<Arc<ModelDescriptor>>,
    by_type: HashMap<TypeId, usize>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves and stores `T`'s descriptor.
    ///
    /// # Errors
    /// - Any resolution error from `ModelDescriptor::resolve`.
    /// - `UnsupportedColumnType` when `dialect` lacks structured dates and
    ///   `T` declares a date/time column.
    pub fn register<T: Model>(
        &mut self,
        dialect: Dialect,
    ) -> Result<Arc<ModelDescriptor>, ConfigurationError> {
        if let Some(existing) = self.get::<T>() {
            return Ok(existing);
        }

        let descriptor = ModelDescriptor::resolve::<T>()?;
        if !dialect.supports_structured_dates() {
            if let Some(column) = descriptor
                .table()
                .columns
                .iter()
                .find(|column| is_temporal_type(&column.sql_type))
            {
                warn!(
                    "event=model_register module=schema status=rejected model={} dialect={} reason=temporal_column",
                    descriptor.model_name(),
                    dialect.name()
                );
                return Err(ConfigurationError::UnsupportedColumnType {
                    table: descriptor.table().name.clone(),
                    column: column.name.clone(),
                    sql_type: column.sql_type.clone(),
                    dialect: dialect.name(),
                });
            }
        }

        info!(
            "event=model_register module=schema status=ok model={} table={} columns={}",
            descriptor.model_name(),
            descriptor.table().name,
            descriptor.table().columns.len()
        );

        let descriptor = Arc::new(descriptor);
        self.by_type.insert(TypeId::of::<T>(), self.ordered.len());
        self.ordered.push(Arc::clone(&descriptor));
        Ok(descriptor)
    }

    pub fn get<T: Model>(&self) -> Option<Arc<ModelDescriptor>> {
        self.by_type
            .get(&TypeId::of::<T>())
            .map(|index| Arc::clone(&self.ordered[*index]))
    }

    pub fn contains<T: Model>(&self) -> bool {
        self.by_type.contains_key(&TypeId::of::<T>())
    }

    /// Iterates descriptors in registration order.
    pub fn descriptors(&self) -> impl Iterator<Item = &ModelDescriptor> + '_ {
        self.ordered.iter().map(Arc::as_ref)
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}
