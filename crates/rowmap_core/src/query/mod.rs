//! Query execution: the `Orm` facade and row materialization.
//!
//! # Responsibility
//! - Run generated and caller-supplied SQL through the configured provider.
//! - Turn result rows into `Model` instances.

mod facade;
pub mod materialize;

pub use facade::Orm;
