//! Database collaborators: dialects and connection providers.
//!
//! # Responsibility
//! - Centralize per-dialect DDL behavior in one closed enumeration.
//! - Abstract connection acquisition behind `ConnectionProvider`.
//!
//! # Invariants
//! - The mapping core never opens a connection except through a provider.

pub mod dialect;
mod provider;

pub use dialect::Dialect;
pub use provider::{ConnectionProvider, SqliteFileProvider};
