//! Mapping configuration: connection settings, dialect and model set.
//!
//! # Responsibility
//! - Own the registered model set and the connection provider.
//! - Derive the dialect from the connection URL.
//!
//! # Invariants
//! - Models are registered through `&mut OrmConfig` only; the query facade
//!   borrows the configuration immutably.
//! - Several configurations may coexist; there is no process-wide state.

use crate::db::{ConnectionProvider, Dialect, SqliteFileProvider};
use crate::error::ConfigurationError;
use crate::model::Model;
use crate::schema::{ModelDescriptor, ModelRegistry};
use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

const DEFAULT_PORT: u16 = 3306;

/// Connection settings as loaded from an application config file.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionSettings {
    /// e.g. `jdbc:sqlite:app.db`; also selects the dialect.
    pub url: String,
    pub database_name: String,
    pub username: String,
    pub password: String,
    pub port: u16,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            url: String::new(),
            database_name: String::new(),
            username: String::new(),
            password: String::new(),
            port: DEFAULT_PORT,
        }
    }
}

impl ConnectionSettings {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn dialect(&self) -> Dialect {
        Dialect::from_url(&self.url)
    }

    /// Whether both username and password are set.
    pub fn has_credentials(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }
}

impl Debug for ConnectionSettings {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionSettings")
            .field("url", &self.url)
            .field("database_name", &self.database_name)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("port", &self.port)
            .finish()
    }
}

/// Explicit configuration handed to the query facade.
pub struct OrmConfig {
    settings: Option<ConnectionSettings>,
    dialect: Dialect,
    registry: ModelRegistry,
    provider: Box<dyn ConnectionProvider>,
}

impl OrmConfig {
    /// Builds a configuration whose connections are opened from
    /// `settings.url`.
    ///
    /// # Errors
    /// - `InvalidUrl` when the URL does not name a SQLite database; other
    ///   engines need a caller-supplied provider (`with_provider`).
    pub fn from_settings(settings: ConnectionSettings) -> Result<Self, ConfigurationError> {
        let provider = SqliteFileProvider::from_url(&settings.url)?;
        // SQLite authenticates by file access alone.
        if settings.has_credentials() {
            warn!(
                "event=config_build module=config status=credentials_ignored dialect={}",
                settings.dialect().name()
            );
        }
        Ok(Self {
            dialect: settings.dialect(),
            settings: Some(settings),
            registry: ModelRegistry::new(),
            provider: Box::new(provider),
        })
    }

    /// Builds a configuration around a caller-supplied provider.
    pub fn with_provider(dialect: Dialect, provider: impl ConnectionProvider + 'static) -> Self {
        Self {
            settings: None,
            dialect,
            registry: ModelRegistry::new(),
            provider: Box::new(provider),
        }
    }

    /// Registers `T`, resolving its descriptor once.
    pub fn register<T: Model>(&mut self) -> Result<Arc<ModelDescriptor>, ConfigurationError> {
        self.registry.register::<T>(self.dialect)
    }

    pub fn settings(&self) -> Option<&ConnectionSettings> {
        self.settings.as_ref()
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    pub fn provider(&self) -> &dyn ConnectionProvider {
        self.provider.as_ref()
    }

    /// Returns the registered descriptor for `T`, or resolves one for this
    /// call without touching the registry.
    pub(crate) fn descriptor<T: Model>(&self) -> Result<Arc<ModelDescriptor>, ConfigurationError> {
        match self.registry.get::<T>() {
            Some(descriptor) => Ok(descriptor),
            None => ModelDescriptor::resolve::<T>().map(Arc::new),
        }
    }
}

impl Debug for OrmConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrmConfig")
            .field("settings", &self.settings)
            .field("dialect", &self.dialect)
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}
