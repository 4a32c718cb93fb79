//! Schema script generation for registered models.

use crate::db::dialect::Dialect;
use crate::error::ConfigurationError;
use crate::schema::ModelRegistry;

/// Renders one `CREATE TABLE IF NOT EXISTS` statement per registered model,
/// in registration order.
pub fn create_script(
    registry: &ModelRegistry,
    dialect: Dialect,
) -> Result<String, ConfigurationError> {
    let mut script = String::new();
    for descriptor in registry.descriptors() {
        script.push_str(
            &descriptor
                .table()
                .create_ddl(descriptor.model_name(), dialect)?,
        );
    }
    Ok(script)
}

/// Splits a script on `;`, dropping blank fragments.
pub fn split_statements(script: &str) -> Vec<&str> {
    script
        .split(';')
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .collect()
}
