#![allow(dead_code)]

use rowmap_core::{assign, ColumnMeta, ConnectionSettings, FieldError, Model, OrmConfig};
use rusqlite::types::Value;
use tempfile::TempDir;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Person {
    pub id: i64,
    pub name: String,
    pub age: i32,
}

impl Person {
    pub fn new(id: i64, name: &str, age: i32) -> Self {
        Self {
            id,
            name: name.to_string(),
            age,
        }
    }
}

impl Model for Person {
    const TABLE_NAME: &'static str = "PEOPLE";
    const COLUMNS: &'static [ColumnMeta] = &[
        ColumnMeta::new("id", "id")
            .sql_type("INTEGER")
            .not_null()
            .primary_key(),
        ColumnMeta::new("name", "name"),
        ColumnMeta::new("age", "age").sql_type("INTEGER"),
    ];

    fn read_field(&self, attribute: &str) -> Option<Value> {
        match attribute {
            "id" => Some(Value::from(self.id)),
            "name" => Some(Value::from(self.name.clone())),
            "age" => Some(Value::from(self.age)),
            _ => None,
        }
    }

    fn write_field(&mut self, attribute: &str, value: Value) -> Result<(), FieldError> {
        match attribute {
            "id" => assign(attribute, &mut self.id, value),
            "name" => assign(attribute, &mut self.name, value),
            "age" => assign(attribute, &mut self.age, value),
            _ => Err(FieldError::Unmapped(attribute.to_string())),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Setting {
    pub id: i64,
    pub key: String,
    pub enabled: bool,
    pub ratio: f64,
}

impl Model for Setting {
    const TABLE_NAME: &'static str = "SETTINGS";
    const COLUMNS: &'static [ColumnMeta] = &[
        ColumnMeta::new("id", "SETTING_ID")
            .sql_type("INTEGER")
            .not_null()
            .primary_key(),
        ColumnMeta::new("key", "SETTING_KEY")
            .sql_type("VARCHAR(64)")
            .not_null(),
        ColumnMeta::new("enabled", "ENABLED").sql_type("BOOLEAN"),
        ColumnMeta::new("ratio", "RATIO").sql_type("DOUBLE"),
    ];

    fn read_field(&self, attribute: &str) -> Option<Value> {
        match attribute {
            "id" => Some(Value::from(self.id)),
            "key" => Some(Value::from(self.key.clone())),
            "enabled" => Some(Value::from(self.enabled)),
            "ratio" => Some(Value::from(self.ratio)),
            _ => None,
        }
    }

    fn write_field(&mut self, attribute: &str, value: Value) -> Result<(), FieldError> {
        match attribute {
            "id" => assign(attribute, &mut self.id, value),
            "key" => assign(attribute, &mut self.key, value),
            "enabled" => assign(attribute, &mut self.enabled, value),
            "ratio" => assign(attribute, &mut self.ratio, value),
            _ => Err(FieldError::Unmapped(attribute.to_string())),
        }
    }
}

/// A model without any primary key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditEntry {
    pub message: String,
}

impl Model for AuditEntry {
    const TABLE_NAME: &'static str = "AUDIT_LOG";
    const COLUMNS: &'static [ColumnMeta] = &[ColumnMeta::new("message", "MESSAGE")];

    fn read_field(&self, attribute: &str) -> Option<Value> {
        (attribute == "message").then(|| Value::from(self.message.clone()))
    }

    fn write_field(&mut self, attribute: &str, value: Value) -> Result<(), FieldError> {
        match attribute {
            "message" => assign(attribute, &mut self.message, value),
            _ => Err(FieldError::Unmapped(attribute.to_string())),
        }
    }
}

/// A model with two primary keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Membership {
    pub group_id: i64,
    pub user_id: i64,
}

impl Model for Membership {
    const TABLE_NAME: &'static str = "MEMBERSHIPS";
    const COLUMNS: &'static [ColumnMeta] = &[
        ColumnMeta::new("group_id", "GROUP_ID")
            .sql_type("INTEGER")
            .primary_key(),
        ColumnMeta::new("user_id", "USER_ID")
            .sql_type("INTEGER")
            .primary_key(),
    ];

    fn read_field(&self, attribute: &str) -> Option<Value> {
        match attribute {
            "group_id" => Some(Value::from(self.group_id)),
            "user_id" => Some(Value::from(self.user_id)),
            _ => None,
        }
    }

    fn write_field(&mut self, attribute: &str, value: Value) -> Result<(), FieldError> {
        match attribute {
            "group_id" => assign(attribute, &mut self.group_id, value),
            "user_id" => assign(attribute, &mut self.user_id, value),
            _ => Err(FieldError::Unmapped(attribute.to_string())),
        }
    }
}

/// A model declaring a date column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reminder {
    pub id: i64,
    pub created: String,
}

impl Model for Reminder {
    const TABLE_NAME: &'static str = "DATE_TEST";
    const COLUMNS: &'static [ColumnMeta] = &[
        ColumnMeta::new("id", "ID")
            .sql_type("INTEGER(11)")
            .not_null()
            .primary_key(),
        ColumnMeta::new("created", "CREATED_DATE")
            .sql_type("DATE")
            .not_null(),
    ];

    fn read_field(&self, attribute: &str) -> Option<Value> {
        match attribute {
            "id" => Some(Value::from(self.id)),
            "created" => Some(Value::from(self.created.clone())),
            _ => None,
        }
    }

    fn write_field(&mut self, attribute: &str, value: Value) -> Result<(), FieldError> {
        match attribute {
            "id" => assign(attribute, &mut self.id, value),
            "created" => assign(attribute, &mut self.created, value),
            _ => Err(FieldError::Unmapped(attribute.to_string())),
        }
    }
}

/// A model that forgot its table name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Untitled {
    pub id: i64,
}

impl Model for Untitled {
    const TABLE_NAME: &'static str = "";
    const COLUMNS: &'static [ColumnMeta] = &[ColumnMeta::new("id", "id")
        .sql_type("INTEGER")
        .primary_key()];

    fn read_field(&self, attribute: &str) -> Option<Value> {
        (attribute == "id").then(|| Value::from(self.id))
    }

    fn write_field(&mut self, attribute: &str, value: Value) -> Result<(), FieldError> {
        match attribute {
            "id" => assign(attribute, &mut self.id, value),
            _ => Err(FieldError::Unmapped(attribute.to_string())),
        }
    }
}

/// A model whose column name is an SQL keyword, so SQLite rejects its DDL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keyworded {
    pub id: i64,
    pub choice: String,
}

impl Model for Keyworded {
    const TABLE_NAME: &'static str = "KEYWORDED";
    const COLUMNS: &'static [ColumnMeta] = &[
        ColumnMeta::new("id", "id")
            .sql_type("INTEGER")
            .not_null()
            .primary_key(),
        ColumnMeta::new("choice", "select"),
    ];

    fn read_field(&self, attribute: &str) -> Option<Value> {
        match attribute {
            "id" => Some(Value::from(self.id)),
            "choice" => Some(Value::from(self.choice.clone())),
            _ => None,
        }
    }

    fn write_field(&mut self, attribute: &str, value: Value) -> Result<(), FieldError> {
        match attribute {
            "id" => assign(attribute, &mut self.id, value),
            "choice" => assign(attribute, &mut self.choice, value),
            _ => Err(FieldError::Unmapped(attribute.to_string())),
        }
    }
}

/// Opens a SQLite file database in a fresh temp dir with `Person` and
/// `Setting` registered and their tables created.
pub fn sqlite_config() -> (TempDir, OrmConfig) {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("jdbc:sqlite:{}", dir.path().join("TEST_DATABASE.db").display());
    let mut config = OrmConfig::from_settings(ConnectionSettings::new(url)).unwrap();
    config.register::<Person>().unwrap();
    config.register::<Setting>().unwrap();
    (dir, config)
}
