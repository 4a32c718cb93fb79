mod common;

use common::{sqlite_config, AuditEntry, Membership, Person, Setting};
use rowmap_core::{ConfigurationError, Dialect, Orm, OrmConfig, OrmError};
use rusqlite::Connection;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[test]
fn person_lifecycle_scenario() {
    let (_dir, config) = sqlite_config();
    let orm = Orm::new(&config);
    orm.create_tables_if_not_exists().unwrap();

    assert!(orm.insert(&Person::new(1, "John", 18)).unwrap());
    let loaded = orm.fetch_by_id::<Person>(1).unwrap().unwrap();
    assert_eq!(loaded, Person::new(1, "John", 18));

    let older = Person { age: 19, ..loaded };
    assert!(orm.save(&older).unwrap());
    let reloaded = orm.fetch_by_id::<Person>(1).unwrap().unwrap();
    assert_eq!(reloaded.age, 19);
    assert_eq!(reloaded.id, 1);
    assert_eq!(reloaded.name, "John");

    assert!(orm.delete(&reloaded).unwrap());
    assert_eq!(orm.fetch_by_id::<Person>(1).unwrap(), None);
}

#[test]
fn fetch_single_returns_first_row_or_none() {
    let (_dir, config) = sqlite_config();
    let orm = Orm::new(&config);
    orm.create_tables_if_not_exists().unwrap();
    orm.insert(&Person::new(1, "Dustin", 26)).unwrap();

    let found: Option<Person> = orm
        .fetch_single("SELECT * FROM PEOPLE WHERE ID = 1")
        .unwrap();
    assert_eq!(found.map(|person| person.name), Some("Dustin".to_string()));

    let missing: Option<Person> = orm
        .fetch_single("SELECT * FROM PEOPLE WHERE ID = 500")
        .unwrap();
    assert_eq!(missing, None);

    let none: Vec<Person> = orm.fetch("SELECT * FROM PEOPLE WHERE ID = 500").unwrap();
    assert!(none.is_empty());
}

#[test]
fn update_changing_one_attribute_keeps_the_rest() {
    let (_dir, config) = sqlite_config();
    let orm = Orm::new(&config);
    orm.create_tables_if_not_exists().unwrap();
    orm.insert(&Person::new(250, "TestPerson", 25)).unwrap();

    let mut person = orm.fetch_by_id::<Person>(250).unwrap().unwrap();
    person.name = "Renamed".to_string();
    assert!(orm.update(&person).unwrap());

    assert_eq!(
        orm.fetch_by_id::<Person>(250).unwrap(),
        Some(Person::new(250, "Renamed", 25))
    );
}

#[test]
fn update_and_delete_of_missing_rows_report_false() {
    let (_dir, config) = sqlite_config();
    let orm = Orm::new(&config);
    orm.create_tables_if_not_exists().unwrap();

    let ghost = Person::new(1024, "Nobody", 1);
    assert!(!orm.save(&ghost).unwrap());
    assert!(!orm.delete(&ghost).unwrap());
    assert_eq!(orm.fetch_by_id::<Person>(1024).unwrap(), None);
}

#[test]
fn insert_lets_database_assign_keys_at_or_below_zero() {
    let (_dir, config) = sqlite_config();
    let orm = Orm::new(&config);
    orm.create_tables_if_not_exists().unwrap();

    assert!(orm.insert(&Person::new(0, "Zero", 30)).unwrap());
    // Negative keys are treated as unset as well; only `> 0` is persisted.
    assert!(orm.insert(&Person::new(-5, "Negative", 31)).unwrap());

    let people: Vec<Person> = orm.fetch("SELECT * FROM PEOPLE ORDER BY id").unwrap();
    assert_eq!(people.len(), 2);
    assert!(people.iter().all(|person| person.id > 0));
    assert_eq!(people[0].name, "Zero");
    assert_eq!(people[1].name, "Negative");
}

#[test]
fn fetch_all_returns_every_row_and_honors_limit() {
    let (_dir, config) = sqlite_config();
    let orm = Orm::new(&config);
    orm.create_tables_if_not_exists().unwrap();
    for id in 1..=3 {
        orm.insert(&Person::new(id, "Member", 20 + id as i32)).unwrap();
    }

    assert_eq!(orm.fetch_all::<Person>().unwrap().len(), 3);
    assert_eq!(orm.fetch_all_limit::<Person>(2).unwrap().len(), 2);
}

#[test]
fn boolean_and_real_columns_round_trip() {
    let (_dir, config) = sqlite_config();
    let orm = Orm::new(&config);
    orm.create_tables_if_not_exists().unwrap();

    let on = Setting {
        id: 1,
        key: "dark_mode".to_string(),
        enabled: true,
        ratio: 0.75,
    };
    let off = Setting {
        id: 2,
        key: "beta".to_string(),
        enabled: false,
        ratio: 1.5,
    };
    orm.insert(&on).unwrap();
    orm.insert(&off).unwrap();

    assert_eq!(orm.fetch_by_id::<Setting>(1).unwrap(), Some(on));
    assert_eq!(orm.fetch_by_id::<Setting>(2).unwrap(), Some(off));

    let conn = orm.connection().unwrap();
    let stored: i64 = conn
        .query_row(
            "SELECT ENABLED FROM SETTINGS WHERE SETTING_ID = 1",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(stored, 1);
}

#[test]
fn quotes_in_text_values_are_stored_verbatim() {
    let (_dir, config) = sqlite_config();
    let orm = Orm::new(&config);
    orm.create_tables_if_not_exists().unwrap();

    let person = Person::new(7, "O'Brien \"Bob\"", 40);
    orm.insert(&person).unwrap();
    assert_eq!(orm.fetch_by_id::<Person>(7).unwrap(), Some(person));
}

#[test]
fn sql_errors_carry_the_offending_statement() {
    let (_dir, config) = sqlite_config();
    let orm = Orm::new(&config);

    let err = orm
        .fetch::<Person>("SELECT * FROM NOT_A_TABLE")
        .unwrap_err();
    match err {
        OrmError::Sql { sql, .. } => assert_eq!(sql, "SELECT * FROM NOT_A_TABLE"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_columns_in_result_are_reported() {
    let (_dir, config) = sqlite_config();
    let orm = Orm::new(&config);
    orm.create_tables_if_not_exists().unwrap();
    orm.insert(&Person::new(1, "John", 18)).unwrap();

    let err = orm
        .fetch::<Person>("SELECT id, name FROM PEOPLE")
        .unwrap_err();
    assert!(matches!(err, OrmError::Sql { .. }));
}

#[test]
fn incompatible_column_values_fail_field_conversion() {
    let (_dir, config) = sqlite_config();
    let orm = Orm::new(&config);
    orm.create_tables_if_not_exists().unwrap();
    orm.connection()
        .unwrap()
        .execute("INSERT INTO PEOPLE(id, name, age) VALUES (1, 'John', NULL)", [])
        .unwrap();

    let err = orm.fetch_by_id::<Person>(1).unwrap_err();
    match err {
        OrmError::FieldConversion { attribute, .. } => assert_eq!(attribute, "age"),
        other => panic!("unexpected error: {other}"),
    }

    orm.connection()
        .unwrap()
        .execute("UPDATE PEOPLE SET age = 'eighteen' WHERE id = 1", [])
        .unwrap();
    let err = orm.fetch::<Person>("SELECT * FROM PEOPLE").unwrap_err();
    assert!(matches!(
        err,
        OrmError::FieldConversion { ref attribute, .. } if attribute == "age"
    ));
}

#[test]
fn key_operations_fail_before_acquiring_a_connection() {
    let acquisitions = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&acquisitions);
    let config = OrmConfig::with_provider(Dialect::Sqlite, move || {
        counter.fetch_add(1, Ordering::SeqCst);
        Connection::open_in_memory()
    });
    let orm = Orm::new(&config);

    let entry = AuditEntry {
        message: "boot".to_string(),
    };
    for err in [
        orm.save(&entry).unwrap_err(),
        orm.delete(&entry).unwrap_err(),
    ] {
        assert_eq!(
            err.as_configuration(),
            Some(&ConfigurationError::MissingPrimaryKey {
                table: "AUDIT_LOG".to_string(),
            })
        );
    }
    let err = orm.fetch_by_id::<AuditEntry>(1).unwrap_err();
    assert!(matches!(
        err.as_configuration(),
        Some(ConfigurationError::MissingPrimaryKey { .. })
    ));

    let pair = Membership {
        group_id: 1,
        user_id: 2,
    };
    for err in [orm.save(&pair).unwrap_err(), orm.delete(&pair).unwrap_err()] {
        assert_eq!(
            err.as_configuration(),
            Some(&ConfigurationError::AmbiguousPrimaryKey {
                table: "MEMBERSHIPS".to_string(),
                count: 2,
            })
        );
    }

    assert_eq!(acquisitions.load(Ordering::SeqCst), 0);
}

#[test]
fn each_operation_acquires_its_own_connection() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("counted.db");
    let acquisitions = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&acquisitions);
    let mut config = OrmConfig::with_provider(Dialect::Sqlite, move || {
        counter.fetch_add(1, Ordering::SeqCst);
        Connection::open(&path)
    });
    config.register::<Person>().unwrap();
    let orm = Orm::new(&config);

    orm.create_tables_if_not_exists().unwrap();
    orm.insert(&Person::new(1, "John", 18)).unwrap();
    orm.fetch_by_id::<Person>(1).unwrap();
    orm.delete(&Person::new(1, "John", 18)).unwrap();

    assert_eq!(acquisitions.load(Ordering::SeqCst), 4);
}
