// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Correctness integration tests.
//!
//! Verifies statement semantics end to end:
//! - CRUD round trips and status messages
//! - Projection (star and explicit column lists)
//! - WHERE equality with class-strict value coercion
//! - Catalog errors (unknown table, duplicate create, arity)
//! - Syntax rejections answered as messages


use reedsql::{ReedError, Value};
use test_utils::*;

// ============================================================================
// CRUD round trip
// ============================================================================

#[test]
fn test_create_insert_select() {
    let (mut db, _temp) = create_test_database();

    assert_eq!(
        exec_message(&mut db, "CREATE TABLE users (id, name)"),
        "Table users created."
    );
    assert_eq!(
        exec_message(&mut db, "INSERT INTO users VALUES (1, 'Alice')"),
        "1 row inserted into users."
    );
    assert_eq!(
        exec_message(&mut db, "INSERT INTO users VALUES (2, 'Bob')"),
        "1 row inserted into users."
    );

    let rows = exec_rows(&mut db, "SELECT * FROM users");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].get("id"), Some(&Value::Int(1)));
    assert_eq!(rows[0].get("name"), Some(&Value::Str("Alice".to_string())));
    assert_eq!(rows[1].get("id"), Some(&Value::Int(2)));
}

#[test]
fn test_update_then_delete() {
    let (mut db, _temp) = create_test_database();

    exec(&mut db, "CREATE TABLE users (id, name)");
    exec(&mut db, "INSERT INTO users VALUES (1, 'Alice')");
    exec(&mut db, "INSERT INTO users VALUES (2, 'Bob')");

    assert_eq!(
        exec_message(&mut db, "UPDATE users SET name='Charlie' WHERE id=2"),
        "1 rows updated in users."
    );
    assert_eq!(
        exec_message(&mut db, "DELETE FROM users WHERE id=1"),
        "1 rows deleted from users."
    );

    let rows = exec_rows(&mut db, "SELECT * FROM users");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get("id"), Some(&Value::Int(2)));
    assert_eq!(
        rows[0].get("name"),
        Some(&Value::Str("Charlie".to_string()))
    );
}

#[test]
fn test_insert_same_key_overwrites() {
    let (mut db, _temp) = create_test_database();

    exec(&mut db, "CREATE TABLE t (k, v)");
    exec(&mut db, "INSERT INTO t VALUES (1, 'first')");
    exec(&mut db, "INSERT INTO t VALUES (1, 'second')");

    let rows = exec_rows(&mut db, "SELECT * FROM t");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get("v"), Some(&Value::Str("second".to_string())));
}

#[test]
fn test_select_returns_key_order() {
    let (mut db, _temp) = create_test_database();

    exec(&mut db, "CREATE TABLE t (k, v)");
    for key in [15, 8, 25, 5, 10, 20, 30] {
        exec(
            &mut db,
            &format!("INSERT INTO t VALUES ({}, 'v{}')", key, key),
        );
    }

    let rows = exec_rows(&mut db, "SELECT * FROM t");
    let keys: Vec<&Value> = rows.iter().filter_map(|row| row.get("k")).collect();
    assert_eq!(
        keys,
        vec![
            &Value::Int(5),
            &Value::Int(8),
            &Value::Int(10),
            &Value::Int(15),
            &Value::Int(20),
            &Value::Int(25),
            &Value::Int(30),
        ]
    );
}

// ============================================================================
// Projection
// ============================================================================

#[test]
fn test_select_explicit_columns() {
    let (mut db, _temp) = create_test_database();

    exec(&mut db, "CREATE TABLE users (id, name, city)");
    exec(&mut db, "INSERT INTO users VALUES (1, 'Alice', 'Berlin')");

    let rows = exec_rows(&mut db, "SELECT name FROM users");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].len(), 1);
    assert_eq!(rows[0].get("name"), Some(&Value::Str("Alice".to_string())));
}

#[test]
fn test_select_unknown_column_fails() {
    let (mut db, _temp) = create_test_database();

    exec(&mut db, "CREATE TABLE users (id, name)");
    assert!(matches!(
        db.execute("SELECT age FROM users"),
        Err(ReedError::UnknownColumn { .. })
    ));
}

#[test]
fn test_select_from_empty_table() {
    let (mut db, _temp) = create_test_database();

    exec(&mut db, "CREATE TABLE empty (k)");
    assert!(exec_rows(&mut db, "SELECT * FROM empty").is_empty());
}

// ============================================================================
// Value coercion in WHERE
// ============================================================================

#[test]
fn test_quoted_number_does_not_match_integer_key() {
    let (mut db, _temp) = create_test_database();

    exec(&mut db, "CREATE TABLE t (id, name)");
    exec(&mut db, "INSERT INTO t VALUES (1, 'Alice')");

    // '1' coerces into the float class and never equals the integer 1
    assert_eq!(
        exec_message(&mut db, "DELETE FROM t WHERE id='1'"),
        "0 rows deleted from t."
    );
    assert_eq!(exec_rows(&mut db, "SELECT * FROM t").len(), 1);

    assert_eq!(
        exec_message(&mut db, "DELETE FROM t WHERE id=1"),
        "1 rows deleted from t."
    );
    assert!(exec_rows(&mut db, "SELECT * FROM t").is_empty());
}

#[test]
fn test_where_matches_string_cell() {
    let (mut db, _temp) = create_test_database();

    exec(&mut db, "CREATE TABLE t (id, name)");
    exec(&mut db, "INSERT INTO t VALUES (1, 'Alice')");
    exec(&mut db, "INSERT INTO t VALUES (2, 'Bob')");
    exec(&mut db, "INSERT INTO t VALUES (3, 'Alice')");

    assert_eq!(
        exec_message(&mut db, "UPDATE t SET name='Carol' WHERE name='Alice'"),
        "2 rows updated in t."
    );
}

#[test]
fn test_float_cells_roundtrip_through_strings() {
    let (mut db, _temp) = create_test_database();

    exec(&mut db, "CREATE TABLE t (id, price)");
    // '9.5' coerces to a float cell; the same literal finds it again
    exec(&mut db, "INSERT INTO t VALUES (1, '9.5')");

    assert_eq!(
        exec_message(&mut db, "UPDATE t SET price='10.5' WHERE price='9.5'"),
        "1 rows updated in t."
    );
    let rows = exec_rows(&mut db, "SELECT * FROM t");
    assert_eq!(rows[0].get("price"), Some(&Value::Float(10.5)));
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_unknown_table() {
    let (mut db, _temp) = create_test_database();

    match db.execute("SELECT * FROM missing") {
        Err(ReedError::UnknownTable { name }) => assert_eq!(name, "missing"),
        other => panic!("Expected UnknownTable, got {:?}", other),
    }
    assert!(matches!(
        db.execute("INSERT INTO missing VALUES (1)"),
        Err(ReedError::UnknownTable { .. })
    ));
    assert!(matches!(
        db.execute("DELETE FROM missing WHERE k=1"),
        Err(ReedError::UnknownTable { .. })
    ));
}

#[test]
fn test_create_duplicate_table() {
    let (mut db, _temp) = create_test_database();

    exec(&mut db, "CREATE TABLE users (id)");
    match db.execute("CREATE TABLE users (id)") {
        Err(ReedError::TableExists { name }) => assert_eq!(name, "users"),
        other => panic!("Expected TableExists, got {:?}", other),
    }
}

#[test]
fn test_insert_arity_mismatch() {
    let (mut db, _temp) = create_test_database();

    exec(&mut db, "CREATE TABLE users (id, name)");
    match db.execute("INSERT INTO users VALUES (1)") {
        Err(ReedError::Arity {
            expected, given, ..
        }) => {
            assert_eq!(expected, 2);
            assert_eq!(given, 1);
        }
        other => panic!("Expected Arity, got {:?}", other),
    }
    match db.execute("INSERT INTO users VALUES (1, 'a', 'b')") {
        Err(ReedError::Arity { given, .. }) => assert_eq!(given, 3),
        other => panic!("Expected Arity, got {:?}", other),
    }
}

#[test]
fn test_syntax_error_is_answered_as_message() {
    let (mut db, _temp) = create_test_database();

    let message = exec_message(&mut db, "SELEKT * FROM users");
    assert!(message.starts_with("Syntax error"), "{}", message);

    let message = exec_message(&mut db, "CREATE TABLE (id)");
    assert!(message.starts_with("Syntax error"), "{}", message);
}
