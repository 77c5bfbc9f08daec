// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! CLI smoke tests for the `reedsql` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn reedsql() -> Command {
    Command::cargo_bin("reedsql").expect("binary built")
}

#[test]
fn test_exec_create_and_select() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("data");

    reedsql()
        .args(["exec", "CREATE TABLE users (id, name)"])
        .arg(&data)
        .assert()
        .success()
        .stdout(predicate::str::contains("Table users created."));

    reedsql()
        .args(["exec", "INSERT INTO users VALUES (1, 'Alice')"])
        .arg(&data)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 row inserted into users."));

    reedsql()
        .args(["exec", "SELECT * FROM users"])
        .arg(&data)
        .assert()
        .success()
        .stdout(predicate::str::contains("Alice"));
}

#[test]
fn test_exec_json_format() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("data");

    reedsql()
        .args(["exec", "CREATE TABLE t (k)"])
        .arg(&data)
        .assert()
        .success();

    reedsql()
        .args(["exec", "INSERT INTO t VALUES (7)"])
        .arg(&data)
        .assert()
        .success();

    reedsql()
        .args(["exec", "SELECT * FROM t"])
        .arg(&data)
        .args(["--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"k\": 7"));
}

#[test]
fn test_exec_syntax_error_is_printed_as_result() {
    let dir = TempDir::new().unwrap();

    reedsql()
        .args(["exec", "SELEKT 1"])
        .arg(dir.path().join("data"))
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Syntax error"));
}

#[test]
fn test_exec_unknown_table_fails() {
    let dir = TempDir::new().unwrap();

    reedsql()
        .args(["exec", "SELECT * FROM missing"])
        .arg(dir.path().join("data"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_tables_subcommand() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("data");

    reedsql()
        .args(["tables"])
        .arg(&data)
        .assert()
        .success()
        .stdout(predicate::str::contains("No tables"));

    reedsql()
        .args(["exec", "CREATE TABLE users (id)"])
        .arg(&data)
        .assert()
        .success();

    reedsql()
        .args(["tables"])
        .arg(&data)
        .assert()
        .success()
        .stdout(predicate::str::contains("users"));
}
