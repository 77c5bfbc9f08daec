// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Unit tests for the table catalog.

use crate::database::catalog::{Catalog, TableDescriptor};
use crate::error::ReedError;
use std::fs;
use tempfile::TempDir;

fn descriptor(dir: &TempDir, name: &str) -> TableDescriptor {
    TableDescriptor {
        columns: vec!["id".to_string(), "name".to_string()],
        storage_path: dir.path().join(name),
    }
}

#[test]
fn test_empty_catalog_is_created() {
    let dir = TempDir::new().unwrap();
    let catalog = Catalog::open(dir.path()).unwrap();

    assert!(catalog.table_names().is_empty());
    assert!(dir.path().join("catalog").exists());
}

#[test]
fn test_insert_and_lookup() {
    let dir = TempDir::new().unwrap();
    let mut catalog = Catalog::open(dir.path()).unwrap();

    catalog
        .insert("users".to_string(), descriptor(&dir, "users"))
        .unwrap();

    assert!(catalog.contains("users"));
    assert_eq!(
        catalog.get("users").unwrap().columns,
        vec!["id".to_string(), "name".to_string()]
    );
    assert!(catalog.get("orders").is_none());
}

#[test]
fn test_catalog_survives_reopen() {
    let dir = TempDir::new().unwrap();

    {
        let mut catalog = Catalog::open(dir.path()).unwrap();
        catalog
            .insert("users".to_string(), descriptor(&dir, "users"))
            .unwrap();
        catalog
            .insert("orders".to_string(), descriptor(&dir, "orders"))
            .unwrap();
    }

    let catalog = Catalog::open(dir.path()).unwrap();
    assert_eq!(
        catalog.table_names(),
        vec!["orders".to_string(), "users".to_string()]
    );
    assert_eq!(
        catalog.get("users").unwrap().storage_path,
        dir.path().join("users")
    );
}

#[test]
fn test_corrupt_catalog_is_reported() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("catalog"), b"{ not json").unwrap();

    assert!(matches!(
        Catalog::open(dir.path()),
        Err(ReedError::MetaCorrupt { .. })
    ));
}
