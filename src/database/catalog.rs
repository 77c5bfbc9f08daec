// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Persisted table catalog.
//!
//! The catalog is a single JSON file in the data directory mapping each
//! table name onto its descriptor. It is rewritten whole after every
//! CREATE TABLE; descriptors are never mutated afterwards.

use crate::error::{ReedError, ReedResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the catalog file inside the data directory.
const CATALOG_FILE: &str = "catalog";

/// Descriptor of one table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableDescriptor {
    /// Declared column names, positional. The first is the key column.
    pub columns: Vec<String>,

    /// Directory holding the table's B-tree.
    pub storage_path: PathBuf,
}

/// In-process mirror of the catalog file.
#[derive(Debug)]
pub struct Catalog {
    /// Path of the catalog file.
    path: PathBuf,

    /// `table name → descriptor`.
    tables: HashMap<String, TableDescriptor>,
}

impl Catalog {
    /// Open the catalog of a data directory, creating an empty one on
    /// first use.
    pub fn open(data_dir: &Path) -> ReedResult<Self> {
        let path = data_dir.join(CATALOG_FILE);

        let tables = if path.exists() {
            let bytes = fs::read(&path).map_err(|e| ReedError::Io {
                operation: "read_catalog".to_string(),
                reason: e.to_string(),
            })?;
            serde_json::from_slice(&bytes).map_err(|e| ReedError::MetaCorrupt {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?
        } else {
            HashMap::new()
        };

        let catalog = Self { path, tables };
        if !catalog.path.exists() {
            catalog.save()?;
        }
        Ok(catalog)
    }

    /// Look up a table descriptor.
    pub fn get(&self, name: &str) -> Option<&TableDescriptor> {
        self.tables.get(name)
    }

    /// True when the name is already taken.
    pub fn contains(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    /// Register a new table and rewrite the catalog file.
    pub fn insert(&mut self, name: String, descriptor: TableDescriptor) -> ReedResult<()> {
        self.tables.insert(name, descriptor);
        self.save()
    }

    /// All table names, sorted.
    pub fn table_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tables.keys().cloned().collect();
        names.sort();
        names
    }

    /// Rewrite the catalog file (whole-file replacement).
    fn save(&self) -> ReedResult<()> {
        let bytes =
            serde_json::to_vec_pretty(&self.tables).map_err(|e| ReedError::Serialization {
                reason: e.to_string(),
            })?;
        fs::write(&self.path, bytes).map_err(|e| ReedError::Io {
            operation: "write_catalog".to_string(),
            reason: e.to_string(),
        })
    }
}
