// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Core Database struct and statement dispatch.
//!
//! This is the main entry point for all ReedSQL operations. One
//! `Database` owns one data directory; an exclusive lock file keeps a
//! second instance from opening the same directory.

use crate::btree::BTree;
use crate::database::catalog::{Catalog, TableDescriptor};
use crate::database::types::{QueryOutput, Row};
use crate::database::value::Value;
use crate::error::{ReedError, ReedResult};
use crate::sql::{parse, SelectList, SetClause, Statement, WhereClause};
use fs2::FileExt;
use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

/// Minimum degree used for every table index unless configured otherwise.
const DEFAULT_MIN_DEGREE: usize = 3;

/// Name of the lock file guarding the data directory.
const LOCK_FILE: &str = ".lock";

/// SQL executor over a data directory.
///
/// Owns the catalog, a cache of open B-tree handles (one per table, so
/// reopening metadata is avoided), and the directory lock.
///
/// ## Thread Safety
/// - Not thread-safe; callers serialise access (the HTTP layer wraps the
///   `Database` in a mutex)
///
/// ## Example
/// ```no_run
/// use reedsql::Database;
///
/// let mut db = Database::open("data")?;
/// db.execute("CREATE TABLE users (id, name)")?;
/// db.execute("INSERT INTO users VALUES (1, 'Alice')")?;
/// # Ok::<(), reedsql::ReedError>(())
/// ```
#[derive(Debug)]
pub struct Database {
    /// Base data directory.
    data_dir: PathBuf,

    /// Persisted table catalog.
    catalog: Catalog,

    /// Open B-tree handles, lazily created on first table access.
    trees: HashMap<String, BTree<Value, Row>>,

    /// Minimum degree for new and reopened table indexes.
    min_degree: usize,

    /// Exclusive lock on the data directory, held for the lifetime of
    /// this instance.
    _lock: File,
}

impl Database {
    /// Open a data directory with the default minimum degree.
    pub fn open<P: AsRef<Path>>(data_dir: P) -> ReedResult<Self> {
        Self::open_with_degree(data_dir, DEFAULT_MIN_DEGREE)
    }

    /// Open a data directory with an explicit minimum degree.
    ///
    /// ## Output
    /// - `Ok(Database)`: directory locked, catalog loaded
    /// - `Err(ReedError::Locked)`: another instance holds the directory
    /// - `Err(ReedError)`: I/O failure or corrupt catalog
    ///
    /// ## Side Effects
    /// - Creates the data directory if absent
    /// - Creates the lock file and an empty catalog on first use
    pub fn open_with_degree<P: AsRef<Path>>(data_dir: P, min_degree: usize) -> ReedResult<Self> {
        if min_degree < 2 {
            return Err(ReedError::InvalidConfig {
                path: "min_degree".to_string(),
                reason: format!("minimum degree must be >= 2, got {}", min_degree),
            });
        }

        let data_dir = data_dir.as_ref().to_path_buf();
        fs::create_dir_all(&data_dir).map_err(|e| ReedError::Io {
            operation: "create_data_dir".to_string(),
            reason: e.to_string(),
        })?;

        let lock = Self::acquire_lock(&data_dir)?;
        let catalog = Catalog::open(&data_dir)?;

        Ok(Self {
            data_dir,
            catalog,
            trees: HashMap::new(),
            min_degree,
            _lock: lock,
        })
    }

    /// Take the exclusive directory lock, or fail with `Locked`.
    fn acquire_lock(data_dir: &Path) -> ReedResult<File> {
        let lock_path = data_dir.join(LOCK_FILE);
        let lock = OpenOptions::new()
            .create(true)
            .write(true)
            .open(&lock_path)
            .map_err(|e| ReedError::Io {
                operation: "open_lock_file".to_string(),
                reason: e.to_string(),
            })?;

        match lock.try_lock_exclusive() {
            Ok(()) => Ok(lock),
            Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => Err(ReedError::Locked {
                path: data_dir.display().to_string(),
            }),
            Err(e) => Err(ReedError::Io {
                operation: "lock_data_dir".to_string(),
                reason: e.to_string(),
            }),
        }
    }

    /// Parse and execute one SQL statement.
    ///
    /// Syntax rejections are caught here and answered as a user-facing
    /// message beginning `Syntax error`; every other error propagates to
    /// the caller untouched.
    pub fn execute(&mut self, sql: &str) -> ReedResult<QueryOutput> {
        let statement = match parse(sql) {
            Ok(statement) => statement,
            Err(err @ ReedError::Syntax { .. }) => {
                return Ok(QueryOutput::Message(err.to_string()));
            }
            Err(err) => return Err(err),
        };

        match statement {
            Statement::CreateTable { table, columns } => self.create_table(&table, columns),
            Statement::Insert { table, values } => {
                let values: Vec<Value> = values.iter().map(Value::coerce).collect();
                self.insert_into(&table, values)
            }
            Statement::Select { table, columns } => self.select_from(&table, &columns),
            Statement::Update { table, set, filter } => self.update_table(&table, &set, &filter),
            Statement::Delete { table, filter } => self.delete_from(&table, &filter),
        }
    }

    /// CREATE TABLE: register the descriptor and initialise an empty
    /// index (fresh leaf root plus metadata) under its own directory.
    fn create_table(&mut self, table: &str, columns: Vec<String>) -> ReedResult<QueryOutput> {
        if self.catalog.contains(table) {
            return Err(ReedError::TableExists {
                name: table.to_string(),
            });
        }

        let storage_path = self.data_dir.join(table);
        let tree = BTree::open(&storage_path, self.min_degree)?;
        self.trees.insert(table.to_string(), tree);

        self.catalog.insert(
            table.to_string(),
            TableDescriptor {
                columns,
                storage_path,
            },
        )?;

        Ok(QueryOutput::Message(format!("Table {} created.", table)))
    }

    /// INSERT: the first coerced value is the key; the row is the
    /// positional zip of declared columns and values.
    fn insert_into(&mut self, table: &str, values: Vec<Value>) -> ReedResult<QueryOutput> {
        let descriptor = self.descriptor(table)?;
        if values.len() != descriptor.columns.len() {
            return Err(ReedError::Arity {
                table: table.to_string(),
                expected: descriptor.columns.len(),
                given: values.len(),
            });
        }

        let key = values[0].clone();
        let row: Row = descriptor
            .columns
            .iter()
            .cloned()
            .zip(values)
            .collect();

        self.tree(table)?.insert(key, row)?;
        Ok(QueryOutput::Message(format!(
            "1 row inserted into {}.",
            table
        )))
    }

    /// SELECT: full in-order traversal projected to the requested
    /// columns. No filtering, no ordering beyond the key order.
    fn select_from(&mut self, table: &str, columns: &SelectList) -> ReedResult<QueryOutput> {
        let descriptor = self.descriptor(table)?;
        let projected: Vec<String> = match columns {
            SelectList::All => descriptor.columns.clone(),
            SelectList::Columns(names) => {
                for name in names {
                    if !descriptor.columns.contains(name) {
                        return Err(ReedError::UnknownColumn {
                            table: table.to_string(),
                            column: name.clone(),
                        });
                    }
                }
                names.clone()
            }
        };

        let records = self.tree(table)?.traverse()?;
        let rows: Vec<Row> = records
            .into_iter()
            .map(|(_, row)| {
                projected
                    .iter()
                    .filter_map(|column| {
                        row.get(column).map(|value| (column.clone(), value.clone()))
                    })
                    .collect()
            })
            .collect();

        Ok(QueryOutput::Rows {
            columns: projected,
            rows,
        })
    }

    /// UPDATE: full scan; matching rows get the new cell and are
    /// re-inserted under their unchanged key (overwrite semantics).
    fn update_table(
        &mut self,
        table: &str,
        set: &SetClause,
        filter: &WhereClause,
    ) -> ReedResult<QueryOutput> {
        let descriptor = self.descriptor(table)?;
        self.check_column(table, &descriptor, &set.column)?;
        self.check_column(table, &descriptor, &filter.column)?;

        let set_value = Value::coerce(&set.value);
        let filter_value = Value::coerce(&filter.value);

        let tree = self.tree(table)?;
        let records = tree.traverse()?;
        let mut updated = 0;
        for (key, mut row) in records {
            if row.get(&filter.column) == Some(&filter_value) {
                row.insert(set.column.clone(), set_value.clone());
                tree.insert(key, row)?;
                updated += 1;
            }
        }

        Ok(QueryOutput::Message(format!(
            "{} rows updated in {}.",
            updated, table
        )))
    }

    /// DELETE: full scan collecting the keys of matching rows, then one
    /// engine delete per key.
    fn delete_from(&mut self, table: &str, filter: &WhereClause) -> ReedResult<QueryOutput> {
        let descriptor = self.descriptor(table)?;
        self.check_column(table, &descriptor, &filter.column)?;

        let filter_value = Value::coerce(&filter.value);

        let tree = self.tree(table)?;
        let keys: Vec<Value> = tree
            .traverse()?
            .into_iter()
            .filter(|(_, row)| row.get(&filter.column) == Some(&filter_value))
            .map(|(key, _)| key)
            .collect();

        let mut deleted = 0;
        for key in keys {
            tree.delete(&key)?;
            deleted += 1;
        }

        Ok(QueryOutput::Message(format!(
            "{} rows deleted from {}.",
            deleted, table
        )))
    }

    /// All catalogued table names, sorted.
    pub fn list_tables(&self) -> Vec<String> {
        self.catalog.table_names()
    }

    /// Render a table's index structure for inspection.
    pub fn dump_table(&mut self, table: &str) -> ReedResult<String> {
        self.tree(table)?.dump()
    }

    /// Base data directory.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Clone of the descriptor for `table`, or `UnknownTable`.
    fn descriptor(&self, table: &str) -> ReedResult<TableDescriptor> {
        self.catalog
            .get(table)
            .cloned()
            .ok_or_else(|| ReedError::UnknownTable {
                name: table.to_string(),
            })
    }

    fn check_column(
        &self,
        table: &str,
        descriptor: &TableDescriptor,
        column: &str,
    ) -> ReedResult<()> {
        if descriptor.columns.iter().any(|c| c == column) {
            return Ok(());
        }
        Err(ReedError::UnknownColumn {
            table: table.to_string(),
            column: column.to_string(),
        })
    }

    /// Cached B-tree handle for `table`, opened on first access.
    fn tree(&mut self, table: &str) -> ReedResult<&mut BTree<Value, Row>> {
        if !self.trees.contains_key(table) {
            let descriptor = self.descriptor(table)?;
            let tree = BTree::open(&descriptor.storage_path, self.min_degree)?;
            self.trees.insert(table.to_string(), tree);
        }
        match self.trees.get_mut(table) {
            Some(tree) => Ok(tree),
            None => Err(ReedError::UnknownTable {
                name: table.to_string(),
            }),
        }
    }
}
