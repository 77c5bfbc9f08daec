// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Table catalog and statement executor.
//!
//! The [`Database`] is the single entry point for all operations: it owns
//! the persisted catalog (`table name → descriptor`), a cache of open
//! B-tree handles, and the exclusive data-directory lock. Parsed
//! statements dispatch onto engine operations here.
//!
//! ## Design
//!
//! - The key of every row is the value of the table's first declared
//!   column (the de-facto primary key)
//! - Columns are positional, untyped name labels; no type enforcement
//! - WHERE filtering, UPDATE and DELETE are whole-table scans over the
//!   in-order traversal
//! - All state is owned by the `Database` value and passed by reference;
//!   nothing lives in ambient globals
//!
//! ## Statement surface
//!
//! ```text
//! CREATE TABLE name (col1, col2, ...)      → "Table name created."
//! INSERT INTO name VALUES (v1, v2, ...)    → "1 row inserted into name."
//! SELECT cols FROM name                    → row mappings, key order
//! UPDATE name SET col = v WHERE col2 = v2  → "N rows updated in name."
//! DELETE FROM name WHERE col = v           → "N rows deleted from name."
//! ```

mod catalog;
mod database;
mod types;
mod value;

#[cfg(test)]
mod catalog_test;

// Re-export public API
pub use catalog::{Catalog, TableDescriptor};
pub use database::Database;
pub use types::{QueryOutput, Row};
pub use value::Value;
