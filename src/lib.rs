// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! ReedSQL - SQL-speaking key-value database over a persistent B-tree.
//!
//! A lightweight, file-based database: textual SQL statements are parsed,
//! dispatched to a per-table on-disk B-tree index, and answered with row
//! sets or status messages. Data survives process restarts.
//!
//! ## Features
//!
//! - **Persistent B-Tree Index**: one file per node, root identity in a
//!   sidecar metadata file
//! - **SQL Front-End**: CREATE TABLE / INSERT / SELECT / UPDATE / DELETE
//! - **Checksummed Node Files**: CRC32-framed bincode, torn writes detected
//! - **Single-Instance Guard**: exclusive data-directory lock
//! - **HTTP Endpoint**: `POST /execute` accepting `{"command": "..."}`
//! - **Interactive Shell**: readline REPL with dot-commands
//!
//! ## Quick Start
//!
//! ```no_run
//! use reedsql::Database;
//!
//! let mut db = Database::open("data")?;
//! db.execute("CREATE TABLE users (id, name)")?;
//! db.execute("INSERT INTO users VALUES (1, 'Alice')")?;
//! let result = db.execute("SELECT * FROM users")?;
//! # Ok::<(), reedsql::ReedError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! statement text
//!       │  sql::parse
//!       ▼
//! Statement (tagged union)
//!       │  database::Database
//!       ▼
//! catalog lookup ──► BTree<Value, Row> ──► store::NodeStore
//!                         │                     │
//!                         ▼                     ▼
//!                    metadata (JSON)       <id>.node files
//! ```
//!
//! ## Concurrency
//!
//! The engine is single-writer and single-threaded. External collaborators
//! (the HTTP layer, the shell) serialise all calls; the server wraps the
//! `Database` in a process-wide mutex.

pub mod btree;
pub mod config;
pub mod database;
pub mod error;
pub mod server;
pub mod sql;
pub mod store;

// Re-export commonly used types
pub use btree::BTree;
pub use config::{Config, DatabaseConfig, ServerConfig};
pub use database::{Catalog, Database, QueryOutput, Row, TableDescriptor, Value};
pub use error::{ReedError, ReedResult};
pub use sql::{parse, SelectList, Statement};
pub use store::{Node, NodeId, NodeStore};
