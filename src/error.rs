// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Error types for ReedSQL operations.
//!
//! Provides structured error handling with detailed context for debugging.

use std::fmt;

/// Standard Result type for all ReedSQL operations.
pub type ReedResult<T> = Result<T, ReedError>;

/// Error types for ReedSQL operations.
#[derive(Debug, Clone)]
pub enum ReedError {
    /// Tokeniser or grammar rejection.
    ///
    /// Display output always begins with the literal prefix `Syntax error`,
    /// which the executor relies on when turning the error into a
    /// user-facing message.
    Syntax { reason: String },

    /// Table not found in the catalog.
    UnknownTable { name: String },

    /// Table already exists in the catalog.
    TableExists { name: String },

    /// INSERT value count does not match the declared column count.
    Arity {
        table: String,
        expected: usize,
        given: usize,
    },

    /// Column not declared for the table.
    UnknownColumn { table: String, column: String },

    /// Node file absent from the store.
    NodeMissing { id: u64, path: String },

    /// Node file unreadable (bad magic, checksum mismatch or decode failure).
    NodeCorrupt { id: u64, reason: String },

    /// Catalog or tree metadata file unreadable.
    MetaCorrupt { path: String, reason: String },

    /// Configuration file invalid.
    InvalidConfig { path: String, reason: String },

    /// I/O error during file operations.
    Io { operation: String, reason: String },

    /// Data directory already locked by another engine instance.
    Locked { path: String },

    /// Serialisation failed while encoding a record.
    Serialization { reason: String },

    /// Statement recognised by the grammar but not by the executor.
    /// Reserved; no statement currently maps to it.
    Unsupported { statement: String },
}

impl fmt::Display for ReedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Syntax { reason } => {
                write!(f, "Syntax error: {}", reason)
            }
            Self::UnknownTable { name } => {
                write!(f, "Table '{}' does not exist", name)
            }
            Self::TableExists { name } => {
                write!(f, "Table '{}' already exists", name)
            }
            Self::Arity {
                table,
                expected,
                given,
            } => {
                write!(
                    f,
                    "Column count mismatch for table '{}': {} columns, {} values",
                    table, expected, given
                )
            }
            Self::UnknownColumn { table, column } => {
                write!(f, "Unknown column '{}' in table '{}'", column, table)
            }
            Self::NodeMissing { id, path } => {
                write!(f, "Node {} missing: file '{}' does not exist", id, path)
            }
            Self::NodeCorrupt { id, reason } => {
                write!(f, "Node {} corrupted: {}", id, reason)
            }
            Self::MetaCorrupt { path, reason } => {
                write!(f, "Metadata '{}' corrupted: {}", path, reason)
            }
            Self::InvalidConfig { path, reason } => {
                write!(f, "Invalid configuration '{}': {}", path, reason)
            }
            Self::Io { operation, reason } => {
                write!(f, "I/O error during '{}': {}", operation, reason)
            }
            Self::Locked { path } => {
                write!(
                    f,
                    "Data directory '{}' is locked by another instance",
                    path
                )
            }
            Self::Serialization { reason } => {
                write!(f, "Serialisation error: {}", reason)
            }
            Self::Unsupported { statement } => {
                write!(f, "Unsupported SQL statement: {}", statement)
            }
        }
    }
}

impl std::error::Error for ReedError {}

// Convenience conversion from std::io::Error
impl From<std::io::Error> for ReedError {
    fn from(err: std::io::Error) -> Self {
        ReedError::Io {
            operation: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}
