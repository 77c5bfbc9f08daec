// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Parsed statement values.
//!
//! The parser produces one tagged [`Statement`] per input; the executor
//! dispatches over the tag. Literals stay close to the token level here —
//! value coercion (including the float path for string literals) happens
//! in the executor, not the parser.

/// A literal value as it appears in the statement text.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// Unsigned integer literal, e.g. `42`.
    Number(i64),

    /// Single-quoted string literal with the quotes already stripped.
    String(String),
}

/// Column selection of a SELECT statement.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectList {
    /// `*`: project all declared columns in declared order.
    All,

    /// Explicit column list in the requested order.
    Columns(Vec<String>),
}

/// `SET column = value` clause of an UPDATE statement.
#[derive(Debug, Clone, PartialEq)]
pub struct SetClause {
    pub column: String,
    pub value: Literal,
}

/// `WHERE column = value` clause of an UPDATE or DELETE statement.
#[derive(Debug, Clone, PartialEq)]
pub struct WhereClause {
    pub column: String,
    pub value: Literal,
}

/// One parsed SQL statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `CREATE TABLE name (col1, col2, ...)`
    CreateTable { table: String, columns: Vec<String> },

    /// `INSERT INTO name VALUES (v1, v2, ...)`
    Insert { table: String, values: Vec<Literal> },

    /// `SELECT cols FROM name`
    Select { table: String, columns: SelectList },

    /// `UPDATE name SET col = v WHERE col2 = v2`
    Update {
        table: String,
        set: SetClause,
        filter: WhereClause,
    },

    /// `DELETE FROM name WHERE col = v`
    Delete { table: String, filter: WhereClause },
}
