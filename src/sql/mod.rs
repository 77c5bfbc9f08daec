// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! SQL front-end: tokeniser and grammar.
//!
//! Hand-written byte-scanning lexer and recursive-descent parser. NO
//! external SQL parsing libraries and no regex; the token set is small
//! enough that direct scanning stays both faster and easier to audit.
//!
//! ## Supported Grammar
//! ```text
//! statement      = create | insert | select | update | delete
//! create         = CREATE TABLE id "(" id {"," id} ")"
//! insert         = INSERT INTO id VALUES "(" value {"," value} ")"
//! select         = SELECT select_list FROM id
//! select_list    = "*" | id {"," id}
//! update         = UPDATE id SET set_clause where_clause
//! delete         = DELETE FROM id where_clause
//! set_clause     = id "=" value
//! where_clause   = WHERE id "=" value
//! value          = string_literal | integer_literal
//! ```
//!
//! Keywords are case-insensitive; whitespace and newlines are
//! insignificant. String literals are single-quoted with no escapes, and
//! the grammar admits only unsigned integer literals (floats reach the
//! executor exclusively through string coercion).
//!
//! Every tokeniser or grammar failure is a `ReedError::Syntax` carrying
//! the offending token text or position.

mod ast;
mod lexer;
mod parser;

#[cfg(test)]
mod lexer_test;

// Re-export public API
pub use ast::{Literal, SelectList, SetClause, Statement, WhereClause};
pub use lexer::{tokenize, Token};
pub use parser::parse;
