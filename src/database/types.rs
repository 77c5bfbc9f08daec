// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Executor result types.

use crate::database::value::Value;
use std::collections::HashMap;

/// One table row: a mapping from column name to cell value.
pub type Row = HashMap<String, Value>;

/// Result of executing one statement.
///
/// CREATE/INSERT/UPDATE/DELETE answer with a templated status message;
/// SELECT answers with the projected row mappings in key order. A
/// rejected statement answers with a message beginning `Syntax error`.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutput {
    /// Status or error message.
    Message(String),

    /// Projected rows of a SELECT.
    Rows {
        /// Projection in output order.
        columns: Vec<String>,

        /// One mapping per row, restricted to the projected columns.
        rows: Vec<Row>,
    },
}

impl QueryOutput {
    /// Render for the HTTP result surface.
    ///
    /// Messages become JSON strings; row sets become arrays of objects.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            QueryOutput::Message(message) => serde_json::Value::String(message.clone()),
            QueryOutput::Rows { rows, .. } => serde_json::Value::Array(
                rows.iter()
                    .map(|row| {
                        serde_json::Value::Object(
                            row.iter()
                                .map(|(column, value)| (column.clone(), value.to_json()))
                                .collect(),
                        )
                    })
                    .collect(),
            ),
        }
    }
}
