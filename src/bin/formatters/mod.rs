// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Output formatters for statement results.

use reedsql::QueryOutput;

/// Format a result as a human-readable table.
pub fn format_table(output: &QueryOutput) -> String {
    match output {
        QueryOutput::Message(message) => format!("{}\n", message),
        QueryOutput::Rows { columns, rows } => {
            if rows.is_empty() {
                return "0 rows\n".to_string();
            }

            // Column widths from header and cells
            let mut widths: Vec<usize> = columns.iter().map(|c| c.len()).collect();
            let mut cells: Vec<Vec<String>> = Vec::with_capacity(rows.len());
            for row in rows {
                let mut line = Vec::with_capacity(columns.len());
                for (i, column) in columns.iter().enumerate() {
                    let text = row
                        .get(column)
                        .map(|value| value.to_string())
                        .unwrap_or_default();
                    widths[i] = widths[i].max(text.len());
                    line.push(text);
                }
                cells.push(line);
            }

            let border = {
                let mut s = String::from("+");
                for width in &widths {
                    s.push_str(&"-".repeat(width + 2));
                    s.push('+');
                }
                s.push('\n');
                s
            };

            let mut output = String::new();
            output.push_str(&border);

            output.push('|');
            for (column, width) in columns.iter().zip(&widths) {
                output.push_str(&format!(" {:<width$} |", column, width = *width));
            }
            output.push('\n');
            output.push_str(&border);

            for line in &cells {
                output.push('|');
                for (text, width) in line.iter().zip(&widths) {
                    output.push_str(&format!(" {:<width$} |", text, width = *width));
                }
                output.push('\n');
            }
            output.push_str(&border);

            output.push_str(&format!(
                "{} row{}\n",
                rows.len(),
                if rows.len() == 1 { "" } else { "s" }
            ));
            output
        }
    }
}

/// Format a result as pretty-printed JSON.
pub fn format_json(output: &QueryOutput) -> String {
    let value = output.to_json();
    match serde_json::to_string_pretty(&value) {
        Ok(text) => format!("{}\n", text),
        Err(_) => format!("{}\n", value),
    }
}
