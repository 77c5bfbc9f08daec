// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! One-shot statement execution.

use anyhow::Result;
use std::path::Path;

use crate::commands::open_database;
use crate::formatters;

pub fn execute(sql: &str, path: &Path, format: &str) -> Result<()> {
    let mut db = open_database(path)?;
    let output = db.execute(sql.trim())?;

    let rendered = match format {
        "json" => formatters::format_json(&output),
        _ => formatters::format_table(&output),
    };
    print!("{}", rendered);

    Ok(())
}
