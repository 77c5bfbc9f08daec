// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Table listing.

use anyhow::Result;
use std::path::Path;

use crate::commands::open_database;

pub fn execute(path: &Path) -> Result<()> {
    let db = open_database(path)?;
    let tables = db.list_tables();

    if tables.is_empty() {
        println!("No tables");
        return Ok(());
    }

    println!("Tables:");
    for table in tables {
        println!("  - {}", table);
    }
    Ok(())
}
