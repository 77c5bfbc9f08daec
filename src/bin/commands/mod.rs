// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! CLI subcommand implementations.

pub mod exec;
pub mod serve;
pub mod shell;
pub mod tables;

use anyhow::{Context, Result};
use reedsql::{Config, Database};
use std::path::Path;

/// Open the database at `path`, honouring `reedsql.toml` if present.
pub fn open_database(path: &Path) -> Result<Database> {
    let config = Config::load(path)?;
    Database::open_with_degree(path, config.database.min_degree)
        .with_context(|| format!("Failed to open database at {}", path.display()))
}
