// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! HTTP endpoint subcommand.

use anyhow::Result;
use reedsql::server::run_server;
use reedsql::Config;
use std::path::Path;

use crate::commands::open_database;

pub fn run(path: &Path, host: Option<&str>, port: Option<u16>) -> Result<()> {
    let config = Config::load(path)?;
    let host = host.unwrap_or(&config.server.host).to_string();
    let port = port.unwrap_or(config.server.port);

    let db = open_database(path)?;

    actix_rt::System::new().block_on(run_server(db, &host, port))?;
    Ok(())
}
