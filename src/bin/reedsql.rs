// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! ReedSQL CLI Tool
//!
//! Command-line interface for ReedSQL operations.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod formatters;

use commands::{exec, serve, shell, tables};

#[derive(Parser)]
#[command(name = "reedsql")]
#[command(author = "Vivian Voss <ask@vvoss.dev>")]
#[command(version = "0.1.0")]
#[command(about = "ReedSQL CLI - SQL over a persistent B-tree", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a single SQL statement
    Exec {
        /// SQL statement (quoted)
        sql: String,

        /// Path to the data directory
        path: PathBuf,

        /// Output format: table|json
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Open interactive shell
    Shell {
        /// Path to the data directory
        path: PathBuf,
    },

    /// Serve the HTTP endpoint
    Serve {
        /// Path to the data directory
        path: PathBuf,

        /// Bind host (overrides reedsql.toml)
        #[arg(long)]
        host: Option<String>,

        /// Bind port (overrides reedsql.toml)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// List tables
    Tables {
        /// Path to the data directory
        path: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Exec { sql, path, format } => exec::execute(&sql, &path, &format)?,

        Commands::Shell { path } => shell::run(&path)?,

        Commands::Serve { path, host, port } => serve::run(&path, host.as_deref(), port)?,

        Commands::Tables { path } => tables::execute(&path)?,
    }

    Ok(())
}
