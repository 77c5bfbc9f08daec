// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Interactive shell (REPL) implementation.

use anyhow::Result;
use reedsql::Database;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::Path;
use std::time::Instant;

use crate::commands::open_database;
use crate::formatters;

pub fn run(path: &Path) -> Result<()> {
    let mut db = open_database(path)?;

    println!("ReedSQL Shell v0.1.0");
    println!("Database: {}", db.data_dir().display());
    println!("Type .help for help, .exit to quit\n");

    let mut rl = DefaultEditor::new()?;
    let mut format = "table".to_string();

    loop {
        let readline = rl.readline("reedsql> ");

        match readline {
            Ok(line) => {
                let trimmed = line.trim();

                if trimmed.is_empty() {
                    continue;
                }

                // Add to history
                let _ = rl.add_history_entry(trimmed);

                // Handle dot-commands
                if trimmed.starts_with('.') {
                    match handle_dot_command(trimmed, &mut db, &mut format) {
                        Ok(should_exit) => {
                            if should_exit {
                                break;
                            }
                        }
                        Err(e) => eprintln!("Error: {}", e),
                    }
                    continue;
                }

                // Execute SQL
                let started = Instant::now();
                match db.execute(trimmed) {
                    Ok(output) => {
                        let rendered = match format.as_str() {
                            "json" => formatters::format_json(&output),
                            _ => formatters::format_table(&output),
                        };
                        print!("{}", rendered);
                        println!("({:.2} ms)", started.elapsed().as_secs_f64() * 1000.0);
                    }
                    Err(e) => eprintln!("Error: {}", e),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("Goodbye!");
                break;
            }
            Err(err) => {
                eprintln!("Error: {:?}", err);
                break;
            }
        }
    }

    Ok(())
}

fn handle_dot_command(cmd: &str, db: &mut Database, format: &mut String) -> Result<bool> {
    let parts: Vec<&str> = cmd.split_whitespace().collect();
    let command = parts[0];

    match command {
        ".exit" | ".quit" => {
            println!("Goodbye!");
            return Ok(true);
        }

        ".help" => {
            println!("Special commands:");
            println!("  .tables          List all tables");
            println!("  .dump <TABLE>    Show a table's index structure");
            println!("  .format <FORMAT> Set output format (table|json)");
            println!("  .help            Show this help");
            println!("  .exit            Exit shell");
        }

        ".tables" => {
            let tables = db.list_tables();
            if tables.is_empty() {
                println!("No tables");
            } else {
                println!("Tables:");
                for table in tables {
                    println!("  - {}", table);
                }
            }
        }

        ".dump" => {
            if parts.len() < 2 {
                println!("Usage: .dump <TABLE>");
            } else {
                match db.dump_table(parts[1]) {
                    Ok(rendered) => print!("{}", rendered),
                    Err(e) => eprintln!("Error: {}", e),
                }
            }
        }

        ".format" => {
            if parts.len() < 2 {
                println!("Current format: {}", format);
                println!("Usage: .format <table|json>");
            } else {
                *format = parts[1].to_string();
                println!("Output format set to: {}", format);
            }
        }

        _ => {
            println!("Unknown command: {}", command);
            println!("Type .help for available commands");
        }
    }

    Ok(false)
}
