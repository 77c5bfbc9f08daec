// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! TOML configuration.
//!
//! An optional `reedsql.toml` inside the data directory tunes the engine
//! and the HTTP endpoint. An absent file means defaults; CLI flags
//! override either.
//!
//! ```toml
//! [database]
//! min_degree = 3
//!
//! [server]
//! host = "127.0.0.1"
//! port = 4711
//! ```

use crate::error::{ReedError, ReedResult};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Name of the configuration file inside the data directory.
pub const CONFIG_FILE: &str = "reedsql.toml";

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Minimum degree of every table index.
    pub min_degree: usize,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self { min_degree: 3 }
    }
}

/// HTTP endpoint configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 4711,
        }
    }
}

/// Whole configuration file.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
}

impl Config {
    /// Load the configuration of a data directory.
    ///
    /// ## Output
    /// - `Ok(Config)`: parsed file, or defaults when the file is absent
    /// - `Err(ReedError::InvalidConfig)`: unreadable or invalid TOML, or
    ///   a minimum degree below 2
    pub fn load(data_dir: &Path) -> ReedResult<Self> {
        let path = data_dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let text = fs::read_to_string(&path).map_err(|e| ReedError::Io {
            operation: "read_config".to_string(),
            reason: e.to_string(),
        })?;
        let config: Config = toml::from_str(&text).map_err(|e| ReedError::InvalidConfig {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        if config.database.min_degree < 2 {
            return Err(ReedError::InvalidConfig {
                path: path.display().to_string(),
                reason: format!(
                    "minimum degree must be >= 2, got {}",
                    config.database.min_degree
                ),
            });
        }
        Ok(config)
    }
}
