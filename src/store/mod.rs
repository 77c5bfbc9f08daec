// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Node Store - slot-addressed persistence for B-tree nodes.
//!
//! A store is a directory holding one file per node, named `<id>.node`.
//! Identifiers are monotonically increasing and never reused; the counter
//! is seeded from `max(existing ids) + 1` when an existing directory is
//! opened.
//!
//! ## File Format
//!
//! ```text
//! ┌───────────┬───────────┬──────────────────┐
//! │ magic u32 │ crc32 u32 │ bincode(Node)    │
//! └───────────┴───────────┴──────────────────┘
//! ```
//!
//! Writes are whole-file replacements. A reader that finds a short file,
//! a wrong magic word, a checksum mismatch or an undecodable payload
//! reports `NodeCorrupt`; an absent file reports `NodeMissing`.

mod manager;
mod node;


// Re-export public API
pub use manager::NodeStore;
pub use node::{Node, NodeId};
