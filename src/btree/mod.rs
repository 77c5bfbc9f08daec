// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! B-tree on-disk index engine.
//!
//! Generic persistent index of minimum degree `t`, reading and writing
//! nodes one at a time through the [`NodeStore`](crate::store::NodeStore).
//! The identifier of the current root is the tree's only global mutable
//! state and is persisted in a sidecar `metadata` file so the tree can be
//! reopened.
//!
//! ## Operations
//!
//! - **insert**: insert or replace, splitting full nodes ahead of descent
//! - **search**: point lookup, O(log n) node loads
//! - **traverse**: materialised in-order enumeration
//! - **delete**: simplified non-rebalancing removal (see `tree.rs`)
//!
//! ## Durability
//!
//! Every mutated node is written back within the operation that touched
//! it. Whenever the root identity changes, the new root's node record is
//! made durable before the metadata file is rewritten; orphaned node
//! records are removed last, so a failure in between leaks a file but
//! never corrupts the tree.
//!
//! ## Example Usage
//!
//! ```no_run
//! use reedsql::btree::BTree;
//!
//! let mut tree: BTree<i64, String> = BTree::open("data/users", 3)?;
//! tree.insert(1, "Alice".to_string())?;
//! assert_eq!(tree.search(&1)?, Some("Alice".to_string()));
//! # Ok::<(), reedsql::ReedError>(())
//! ```

mod tree;


// Re-export public API
pub use tree::BTree;
