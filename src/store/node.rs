// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! On-disk B-tree node record.
//!
//! A node is the unit the store persists: minimum degree, leaf flag, the
//! sorted entry sequence, child identifiers and the node's own identifier.
//! Nodes carry identifiers rather than in-memory pointers; the engine
//! resolves children through the store one operation at a time.

use serde::{Deserialize, Serialize};

/// Node identifier type.
///
/// 64-bit monotonic identifier naming one persisted node. Identifiers are
/// assigned by [`NodeStore::save_node`](crate::store::NodeStore::save_node)
/// and never reused.
pub type NodeId = u64;

/// A single B-tree node.
///
/// ## Invariants
/// - `entries` are sorted strictly ascending by key
/// - leaf nodes have no children
/// - internal nodes have `children.len() == entries.len() + 1`
/// - at most `2t - 1` entries after any completed operation
///
/// ## Type Parameters
/// - `K`: key type (orderable, serialisable)
/// - `V`: payload type (opaque row record, serialisable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node<K, V> {
    /// Minimum degree parameter (process-wide, typically 3).
    pub t: usize,

    /// Leaf flag.
    pub leaf: bool,

    /// Sorted `(key, payload)` pairs.
    pub entries: Vec<(K, V)>,

    /// Child node identifiers. Empty for leaves.
    pub children: Vec<NodeId>,

    /// This node's identifier. Meaningless until assigned by
    /// `NodeStore::save_node`.
    pub node_id: NodeId,
}

impl<K, V> Node<K, V> {
    /// Create a fresh unsaved node.
    pub fn new(t: usize, leaf: bool) -> Self {
        Self {
            t,
            leaf,
            entries: Vec::new(),
            children: Vec::new(),
            node_id: 0,
        }
    }

    /// True when the node holds the maximum `2t - 1` entries.
    pub fn is_full(&self) -> bool {
        self.entries.len() == 2 * self.t - 1
    }
}
