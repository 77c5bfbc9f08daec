// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! B-tree implementation over the node store.
//!
//! Nodes are materialised one disk slot at a time: every operation follows
//! a `load → mutate → write-back` discipline scoped to that operation, and
//! no mutable node value is shared between operations.
//!
//! ## Deletion policy
//!
//! Deletion does not rebalance. Removing an entry from an internal node
//! refills the vacated slot with the in-order predecessor (the last entry
//! beneath the child left of the slot), falling back to the in-order
//! successor, and finally to dropping the emptied child slot. Nodes may
//! underflow the classical `t - 1` minimum and empty leaves may persist;
//! ordering and `children == entries + 1` are preserved throughout.

use crate::error::{ReedError, ReedResult};
use crate::store::{Node, NodeId, NodeStore};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the root-identity sidecar file inside the storage directory.
const METADATA_FILE: &str = "metadata";

/// Persisted root identity record.
#[derive(Debug, Serialize, Deserialize)]
struct TreeMetadata {
    root_id: NodeId,
}

/// Persistent B-tree of minimum degree `t`.
///
/// ## Type Parameters
/// - `K`: key type (must be Clone + Ord + Serialize + Deserialize)
/// - `V`: payload type (must be Clone + Serialize + Deserialize)
///
/// ## Thread Safety
/// - Not thread-safe (caller must serialise access)
#[derive(Debug)]
pub struct BTree<K, V> {
    /// Minimum degree. Maximum entries per node is `2t - 1`.
    t: usize,

    /// Identifier of the current root node.
    root_id: NodeId,

    /// Slot-addressed node persistence.
    store: NodeStore<K, V>,

    /// Path of the metadata sidecar file.
    metadata_path: PathBuf,
}

impl<K, V> BTree<K, V>
where
    K: Clone + Ord + Serialize + for<'de> Deserialize<'de>,
    V: Clone + Serialize + for<'de> Deserialize<'de>,
{
    /// Open an existing tree or create a fresh one.
    ///
    /// ## Input
    /// - `storage_path`: directory for node files and the metadata record
    /// - `t`: minimum degree (must be >= 2)
    ///
    /// ## Output
    /// - `Ok(BTree)`: tree ready for operations
    /// - `Err(ReedError)`: invalid degree, I/O failure or corrupt metadata
    ///
    /// ## Side Effects
    /// - Creates the storage directory if absent
    /// - A fresh tree persists an empty leaf root, then the metadata file
    ///   naming it (node durable before root identity, as for every
    ///   root change)
    pub fn open<P: AsRef<Path>>(storage_path: P, t: usize) -> ReedResult<Self> {
        if t < 2 {
            return Err(ReedError::InvalidConfig {
                path: "min_degree".to_string(),
                reason: format!("minimum degree must be >= 2, got {}", t),
            });
        }

        let storage_path = storage_path.as_ref().to_path_buf();
        fs::create_dir_all(&storage_path).map_err(|e| ReedError::Io {
            operation: "create_tree_dir".to_string(),
            reason: e.to_string(),
        })?;

        let store = NodeStore::open(&storage_path)?;
        let metadata_path = storage_path.join(METADATA_FILE);

        let mut tree = Self {
            t,
            root_id: 0,
            store,
            metadata_path,
        };

        if tree.metadata_path.exists() {
            tree.root_id = tree.load_metadata()?;
        } else {
            let mut root = Node::new(t, true);
            tree.root_id = tree.store.save_node(&mut root)?;
            tree.save_metadata()?;
        }

        Ok(tree)
    }

    /// Read the persisted root identifier.
    fn load_metadata(&self) -> ReedResult<NodeId> {
        let bytes = fs::read(&self.metadata_path).map_err(|e| ReedError::Io {
            operation: "read_tree_metadata".to_string(),
            reason: e.to_string(),
        })?;
        let metadata: TreeMetadata =
            serde_json::from_slice(&bytes).map_err(|e| ReedError::MetaCorrupt {
                path: self.metadata_path.display().to_string(),
                reason: e.to_string(),
            })?;
        Ok(metadata.root_id)
    }

    /// Persist the current root identifier.
    ///
    /// Callers must make the root's node record durable first; see the
    /// root-change protocol in the module docs.
    fn save_metadata(&self) -> ReedResult<()> {
        let metadata = TreeMetadata {
            root_id: self.root_id,
        };
        let bytes = serde_json::to_vec(&metadata).map_err(|e| ReedError::Serialization {
            reason: e.to_string(),
        })?;
        fs::write(&self.metadata_path, bytes).map_err(|e| ReedError::Io {
            operation: "write_tree_metadata".to_string(),
            reason: e.to_string(),
        })
    }

    /// Insert `value` under `key`, replacing any existing payload.
    ///
    /// If the root is full, a new non-leaf root is allocated with the old
    /// root as its only child and split before descending; the new root
    /// identifier reaches the metadata file only after the split nodes
    /// are durable.
    pub fn insert(&mut self, key: K, value: V) -> ReedResult<()> {
        let root = self.store.load_node(self.root_id)?;
        if root.is_full() {
            let mut new_root = Node::new(self.t, false);
            new_root.children.push(self.root_id);
            let new_root_id = self.store.save_node(&mut new_root)?;
            self.split_child(&mut new_root, 0)?;
            self.root_id = new_root_id;
            self.save_metadata()?;
            self.insert_non_full(new_root, key, value)
        } else {
            self.insert_non_full(root, key, value)
        }
    }

    /// Insert into a subtree rooted at a node known not to be full.
    fn insert_non_full(&mut self, mut node: Node<K, V>, key: K, value: V) -> ReedResult<()> {
        // An equal key anywhere on the path is an overwrite, never a
        // second entry
        if let Some(idx) = node.entries.iter().position(|(k, _)| *k == key) {
            node.entries[idx].1 = value;
            return self.store.update_node(&node);
        }

        if node.leaf {
            let idx = node
                .entries
                .iter()
                .position(|(k, _)| key < *k)
                .unwrap_or(node.entries.len());
            node.entries.insert(idx, (key, value));
            return self.store.update_node(&node);
        }

        let mut i = node
            .entries
            .iter()
            .position(|(k, _)| key < *k)
            .unwrap_or(node.entries.len());

        let child = self.store.load_node(node.children[i])?;
        if child.is_full() {
            self.split_child(&mut node, i)?;
            // The promoted median may be the key itself, or may now sit
            // left of it
            if key == node.entries[i].0 {
                node.entries[i].1 = value;
                return self.store.update_node(&node);
            }
            if key > node.entries[i].0 {
                i += 1;
            }
        }

        let child = self.store.load_node(node.children[i])?;
        self.insert_non_full(child, key, value)
    }

    /// Split the full child at `parent.children[i]`.
    ///
    /// The child keeps its lower `t - 1` entries, a fresh sibling receives
    /// the upper `t - 1`, and the median entry moves up into the parent at
    /// position `i`. For internal children the upper `t` child references
    /// follow the sibling. All three nodes are persisted.
    fn split_child(&mut self, parent: &mut Node<K, V>, i: usize) -> ReedResult<()> {
        let y_id = parent.children[i];
        let mut y = self.store.load_node(y_id)?;

        let mut z = Node::new(self.t, y.leaf);
        z.entries = y.entries.split_off(self.t);
        let median = match y.entries.pop() {
            Some(entry) => entry,
            None => {
                return Err(ReedError::NodeCorrupt {
                    id: y_id,
                    reason: "split of a non-full node".to_string(),
                });
            }
        };
        if !y.leaf {
            z.children = y.children.split_off(self.t);
        }

        let z_id = self.store.save_node(&mut z)?;
        parent.children.insert(i + 1, z_id);
        parent.entries.insert(i, median);

        self.store.update_node(&y)?;
        self.store.update_node(parent)?;
        Ok(())
    }

    /// Look up the payload stored under `key`.
    ///
    /// ## Output
    /// - `Ok(Some(V))`: key found
    /// - `Ok(None)`: key absent
    /// - `Err(ReedError)`: store failure
    pub fn search(&self, key: &K) -> ReedResult<Option<V>> {
        let mut node = self.store.load_node(self.root_id)?;
        loop {
            let i = node
                .entries
                .iter()
                .position(|(k, _)| *key <= *k)
                .unwrap_or(node.entries.len());
            if i < node.entries.len() && node.entries[i].0 == *key {
                return Ok(Some(node.entries[i].1.clone()));
            }
            if node.leaf {
                return Ok(None);
            }
            node = self.store.load_node(node.children[i])?;
        }
    }

    /// Enumerate every `(key, payload)` pair in ascending key order.
    ///
    /// Returns a fully materialised sequence; the call stack carries the
    /// descent path.
    pub fn traverse(&self) -> ReedResult<Vec<(K, V)>> {
        let mut out = Vec::new();
        self.traverse_into(self.root_id, &mut out)?;
        Ok(out)
    }

    fn traverse_into(&self, id: NodeId, out: &mut Vec<(K, V)>) -> ReedResult<()> {
        let node = self.store.load_node(id)?;
        for (i, entry) in node.entries.iter().enumerate() {
            if !node.leaf {
                self.traverse_into(node.children[i], out)?;
            }
            out.push(entry.clone());
        }
        if !node.leaf {
            if let Some(&last) = node.children.last() {
                self.traverse_into(last, out)?;
            }
        }
        Ok(())
    }

    /// Remove the entry stored under `key`.
    ///
    /// Deleting an absent key is a no-op. After the removal, a non-leaf
    /// root left with zero entries is replaced by its single remaining
    /// child: the metadata file is rewritten first and the orphaned root
    /// record deleted last.
    pub fn delete(&mut self, key: &K) -> ReedResult<()> {
        self.delete_from(self.root_id, key)?;

        loop {
            let root = self.store.load_node(self.root_id)?;
            if root.leaf || !root.entries.is_empty() || root.children.len() != 1 {
                return Ok(());
            }
            let old_root = self.root_id;
            self.root_id = root.children[0];
            self.save_metadata()?;
            self.store.delete_node(old_root)?;
        }
    }

    /// Recursive removal. Returns whether an entry was removed.
    fn delete_from(&mut self, id: NodeId, key: &K) -> ReedResult<bool> {
        let mut node = self.store.load_node(id)?;

        if let Some(i) = node.entries.iter().position(|(k, _)| k == key) {
            node.entries.remove(i);
            if node.leaf {
                self.store.update_node(&node)?;
            } else {
                self.refill_slot(&mut node, i)?;
            }
            return Ok(true);
        }

        if node.leaf {
            return Ok(false);
        }

        let i = node
            .entries
            .iter()
            .position(|(k, _)| key < k)
            .unwrap_or(node.entries.len());
        self.delete_from(node.children[i], key)
    }

    /// Restore `children == entries + 1` after removing the entry that sat
    /// at slot `i` of an internal node.
    ///
    /// Promotes the in-order predecessor from beneath `children[i]`, or
    /// the successor from beneath `children[i + 1]`; if both subtrees hold
    /// no entries the vacated child slot is dropped and its node records
    /// deleted.
    fn refill_slot(&mut self, node: &mut Node<K, V>, i: usize) -> ReedResult<()> {
        if let Some(entry) = self.pop_rightmost(node.children[i])? {
            node.entries.insert(i, entry);
            return self.store.update_node(node);
        }
        if let Some(entry) = self.pop_leftmost(node.children[i + 1])? {
            node.entries.insert(i, entry);
            return self.store.update_node(node);
        }

        // Both adjacent subtrees are empty; retire one of them
        let orphan = node.children.remove(i);
        self.store.update_node(node)?;
        self.delete_subtree(orphan)
    }

    /// Detach and return the in-order last entry of the subtree at `id`.
    ///
    /// Returns `None` when the subtree holds no entries at all.
    fn pop_rightmost(&mut self, id: NodeId) -> ReedResult<Option<(K, V)>> {
        let mut node = self.store.load_node(id)?;

        if !node.leaf {
            if let Some(&last) = node.children.last() {
                if let Some(entry) = self.pop_rightmost(last)? {
                    return Ok(Some(entry));
                }
            }
        }

        match node.entries.pop() {
            None => Ok(None),
            Some(entry) => {
                let mut orphan = None;
                if !node.leaf {
                    // The rightmost child subtree is empty; it leaves with
                    // the entry so the node stays consistent
                    orphan = node.children.pop();
                }
                self.store.update_node(&node)?;
                if let Some(orphan) = orphan {
                    self.delete_subtree(orphan)?;
                }
                Ok(Some(entry))
            }
        }
    }

    /// Detach and return the in-order first entry of the subtree at `id`.
    fn pop_leftmost(&mut self, id: NodeId) -> ReedResult<Option<(K, V)>> {
        let mut node = self.store.load_node(id)?;

        if !node.leaf {
            if let Some(&first) = node.children.first() {
                if let Some(entry) = self.pop_leftmost(first)? {
                    return Ok(Some(entry));
                }
            }
        }

        if node.entries.is_empty() {
            return Ok(None);
        }
        let entry = node.entries.remove(0);
        let mut orphan = None;
        if !node.leaf {
            orphan = Some(node.children.remove(0));
        }
        self.store.update_node(&node)?;
        if let Some(orphan) = orphan {
            self.delete_subtree(orphan)?;
        }
        Ok(Some(entry))
    }

    /// Delete every node record of an entry-free subtree.
    fn delete_subtree(&mut self, id: NodeId) -> ReedResult<()> {
        let node = self.store.load_node(id)?;
        for &child in &node.children {
            self.delete_subtree(child)?;
        }
        self.store.delete_node(id)
    }

    /// Minimum degree this tree was opened with.
    pub fn min_degree(&self) -> usize {
        self.t
    }
}

#[cfg(test)]
impl<K, V> BTree<K, V>
where
    K: Clone + Ord + Serialize + for<'de> Deserialize<'de> + std::fmt::Debug,
    V: Clone + Serialize + for<'de> Deserialize<'de>,
{
    /// Walk the whole tree asserting structural invariants. Test support.
    ///
    /// Checks, for every node: strict ascending entry order, the `2t - 1`
    /// occupancy ceiling, childlessness of leaves, `children == entries + 1`
    /// for internal nodes, and subtree key bounds.
    pub(crate) fn check_invariants(&self) -> ReedResult<()> {
        self.check_node(self.root_id, None, None)
    }

    fn check_node(&self, id: NodeId, lower: Option<&K>, upper: Option<&K>) -> ReedResult<()> {
        let node = self.store.load_node(id)?;

        assert!(
            node.entries.len() <= 2 * self.t - 1,
            "node {} holds {} entries (max {})",
            id,
            node.entries.len(),
            2 * self.t - 1
        );
        for pair in node.entries.windows(2) {
            assert!(
                pair[0].0 < pair[1].0,
                "node {} entries out of order: {:?} !< {:?}",
                id,
                pair[0].0,
                pair[1].0
            );
        }
        for (k, _) in &node.entries {
            if let Some(lower) = lower {
                assert!(lower < k, "node {} key {:?} below bound {:?}", id, k, lower);
            }
            if let Some(upper) = upper {
                assert!(k < upper, "node {} key {:?} above bound {:?}", id, k, upper);
            }
        }

        if node.leaf {
            assert!(node.children.is_empty(), "leaf {} has children", id);
            return Ok(());
        }

        assert_eq!(
            node.children.len(),
            node.entries.len() + 1,
            "node {} child count does not match entry count + 1",
            id
        );
        for (i, &child) in node.children.iter().enumerate() {
            let lower = if i == 0 { lower } else { Some(&node.entries[i - 1].0) };
            let upper = if i == node.entries.len() {
                upper
            } else {
                Some(&node.entries[i].0)
            };
            self.check_node(child, lower, upper)?;
        }
        Ok(())
    }
}

impl<K, V> BTree<K, V>
where
    K: Clone + Ord + Serialize + for<'de> Deserialize<'de> + std::fmt::Display,
    V: Clone + Serialize + for<'de> Deserialize<'de>,
{
    /// Render the tree structure for inspection.
    ///
    /// One line per node, indented by depth:
    /// `Node(ID=4, Keys=[1, 2], Leaf=true)`.
    pub fn dump(&self) -> ReedResult<String> {
        let mut out = String::new();
        self.dump_node(self.root_id, 0, &mut out)?;
        Ok(out)
    }

    fn dump_node(&self, id: NodeId, level: usize, out: &mut String) -> ReedResult<()> {
        let node = self.store.load_node(id)?;
        let keys = node
            .entries
            .iter()
            .map(|(k, _)| k.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        out.push_str(&format!(
            "{}Node(ID={}, Keys=[{}], Leaf={})\n",
            "  ".repeat(level),
            node.node_id,
            keys,
            node.leaf
        ));
        if !node.leaf {
            for &child in &node.children {
                self.dump_node(child, level + 1, out)?;
            }
        }
        Ok(())
    }
}
