// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Node Store implementation.
//!
//! Persists one node per file under a storage directory. Node payloads are
//! bincode-encoded and framed with a magic word plus a CRC32 checksum so
//! that torn writes surface as `NodeCorrupt` rather than being misread.

use crate::error::{ReedError, ReedResult};
use crate::store::node::{Node, NodeId};
use serde::{Deserialize, Serialize};
use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// Magic word at the head of every node file.
const NODE_MAGIC: u32 = 0x5EED_40DE;

/// Length of the frame preceding the bincode payload (magic + checksum).
const FRAME_LEN: usize = 8;

/// Slot-addressed node persistence.
///
/// Owns the storage directory and the monotonic identifier counter.
/// One store is owned by exactly one engine instance; the engine's data
/// directory lock enforces this across processes.
///
/// ## Type Parameters
/// - `K`: key type (must be Serialize + Deserialize)
/// - `V`: payload type (must be Serialize + Deserialize)
#[derive(Debug)]
pub struct NodeStore<K, V> {
    /// Directory holding `<id>.node` files.
    storage_path: PathBuf,

    /// Next identifier to hand out. Never decreases.
    next_id: NodeId,

    /// Phantom data for type parameters.
    _phantom: PhantomData<(K, V)>,
}

impl<K, V> NodeStore<K, V>
where
    K: Serialize + for<'de> Deserialize<'de>,
    V: Serialize + for<'de> Deserialize<'de>,
{
    /// Open or create a node store.
    ///
    /// ## Input
    /// - `storage_path`: directory for node files (created if absent)
    ///
    /// ## Output
    /// - `Ok(NodeStore)`: store ready, counter seeded
    /// - `Err(ReedError::Io)`: directory unreadable or uncreatable
    ///
    /// ## Side Effects
    /// - Creates the storage directory if it does not exist
    /// - Scans existing `<id>.node` files to seed the identifier counter
    ///   at `max(existing ids) + 1` (`0` when empty)
    pub fn open<P: AsRef<Path>>(storage_path: P) -> ReedResult<Self> {
        let storage_path = storage_path.as_ref().to_path_buf();

        fs::create_dir_all(&storage_path).map_err(|e| ReedError::Io {
            operation: "create_store_dir".to_string(),
            reason: e.to_string(),
        })?;

        let next_id = Self::initial_node_id(&storage_path)?;

        Ok(Self {
            storage_path,
            next_id,
            _phantom: PhantomData,
        })
    }

    /// Scan the directory for the highest existing identifier.
    fn initial_node_id(storage_path: &Path) -> ReedResult<NodeId> {
        let entries = fs::read_dir(storage_path).map_err(|e| ReedError::Io {
            operation: "scan_store_dir".to_string(),
            reason: e.to_string(),
        })?;

        let mut max_id: Option<NodeId> = None;
        for entry in entries {
            let entry = entry.map_err(|e| ReedError::Io {
                operation: "scan_store_dir".to_string(),
                reason: e.to_string(),
            })?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("node") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if let Ok(id) = stem.parse::<NodeId>() {
                    max_id = Some(max_id.map_or(id, |m| m.max(id)));
                }
            }
        }

        Ok(max_id.map_or(0, |m| m + 1))
    }

    /// Path of the file backing `id`.
    fn node_path(&self, id: NodeId) -> PathBuf {
        self.storage_path.join(format!("{}.node", id))
    }

    /// Persist a new node under the next identifier.
    ///
    /// Assigns the identifier onto the node value before writing, so the
    /// persisted record names itself.
    ///
    /// ## Output
    /// - `Ok(NodeId)`: identifier assigned to the node
    /// - `Err(ReedError)`: encoding or write failure
    pub fn save_node(&mut self, node: &mut Node<K, V>) -> ReedResult<NodeId> {
        let id = self.next_id;
        node.node_id = id;
        self.write_node_file(node)?;
        self.next_id += 1;
        Ok(id)
    }

    /// Load the node stored under `id`.
    ///
    /// ## Output
    /// - `Ok(Node)`: decoded node
    /// - `Err(ReedError::NodeMissing)`: no file for `id`
    /// - `Err(ReedError::NodeCorrupt)`: short file, bad magic, checksum
    ///   mismatch or undecodable payload
    pub fn load_node(&self, id: NodeId) -> ReedResult<Node<K, V>> {
        let path = self.node_path(id);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ReedError::NodeMissing {
                    id,
                    path: path.display().to_string(),
                });
            }
            Err(e) => {
                return Err(ReedError::Io {
                    operation: "read_node".to_string(),
                    reason: e.to_string(),
                });
            }
        };

        if bytes.len() < FRAME_LEN {
            return Err(ReedError::NodeCorrupt {
                id,
                reason: format!("file truncated to {} bytes", bytes.len()),
            });
        }

        let magic = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        if magic != NODE_MAGIC {
            return Err(ReedError::NodeCorrupt {
                id,
                reason: format!("bad magic word {:#010x}", magic),
            });
        }

        let stored_crc = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
        let payload = &bytes[FRAME_LEN..];
        let actual_crc = crc32fast::hash(payload);
        if stored_crc != actual_crc {
            return Err(ReedError::NodeCorrupt {
                id,
                reason: format!(
                    "checksum mismatch (stored {:#010x}, computed {:#010x})",
                    stored_crc, actual_crc
                ),
            });
        }

        bincode::deserialize(payload).map_err(|e| ReedError::NodeCorrupt {
            id,
            reason: e.to_string(),
        })
    }

    /// Overwrite the file for `node.node_id`.
    ///
    /// Whole-file replacement is the only durability primitive used.
    pub fn update_node(&self, node: &Node<K, V>) -> ReedResult<()> {
        self.write_node_file(node)
    }

    /// Remove the file for `id`.
    ///
    /// ## Output
    /// - `Err(ReedError::NodeMissing)`: no file for `id`
    pub fn delete_node(&self, id: NodeId) -> ReedResult<()> {
        let path = self.node_path(id);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(ReedError::NodeMissing {
                id,
                path: path.display().to_string(),
            }),
            Err(e) => Err(ReedError::Io {
                operation: "delete_node".to_string(),
                reason: e.to_string(),
            }),
        }
    }

    /// Encode and write one node file.
    fn write_node_file(&self, node: &Node<K, V>) -> ReedResult<()> {
        let payload = bincode::serialize(node).map_err(|e| ReedError::Serialization {
            reason: e.to_string(),
        })?;

        let mut bytes = Vec::with_capacity(FRAME_LEN + payload.len());
        bytes.extend_from_slice(&NODE_MAGIC.to_le_bytes());
        bytes.extend_from_slice(&crc32fast::hash(&payload).to_le_bytes());
        bytes.extend_from_slice(&payload);

        fs::write(self.node_path(node.node_id), bytes).map_err(|e| ReedError::Io {
            operation: "write_node".to_string(),
            reason: e.to_string(),
        })
    }
}
