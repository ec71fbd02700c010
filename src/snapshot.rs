use crate::error::SnapshotError;
use crate::graph::{Edge, FlowGraph, Node};
use bincode::config::standard;
use bincode::serde::{decode_from_slice, encode_to_vec};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{Read, Write};
use std::path::Path;

/// The full editable document: every node (including branches unreachable from the
/// start question), positions, handle orientation and the id counter.
///
/// The exported script drops all of that, so this is what an editor saves between
/// sessions.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DocumentSnapshot {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub next_id: u64,
}

impl DocumentSnapshot {
    pub fn capture(graph: &FlowGraph) -> Self {
        Self {
            nodes: graph.nodes().to_vec(),
            edges: graph.edges().to_vec(),
            next_id: graph.next_id(),
        }
    }

    /// Rebuilds the graph, rejecting snapshots with duplicate ids, dangling edges or
    /// more than one start question.
    pub fn restore(self) -> Result<FlowGraph, SnapshotError> {
        Ok(FlowGraph::from_parts(self.nodes, self.edges, self.next_id)?)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        encode_to_vec(self, standard())
            .map_err(|e| SnapshotError::Generic(format!("Serialization failed: {}", e)))
    }

    /// Saves the snapshot to a file using the bincode format.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
        let path = path.as_ref();
        let bytes = self.to_bytes()?;
        let mut file = fs::File::create(path).map_err(|e| {
            SnapshotError::Generic(format!("Could not create file '{}': {}", path.display(), e))
        })?;
        file.write_all(&bytes).map_err(|e| {
            SnapshotError::Generic(format!("Could not write to file '{}': {}", path.display(), e))
        })?;
        log::info!("Saved snapshot with {} nodes to '{}'", self.nodes.len(), path.display());
        Ok(())
    }

    /// Loads a snapshot from a file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let path = path.as_ref();
        let mut file = fs::File::open(path).map_err(|e| {
            SnapshotError::Generic(format!("Could not open file '{}': {}", path.display(), e))
        })?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes).map_err(|e| {
            SnapshotError::Generic(format!("Could not read from file '{}': {}", path.display(), e))
        })?;
        Self::from_bytes(&bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        decode_from_slice(bytes, standard())
            .map(|(snapshot, _)| snapshot) // bincode 2 returns (value, bytes_read)
            .map_err(|e| SnapshotError::Generic(format!("Deserialization failed: {}", e)))
    }
}
