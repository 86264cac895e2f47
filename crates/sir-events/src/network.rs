//! Network Document
//!
//! On-disk format for a contact network and its 3D layout, as produced by
//! whatever tool generated the graph.
//!
//! ```json
//! {
//!   "nodes": [{"id": 0, "position": [0.1, 0.4, -0.2]}],
//!   "edges": [[0, 1]]
//! }
//! ```

use serde::{Deserialize, Serialize};

/// A node and its layout position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: usize,
    pub position: [f64; 3],
}

/// Undirected graph plus per-node 3D positions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkDocument {
    pub nodes: Vec<NodeRecord>,
    #[serde(default)]
    pub edges: Vec<[usize; 2]>,
}

impl NetworkDocument {
    /// Number of nodes in the document.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Serializes the document to pretty JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes a document from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_default_to_empty() {
        let doc = NetworkDocument::from_json(r#"{"nodes":[{"id":0,"position":[0,0,0]}]}"#).unwrap();
        assert_eq!(doc.node_count(), 1);
        assert!(doc.edges.is_empty());
    }

    #[test]
    fn test_parse_document() {
        let json = r#"{
            "nodes": [
                {"id": 0, "position": [1.0, 2.0, 3.0]},
                {"id": 1, "position": [-1.0, 0.5, 0.0]}
            ],
            "edges": [[0, 1]]
        }"#;
        let doc = NetworkDocument::from_json(json).unwrap();
        assert_eq!(doc.nodes[1].position, [-1.0, 0.5, 0.0]);
        assert_eq!(doc.edges, vec![[0, 1]]);
    }
}
