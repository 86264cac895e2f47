//! Contact Network
//!
//! The fixed undirected graph that decides who can infect whom, plus the
//! 3D layout the replay draws it with. The simulation only ever reads
//! the graph; the layout is carried along for presentation.

use std::f64::consts::PI;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use sir_events::{NetworkDocument, NodeId, NodeRecord};
use thiserror::Error;

use crate::error::SimResult;

/// Errors raised while building a contact network.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetworkError {
    #[error("edge ({u}, {v}) references a node outside 0..{node_count}")]
    NodeOutOfRange { u: usize, v: usize, node_count: usize },

    #[error("layout has {positions} positions for {nodes} nodes")]
    LayoutMismatch { nodes: usize, positions: usize },

    #[error("node record at position {position} has id {id}; ids must run 0..n in order")]
    NonSequentialId { position: usize, id: usize },
}

/// Immutable undirected graph stored as sorted adjacency lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactGraph {
    adjacency: Vec<Vec<NodeId>>,
    edge_count: usize,
}

impl ContactGraph {
    /// Builds a graph from an edge list.
    ///
    /// Self-loops and repeated edges are dropped.
    pub fn from_edges<I>(node_count: usize, edges: I) -> Result<Self, NetworkError>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut adjacency: Vec<Vec<NodeId>> = vec![Vec::new(); node_count];
        for (u, v) in edges {
            if u >= node_count || v >= node_count {
                return Err(NetworkError::NodeOutOfRange { u, v, node_count });
            }
            if u == v {
                continue;
            }
            adjacency[u].push(NodeId(v));
            adjacency[v].push(NodeId(u));
        }
        for neighbors in &mut adjacency {
            neighbors.sort_unstable();
            neighbors.dedup();
        }
        Ok(Self::from_adjacency(adjacency))
    }

    /// Every pair of nodes connected.
    pub fn complete(node_count: usize) -> Self {
        let adjacency = (0..node_count)
            .map(|i| (0..node_count).filter(|&j| j != i).map(NodeId).collect())
            .collect();
        Self::from_adjacency(adjacency)
    }

    /// Nodes with no contacts at all.
    pub fn isolated(node_count: usize) -> Self {
        Self::from_adjacency(vec![Vec::new(); node_count])
    }

    fn from_adjacency(adjacency: Vec<Vec<NodeId>>) -> Self {
        let edge_count = adjacency.iter().map(Vec::len).sum::<usize>() / 2;
        Self {
            adjacency,
            edge_count,
        }
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// All node ids in index order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> {
        (0..self.adjacency.len()).map(NodeId)
    }

    /// Neighbors of a node in ascending id order. Unknown nodes have none.
    pub fn neighbors(&self, node: NodeId) -> &[NodeId] {
        self.adjacency
            .get(node.index())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn degree(&self, node: NodeId) -> usize {
        self.neighbors(node).len()
    }

    /// Each undirected edge once, as `(u, v)` with `u < v`.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.adjacency.iter().enumerate().flat_map(|(u, neighbors)| {
            neighbors
                .iter()
                .filter(move |v| v.index() > u)
                .map(move |&v| (NodeId(u), v))
        })
    }

    pub fn mean_degree(&self) -> f64 {
        if self.adjacency.is_empty() {
            0.0
        } else {
            2.0 * self.edge_count as f64 / self.adjacency.len() as f64
        }
    }

    /// Stable content hash of the node and edge sets.
    pub fn content_hash(&self) -> blake3::Hash {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&(self.node_count() as u64).to_le_bytes());
        for (u, v) in self.edges() {
            hasher.update(&(u.index() as u64).to_le_bytes());
            hasher.update(&(v.index() as u64).to_le_bytes());
        }
        hasher.finalize()
    }
}

/// Per-node 3D positions. Never read by the simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    positions: Vec<[f64; 3]>,
}

impl Layout {
    pub fn new(positions: Vec<[f64; 3]>) -> Self {
        Self { positions }
    }

    /// Spreads `count` points evenly over the unit sphere.
    pub fn fibonacci_sphere(count: usize) -> Self {
        let golden_angle = PI * (3.0 - 5f64.sqrt());
        let positions = (0..count)
            .map(|i| {
                let y = 1.0 - 2.0 * (i as f64 + 0.5) / count as f64;
                let radius = (1.0 - y * y).sqrt();
                let theta = golden_angle * i as f64;
                [theta.cos() * radius, y, theta.sin() * radius]
            })
            .collect();
        Self { positions }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn position(&self, node: NodeId) -> Option<[f64; 3]> {
        self.positions.get(node.index()).copied()
    }

    pub fn positions(&self) -> &[[f64; 3]] {
        &self.positions
    }

    /// Axis-aligned bounding box as `(min, max)`.
    pub fn bounds(&self) -> Option<([f64; 3], [f64; 3])> {
        let first = *self.positions.first()?;
        Some(self.positions.iter().fold((first, first), |(mut lo, mut hi), p| {
            for axis in 0..3 {
                lo[axis] = lo[axis].min(p[axis]);
                hi[axis] = hi[axis].max(p[axis]);
            }
            (lo, hi)
        }))
    }
}

/// A contact graph together with its layout.
///
/// The graph sits behind an [`Arc`] so independent simulations can share it.
#[derive(Debug, Clone)]
pub struct ContactNetwork {
    graph: Arc<ContactGraph>,
    layout: Layout,
}

impl ContactNetwork {
    /// Pairs a graph with a layout of matching length.
    pub fn new(graph: Arc<ContactGraph>, layout: Layout) -> Result<Self, NetworkError> {
        if graph.node_count() != layout.len() {
            return Err(NetworkError::LayoutMismatch {
                nodes: graph.node_count(),
                positions: layout.len(),
            });
        }
        Ok(Self { graph, layout })
    }

    /// Fully connected network laid out on a sphere.
    pub fn complete(node_count: usize) -> Self {
        Self {
            graph: Arc::new(ContactGraph::complete(node_count)),
            layout: Layout::fibonacci_sphere(node_count),
        }
    }

    /// Edgeless network laid out on a sphere.
    pub fn isolated(node_count: usize) -> Self {
        Self {
            graph: Arc::new(ContactGraph::isolated(node_count)),
            layout: Layout::fibonacci_sphere(node_count),
        }
    }

    /// Builds a network from its file representation.
    pub fn from_document(doc: &NetworkDocument) -> Result<Self, NetworkError> {
        for (position, node) in doc.nodes.iter().enumerate() {
            if node.id != position {
                return Err(NetworkError::NonSequentialId {
                    position,
                    id: node.id,
                });
            }
        }
        let graph = ContactGraph::from_edges(
            doc.node_count(),
            doc.edges.iter().map(|&[u, v]| (u, v)),
        )?;
        let layout = Layout::new(doc.nodes.iter().map(|n| n.position).collect());
        Self::new(Arc::new(graph), layout)
    }

    /// Loads a network from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> SimResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let doc = NetworkDocument::from_json(&content)?;
        let network = Self::from_document(&doc)?;
        tracing::debug!(
            "Loaded network from {:?}: {} nodes, {} edges",
            path,
            network.graph.node_count(),
            network.graph.edge_count()
        );
        Ok(network)
    }

    /// File representation of this network.
    pub fn to_document(&self) -> NetworkDocument {
        NetworkDocument {
            nodes: self
                .layout
                .positions()
                .iter()
                .enumerate()
                .map(|(id, &position)| NodeRecord { id, position })
                .collect(),
            edges: self
                .graph
                .edges()
                .map(|(u, v)| [u.index(), v.index()])
                .collect(),
        }
    }

    pub fn graph(&self) -> &Arc<ContactGraph> {
        &self.graph
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }
}
