//! The in-memory directed graph model.
//!
//! [`Graph`] is the substrate every analysis reads: a set of labelled
//! nodes and directed unit-weight edges, immutable once built. Nodes
//! are kept in insertion order and addressed internally by dense
//! indices, so the algorithms work on plain vectors instead of going
//! through id lookups in their inner loops.
//!
//! [`UndirectedGraph`] is the derived projection used by community
//! detection, clustering computations and the epidemic contact
//! network: a directed edge in either orientation becomes one
//! undirected edge. Building the projection never mutates the directed
//! graph.
//!
//! # Example
//!
//! ```
//! use meshwork_core::{Label, NodeId};
//! use meshwork_graph::Graph;
//!
//! let mut builder = Graph::builder();
//! builder.add_node(NodeId::new(1), Label::L1)?;
//! builder.add_node(NodeId::new(2), Label::L2)?;
//! builder.add_edge(NodeId::new(1), NodeId::new(2))?;
//! let graph = builder.build();
//!
//! assert_eq!(graph.node_count(), 2);
//! assert_eq!(graph.edge_count(), 1);
//! # Ok::<(), meshwork_graph::EngineError>(())
//! ```

use std::collections::{BTreeSet, HashMap};

use meshwork_core::{Label, NodeId};

use crate::error::{EngineError, EngineResult};
use crate::traversal::Direction;

/// An immutable directed graph with one label per node.
#[derive(Debug, Clone)]
pub struct Graph {
    nodes: Vec<NodeId>,
    labels: Vec<Label>,
    index: HashMap<NodeId, usize>,
    out_edges: Vec<Vec<usize>>,
    in_edges: Vec<Vec<usize>>,
    edge_count: usize,
}

impl Graph {
    /// Start building a graph.
    #[must_use]
    pub fn builder() -> GraphBuilder {
        GraphBuilder::new()
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of directed edges, parallel edges included.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// True when the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node ids in insertion order.
    #[must_use]
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// The id of the node at `index`.
    #[must_use]
    pub fn node_id(&self, index: usize) -> NodeId {
        self.nodes[index]
    }

    /// The label of the node at `index`.
    #[must_use]
    pub fn label(&self, index: usize) -> Label {
        self.labels[index]
    }

    /// The dense index of a node id, if present.
    #[must_use]
    pub fn index_of(&self, node: NodeId) -> Option<usize> {
        self.index.get(&node).copied()
    }

    /// Targets of the outgoing edges of the node at `index`.
    #[must_use]
    pub fn out_neighbors(&self, index: usize) -> &[usize] {
        &self.out_edges[index]
    }

    /// Sources of the incoming edges of the node at `index`.
    #[must_use]
    pub fn in_neighbors(&self, index: usize) -> &[usize] {
        &self.in_edges[index]
    }

    /// Neighbour indices following the given direction.
    ///
    /// Parallel edges are kept, so a neighbour may appear more than
    /// once; `Direction::Both` chains outgoing and incoming.
    #[must_use]
    pub fn neighbors(&self, index: usize, direction: Direction) -> Vec<usize> {
        let mut neighbors = Vec::new();
        if direction.includes_outgoing() {
            neighbors.extend_from_slice(&self.out_edges[index]);
        }
        if direction.includes_incoming() {
            neighbors.extend_from_slice(&self.in_edges[index]);
        }
        neighbors
    }

    /// In-degree of the node at `index`.
    #[must_use]
    pub fn in_degree(&self, index: usize) -> usize {
        self.in_edges[index].len()
    }

    /// Out-degree of the node at `index`.
    #[must_use]
    pub fn out_degree(&self, index: usize) -> usize {
        self.out_edges[index].len()
    }

    /// Total degree of the node at `index`: in-degree plus out-degree.
    #[must_use]
    pub fn total_degree(&self, index: usize) -> usize {
        self.in_degree(index) + self.out_degree(index)
    }

    /// Indices of the nodes carrying `label`, in insertion order.
    #[must_use]
    pub fn nodes_with_label(&self, label: Label) -> Vec<usize> {
        (0..self.node_count()).filter(|&i| self.labels[i] == label).collect()
    }

    /// The undirected projection of this graph.
    ///
    /// An edge `(u, v)` or `(v, u)` becomes the single undirected edge
    /// `{u, v}`; duplicates collapse and self-loops are dropped.
    #[must_use]
    pub fn undirected(&self) -> UndirectedGraph {
        let n = self.node_count();
        let mut neighbors: Vec<BTreeSet<usize>> = vec![BTreeSet::new(); n];
        for u in 0..n {
            for &v in &self.out_edges[u] {
                if u != v {
                    neighbors[u].insert(v);
                    neighbors[v].insert(u);
                }
            }
        }
        let edge_count = neighbors.iter().map(BTreeSet::len).sum::<usize>() / 2;
        UndirectedGraph { neighbors, edge_count }
    }
}

/// Builder validating the graph invariants during construction.
///
/// Node ids must be unique and every edge endpoint must reference a
/// node added before it. Self-loops and parallel directed edges are
/// accepted; the dataset may contain either.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    nodes: Vec<NodeId>,
    labels: Vec<Label>,
    index: HashMap<NodeId, usize>,
    edges: Vec<(usize, usize)>,
}

impl GraphBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a labelled node.
    pub fn add_node(&mut self, node: NodeId, label: Label) -> EngineResult<()> {
        if self.index.contains_key(&node) {
            return Err(EngineError::NodeAlreadyExists(node));
        }
        self.index.insert(node, self.nodes.len());
        self.nodes.push(node);
        self.labels.push(label);
        Ok(())
    }

    /// Add a directed edge between two existing nodes.
    pub fn add_edge(&mut self, source: NodeId, target: NodeId) -> EngineResult<()> {
        let source = *self.index.get(&source).ok_or(EngineError::UnknownNode(source))?;
        let target = *self.index.get(&target).ok_or(EngineError::UnknownNode(target))?;
        self.edges.push((source, target));
        Ok(())
    }

    /// Finish building; the graph is immutable from here on.
    #[must_use]
    pub fn build(self) -> Graph {
        let n = self.nodes.len();
        let mut out_edges: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut in_edges: Vec<Vec<usize>> = vec![Vec::new(); n];
        for &(source, target) in &self.edges {
            out_edges[source].push(target);
            in_edges[target].push(source);
        }
        Graph {
            nodes: self.nodes,
            labels: self.labels,
            index: self.index,
            out_edges,
            in_edges,
            edge_count: self.edges.len(),
        }
    }
}

/// The undirected projection of a [`Graph`].
#[derive(Debug, Clone)]
pub struct UndirectedGraph {
    neighbors: Vec<BTreeSet<usize>>,
    edge_count: usize,
}

impl UndirectedGraph {
    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.neighbors.len()
    }

    /// Number of undirected edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Neighbour indices of the node at `index`, ascending.
    pub fn neighbors(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        self.neighbors[index].iter().copied()
    }

    /// Degree of the node at `index`.
    #[must_use]
    pub fn degree(&self, index: usize) -> usize {
        self.neighbors[index].len()
    }

    /// True when `{a, b}` is an edge.
    #[must_use]
    pub fn has_edge(&self, a: usize, b: usize) -> bool {
        self.neighbors[a].contains(&b)
    }

    /// Number of triangles the node at `index` closes: edges among its
    /// neighbours.
    #[must_use]
    pub fn triangles_through(&self, index: usize) -> usize {
        let neighbors: Vec<usize> = self.neighbors[index].iter().copied().collect();
        let mut count = 0;
        for (i, &u) in neighbors.iter().enumerate() {
            for &w in &neighbors[i + 1..] {
                if self.has_edge(u, w) {
                    count += 1;
                }
            }
        }
        count
    }

    /// Local clustering coefficient of the node at `index`.
    ///
    /// Triangle based: `2·T(v) / (k(v)·(k(v)−1))`, with nodes of degree
    /// below two scoring zero.
    #[must_use]
    pub fn local_clustering(&self, index: usize) -> f64 {
        let k = self.degree(index);
        if k < 2 {
            return 0.0;
        }
        let triangles = self.triangles_through(index);
        2.0 * triangles as f64 / (k * (k - 1)) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: u64) -> NodeId {
        NodeId::new(id)
    }

    fn triangle_with_tail() -> Graph {
        // 1 -> 2 -> 3 -> 1, 3 -> 4
        let mut builder = Graph::builder();
        for id in 1..=4 {
            builder.add_node(node(id), Label::L1).unwrap();
        }
        builder.add_edge(node(1), node(2)).unwrap();
        builder.add_edge(node(2), node(3)).unwrap();
        builder.add_edge(node(3), node(1)).unwrap();
        builder.add_edge(node(3), node(4)).unwrap();
        builder.build()
    }

    #[test]
    fn builder_rejects_duplicate_node() {
        let mut builder = Graph::builder();
        builder.add_node(node(1), Label::L1).unwrap();
        let err = builder.add_node(node(1), Label::L2).unwrap_err();
        assert!(matches!(err, EngineError::NodeAlreadyExists(id) if id == node(1)));
    }

    #[test]
    fn builder_rejects_dangling_edge() {
        let mut builder = Graph::builder();
        builder.add_node(node(1), Label::L1).unwrap();
        let err = builder.add_edge(node(1), node(9)).unwrap_err();
        assert!(matches!(err, EngineError::UnknownNode(id) if id == node(9)));
    }

    #[test]
    fn degrees() {
        let graph = triangle_with_tail();
        let three = graph.index_of(node(3)).unwrap();
        assert_eq!(graph.in_degree(three), 1);
        assert_eq!(graph.out_degree(three), 2);
        assert_eq!(graph.total_degree(three), 3);
        let four = graph.index_of(node(4)).unwrap();
        assert_eq!(graph.total_degree(four), 1);
    }

    #[test]
    fn nodes_with_label() {
        let mut builder = Graph::builder();
        builder.add_node(node(1), Label::L1).unwrap();
        builder.add_node(node(2), Label::L2).unwrap();
        builder.add_node(node(3), Label::L1).unwrap();
        let graph = builder.build();
        assert_eq!(graph.nodes_with_label(Label::L1), vec![0, 2]);
        assert!(graph.nodes_with_label(Label::L7).is_empty());
    }

    #[test]
    fn undirected_projection_collapses_edges() {
        // 1 <-> 2 as two directed edges, plus a self-loop on 1
        let mut builder = Graph::builder();
        builder.add_node(node(1), Label::L1).unwrap();
        builder.add_node(node(2), Label::L1).unwrap();
        builder.add_edge(node(1), node(2)).unwrap();
        builder.add_edge(node(2), node(1)).unwrap();
        builder.add_edge(node(1), node(1)).unwrap();
        let graph = builder.build();
        assert_eq!(graph.edge_count(), 3);

        let und = graph.undirected();
        assert_eq!(und.edge_count(), 1);
        assert_eq!(und.degree(0), 1);
        assert!(und.has_edge(0, 1));
        assert!(!und.has_edge(0, 0));
    }

    #[test]
    fn clustering_on_triangle() {
        let graph = triangle_with_tail();
        let und = graph.undirected();
        let one = graph.index_of(node(1)).unwrap();
        let three = graph.index_of(node(3)).unwrap();
        let four = graph.index_of(node(4)).unwrap();
        assert_eq!(und.triangles_through(one), 1);
        assert!((und.local_clustering(one) - 1.0).abs() < f64::EPSILON);
        // node 3 has neighbours {1, 2, 4}; only {1, 2} are linked
        assert!((und.local_clustering(three) - 1.0 / 3.0).abs() < 1e-12);
        assert!((und.local_clustering(four) - 0.0).abs() < f64::EPSILON);
    }
}
