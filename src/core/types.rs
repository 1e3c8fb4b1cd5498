/*!
# Graph Type

This module defines the directed graph type used throughout the crate. The
`Digraph` struct is a thin wrapper around petgraph's `StableGraph` that fixes
the edge direction and exposes the iteration surface the multicast pipeline
relies on: node iteration in index order, successor iteration in a stable
order, membership tests, and degree queries.

All algorithms in this crate treat the graph as immutable; mutation is only
used while building a graph (generators, tests).

# Examples

```rust
use kmtm::core::types::Digraph;

let mut g = Digraph::<u32, f32>::new();
let a = g.add_node(0);
let b = g.add_node(1);
g.add_edge(a, b, 1.0);
assert_eq!(g.successors(a).count(), 1);
```
*/

use petgraph::Directed;
use petgraph::graph::{EdgeIndex, NodeIndex};
use petgraph::prelude::EdgeRef;
use petgraph::stable_graph::StableGraph;
use petgraph::visit::{IntoEdgeReferences, IntoNodeReferences};

/// Wrapper for petgraph's `NodeIndex` so graph internals do not leak into
/// the public API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) NodeIndex);

impl NodeId {
    /// Returns the numeric part of the node's index.
    pub fn index(&self) -> usize {
        self.0.index()
    }

    pub(crate) fn new(index: NodeIndex) -> Self {
        Self(index)
    }
}

/// Wrapper for petgraph's `EdgeIndex`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeId(pub(crate) EdgeIndex);

impl EdgeId {
    /// Returns the numeric part of the edge's index.
    pub fn index(&self) -> usize {
        self.0.index()
    }

    pub(crate) fn new(index: EdgeIndex) -> Self {
        Self(index)
    }
}

/// A directed graph with stable node indices.
///
/// Generic parameters:
/// - `A`: node attribute type.
/// - `W`: edge weight type (the multicast algorithms ignore weights; hop
///   counts are what matter).
///
/// Using `StableGraph` means removing a node never renumbers the others, so
/// `NodeId`s stay valid across removals and iteration order stays
/// reproducible for a fixed construction sequence.
#[derive(Debug, Clone)]
pub struct Digraph<A, W> {
    inner: StableGraph<A, W, Directed>,
}

impl<A, W> Default for Digraph<A, W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A, W> Digraph<A, W> {
    /// Creates a new empty directed graph.
    pub fn new() -> Self {
        Self {
            inner: StableGraph::with_capacity(0, 0),
        }
    }

    /// Creates a new graph with pre-allocated capacity for nodes and edges.
    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            inner: StableGraph::with_capacity(nodes, edges),
        }
    }

    /// Returns true if the graph contains no nodes.
    pub fn is_empty(&self) -> bool {
        self.inner.node_count() == 0
    }

    /// Returns the number of nodes in the graph.
    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    /// Returns the number of edges in the graph.
    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// Adds a node with the specified attribute to the graph.
    pub fn add_node(&mut self, attr: A) -> NodeId {
        NodeId::new(self.inner.add_node(attr))
    }

    /// Adds a directed edge with the given weight.
    pub fn add_edge(&mut self, source: NodeId, target: NodeId, weight: W) -> EdgeId {
        EdgeId::new(self.inner.add_edge(source.0, target.0, weight))
    }

    /// Removes a node from the graph, returning its attribute if it existed.
    /// All incident edges are removed with it.
    pub fn remove_node(&mut self, node: NodeId) -> Option<A> {
        self.inner.remove_node(node.0)
    }

    /// Returns true if the node exists in the graph.
    pub fn contains_node(&self, node: NodeId) -> bool {
        self.inner.node_weight(node.0).is_some()
    }

    /// Returns true if there is an edge from `source` to `target`.
    pub fn contains_edge(&self, source: NodeId, target: NodeId) -> bool {
        self.inner.find_edge(source.0, target.0).is_some()
    }

    /// Returns a reference to the attribute of a node.
    pub fn node_attr(&self, node: NodeId) -> Option<&A> {
        self.inner.node_weight(node.0)
    }

    /// Returns the out-degree of a node, or `None` if the node doesn't exist.
    pub fn out_degree(&self, node: NodeId) -> Option<usize> {
        if !self.contains_node(node) {
            return None;
        }
        Some(self.inner.edges(node.0).count())
    }

    /// Returns an iterator over the direct successors of a node.
    ///
    /// The order is petgraph's stable neighbor order, which is fixed for a
    /// given construction sequence. Algorithms whose outcome depends on
    /// successor order rely on this determinism.
    pub fn successors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.inner.neighbors(node.0).map(NodeId::new)
    }

    /// Returns an iterator over all nodes and their attributes, in index
    /// order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &A)> + '_ {
        self.inner
            .node_references()
            .map(|(idx, attr)| (NodeId::new(idx), attr))
    }

    /// Returns an iterator over all node identifiers, in index order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.inner.node_indices().map(NodeId::new)
    }

    /// Returns an iterator over all edges and their weights.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId, &W)> + '_ {
        self.inner.edge_references().map(|edge| {
            (
                NodeId::new(edge.source()),
                NodeId::new(edge.target()),
                edge.weight(),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::Digraph;

    #[test]
    fn test_add_and_query() {
        let mut g = Digraph::<u32, f32>::new();
        let a = g.add_node(0);
        let b = g.add_node(1);
        let c = g.add_node(2);
        g.add_edge(a, b, 1.0);
        g.add_edge(a, c, 1.0);

        assert_eq!(g.node_count(), 3);
        assert_eq!(g.edge_count(), 2);
        assert!(g.contains_edge(a, b));
        assert!(!g.contains_edge(b, a));
        assert_eq!(g.out_degree(a), Some(2));
        assert_eq!(g.out_degree(c), Some(0));
    }

    #[test]
    fn test_removal_keeps_indices_stable() {
        let mut g = Digraph::<u32, f32>::new();
        let a = g.add_node(0);
        let b = g.add_node(1);
        let c = g.add_node(2);
        g.add_edge(a, b, 1.0);
        g.add_edge(b, c, 1.0);

        g.remove_node(b);
        assert!(!g.contains_node(b));
        assert!(g.contains_node(c));
        assert_eq!(g.out_degree(a), Some(0));
    }

    #[test]
    fn test_successor_order_is_reproducible() {
        let build = || {
            let mut g = Digraph::<u32, f32>::new();
            let ids: Vec<_> = (0..5).map(|i| g.add_node(i)).collect();
            for &t in &ids[1..] {
                g.add_edge(ids[0], t, 1.0);
            }
            (g, ids)
        };
        let (g1, ids1) = build();
        let (g2, _) = build();
        let s1: Vec<_> = g1.successors(ids1[0]).collect();
        let s2: Vec<_> = g2.successors(ids1[0]).collect();
        assert_eq!(s1, s2);
    }
}
