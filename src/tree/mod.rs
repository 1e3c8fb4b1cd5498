/*!
# Multicast Tree

Third stage of the pipeline: stitch the greedy packs and the selected
cover edges into a single directed multicast tree rooted at the broadcast
source. The tree is represented as its own adjacency structure keyed by
the host graph's node identifiers, so terminals keep their identity across
stages and the simulator can walk it directly.

Successor lists preserve insertion order and an edge is stored once no
matter how many stitched paths traverse it. Insertion order is what the
telephone simulator hands off along, so stitching order is
outcome-affecting and deterministic.
*/

use std::collections::BTreeMap;

use crate::core::paths::shortest_path;
use crate::core::types::{Digraph, NodeId};
use crate::cover::CoverKey;
use crate::packing::rho;

/// A directed subgraph of the host graph, rooted at the broadcast source.
///
/// Every edge was added by tree completion; nodes carry no attributes of
/// their own. Despite the name the structure may have nodes with in-degree
/// above one when stitched paths overlap; the simulator does not require
/// otherwise.
#[derive(Debug, Clone)]
pub struct MulticastTree {
    root: NodeId,
    succ: BTreeMap<NodeId, Vec<NodeId>>,
}

impl MulticastTree {
    /// Creates a tree containing only the root.
    pub fn new(root: NodeId) -> Self {
        Self {
            root,
            succ: BTreeMap::from([(root, Vec::new())]),
        }
    }

    /// The broadcast source.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Returns true if the node was added to the tree.
    pub fn contains_node(&self, node: NodeId) -> bool {
        self.succ.contains_key(&node)
    }

    /// Number of nodes in the tree.
    pub fn node_count(&self) -> usize {
        self.succ.len()
    }

    /// Number of edges in the tree.
    pub fn edge_count(&self) -> usize {
        self.succ.values().map(Vec::len).sum()
    }

    /// The children of a node in insertion order; empty for unknown nodes.
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.succ.get(&node).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Out-degree within the tree; zero for unknown nodes.
    pub fn out_degree(&self, node: NodeId) -> usize {
        self.children(node).len()
    }

    /// Iterates over the tree's nodes in identifier order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.succ.keys().copied()
    }

    /// Adds a directed edge, ignoring duplicates.
    pub fn add_edge(&mut self, source: NodeId, target: NodeId) {
        let children = self.succ.entry(source).or_default();
        if !children.contains(&target) {
            children.push(target);
        }
        self.succ.entry(target).or_default();
    }

    /// Adds every edge along a node path.
    pub fn add_path(&mut self, path: &[NodeId]) {
        for pair in path.windows(2) {
            self.add_edge(pair[0], pair[1]);
        }
        if let [only] = path {
            self.succ.entry(*only).or_default();
        }
    }

    /// Returns true if the tree has a directed path from `source` to
    /// `target`.
    pub fn has_path(&self, source: NodeId, target: NodeId) -> bool {
        if !self.contains_node(source) || !self.contains_node(target) {
            return false;
        }
        let mut stack = vec![source];
        let mut seen = std::collections::HashSet::from([source]);
        while let Some(node) = stack.pop() {
            if node == target {
                return true;
            }
            for &child in self.children(node) {
                if seen.insert(child) {
                    stack.push(child);
                }
            }
        }
        false
    }
}

/// Stitches packs and selected cover edges into one multicast tree.
///
/// With at least `rho(k)` packs, the packs alone satisfy the demand: the
/// first `rho(k)` pack representatives (each pack's first terminal) are
/// connected to the root by shortest paths and the cover edges are not
/// consulted.
///
/// With fewer packs, both sources contribute: each pack is stitched as a
/// shortest root→representative path plus shortest representative→terminal
/// paths, then every selected cover edge `(a, c)` whose anchor already
/// made it into the tree contributes the edge itself plus shortest
/// gateway→terminal paths for the gateway's witness terminals.
///
/// Every lookup is guarded: a missing shortest path skips that
/// contribution, and witness terminals that are not graph nodes are
/// ignored. The result is always rooted at `root` and contains only edges
/// of `graph` (plus the explicitly selected cover edges).
pub fn complete<A, W>(
    graph: &Digraph<A, W>,
    root: NodeId,
    packs: &[Vec<NodeId>],
    cover_edges: &[CoverKey],
    cover_map: &BTreeMap<NodeId, Vec<NodeId>>,
    k: usize,
) -> MulticastTree {
    let mut tree = MulticastTree::new(root);
    let pack_bound = rho(k);

    // Packs alone meet the demand: connect one representative per pack.
    if packs.len() >= pack_bound {
        for pack in &packs[..pack_bound] {
            let Some(&rep) = pack.first() else {
                continue;
            };
            if let Some(path) = shortest_path(graph, root, rep) {
                tree.add_path(&path);
            }
        }
        return tree;
    }

    for pack in packs {
        let Some(&rep) = pack.first() else {
            continue;
        };
        let Some(path) = shortest_path(graph, root, rep) else {
            continue;
        };
        tree.add_path(&path);
        for &term in pack.iter().filter(|&&t| t != rep) {
            if let Some(sub) = shortest_path(graph, rep, term) {
                tree.add_path(&sub);
            }
        }
    }

    for &(anchor, gateway) in cover_edges {
        if !tree.contains_node(anchor) || !graph.contains_node(gateway) {
            continue;
        }
        tree.add_edge(anchor, gateway);
        let witnesses = cover_map.get(&gateway).map(Vec::as_slice).unwrap_or(&[]);
        for &term in witnesses {
            if !graph.contains_node(term) {
                continue;
            }
            if let Some(sub) = shortest_path(graph, gateway, term) {
                tree.add_path(&sub);
            }
        }
    }

    tree
}
