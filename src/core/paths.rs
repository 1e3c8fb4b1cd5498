/*!
# Shortest Paths

Unweighted shortest paths by breadth-first search. Tree completion stitches
the multicast tree out of these paths; hop count is the only cost that
matters in the telephone model, so no weighted variant is provided.
*/

use std::collections::{HashMap, VecDeque};

use crate::core::types::{Digraph, NodeId};

/// Finds a shortest directed path from `source` to `target` by hop count.
///
/// Returns the path as a node sequence starting at `source` and ending at
/// `target`, or `None` when no path exists or either endpoint is missing.
/// `Some(vec![source])` is returned when `source == target`.
///
/// # Complexity
///
/// - **Time:** O(V + E)
/// - **Space:** O(V)
pub fn shortest_path<A, W>(
    graph: &Digraph<A, W>,
    source: NodeId,
    target: NodeId,
) -> Option<Vec<NodeId>> {
    if !graph.contains_node(source) || !graph.contains_node(target) {
        return None;
    }
    if source == target {
        return Some(vec![source]);
    }

    let mut prev: HashMap<NodeId, NodeId> = HashMap::new();
    let mut queue = VecDeque::new();
    queue.push_back(source);

    while let Some(node) = queue.pop_front() {
        for succ in graph.successors(node) {
            if succ == source || prev.contains_key(&succ) {
                continue;
            }
            prev.insert(succ, node);
            if succ == target {
                let mut path = vec![target];
                let mut cur = target;
                while let Some(&p) = prev.get(&cur) {
                    path.push(p);
                    cur = p;
                }
                path.reverse();
                return Some(path);
            }
            queue.push_back(succ);
        }
    }
    None
}

/// Returns true if a directed path from `source` to `target` exists.
pub fn has_path<A, W>(graph: &Digraph<A, W>, source: NodeId, target: NodeId) -> bool {
    shortest_path(graph, source, target).is_some()
}
