/*!
# Instance Validation

Centralized precondition checks for a multicast instance. The pipeline and
the entry-point algorithms reject malformed input up front so the stages
behind them never have to defend against it.
*/

use std::collections::BTreeSet;

use crate::core::error::KmtmError;
use crate::core::types::{Digraph, NodeId};

/// Validates a multicast instance: the graph must be non-empty, the root
/// must exist, every terminal must exist, the root may not be a terminal,
/// and `1 <= k <= |terminals|`, `depth_cap >= 1`.
///
/// # Errors
///
/// Returns the first violated precondition as a `KmtmError`.
pub fn validate_instance<A, W>(
    graph: &Digraph<A, W>,
    root: NodeId,
    terminals: &BTreeSet<NodeId>,
    k: usize,
    depth_cap: usize,
) -> Result<(), KmtmError> {
    if graph.is_empty() {
        return Err(KmtmError::invalid_graph(
            "multicast instance needs a non-empty graph",
        ));
    }
    if k == 0 {
        return Err(KmtmError::invalid_argument("k must be at least 1"));
    }
    if depth_cap == 0 {
        return Err(KmtmError::invalid_argument("depth cap must be at least 1"));
    }
    if !graph.contains_node(root) {
        return Err(KmtmError::node_not_found(format!(
            "root {} is not in the graph",
            root.index()
        )));
    }
    if terminals.contains(&root) {
        return Err(KmtmError::invalid_argument(
            "the root cannot be a terminal",
        ));
    }
    for &t in terminals {
        if !graph.contains_node(t) {
            return Err(KmtmError::node_not_found(format!(
                "terminal {} is not in the graph",
                t.index()
            )));
        }
    }
    if k > terminals.len() {
        return Err(KmtmError::invalid_argument(format!(
            "k = {} exceeds the number of terminals ({})",
            k,
            terminals.len()
        )));
    }
    Ok(())
}
