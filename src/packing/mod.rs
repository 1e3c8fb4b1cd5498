/*!
# Greedy Packing

First stage of the multicast pipeline: extract up to ⌈√k⌉ vertex-disjoint
shallow subtrees, each covering as many still-uncovered terminals as
possible. A pack is recorded as the list of terminals its subtree reached,
in BFS discovery order.

Disjointness is enforced by construction: every node a chosen subtree
visited is marked used, and later candidate searches may not enter used
nodes. The root counts as used from the start, so no pack can claim it.
*/

use std::collections::{BTreeSet, HashSet};

use tracing::trace;

use crate::core::error::KmtmError;
use crate::core::traversal::bounded_bfs;
use crate::core::types::{Digraph, NodeId};
use crate::core::validation::validate_instance;

/// Returns ⌈√k⌉, the structural bound reused across the pipeline: maximum
/// number of packs, pack-size target, and per-source budget for partition
/// cover.
pub fn rho(k: usize) -> usize {
    (k as f64).sqrt().ceil() as usize
}

/// Extracts up to `rho(k)` vertex-disjoint subtrees of height ≤ `depth_cap`
/// rooted anywhere but at already-used nodes, each covering at least one
/// terminal.
///
/// Every round scans all unused candidate roots, walks each one's
/// depth-bounded ball restricted to unused nodes, and keeps the candidate
/// covering the most uncovered terminals (ties go to the smallest node
/// index, since candidates are scanned in index order). A best candidate
/// with zero coverage ends the search early.
///
/// For `k = 1` a single terminal suffices, so each candidate walk stops at
/// its first discovered terminal and the pack holds exactly that terminal.
///
/// # Returns
///
/// The packs in extraction order; each pack lists its terminals in BFS
/// discovery order. The result is empty when no candidate reaches any
/// terminal within the depth cap. Fewer than `rho(k)` packs is an expected
/// outcome, not an error.
///
/// # Errors
///
/// Only malformed instances are rejected (see
/// [`validate_instance`](crate::core::validation::validate_instance)).
pub fn greedy_packing<A, W>(
    graph: &Digraph<A, W>,
    root: NodeId,
    terminals: &BTreeSet<NodeId>,
    k: usize,
    depth_cap: usize,
) -> Result<Vec<Vec<NodeId>>, KmtmError> {
    validate_instance(graph, root, terminals, k, depth_cap)?;

    let max_packs = rho(k);
    let mut packs: Vec<Vec<NodeId>> = Vec::new();
    let mut used: HashSet<NodeId> = HashSet::from([root]);
    let mut remaining: BTreeSet<NodeId> = terminals.clone();

    while packs.len() < max_packs && !remaining.is_empty() {
        let mut best: Option<(NodeId, Vec<NodeId>, HashSet<NodeId>)> = None;

        for candidate in graph.node_ids() {
            if used.contains(&candidate) {
                continue;
            }
            let is_terminal = |v: NodeId| remaining.contains(&v);
            let stop: Option<&dyn Fn(NodeId) -> bool> =
                if k == 1 { Some(&is_terminal) } else { None };
            let ball = bounded_bfs(graph, candidate, depth_cap, |v| !used.contains(&v), stop)?;

            let mut cover: Vec<NodeId> = ball
                .order
                .iter()
                .copied()
                .filter(|v| remaining.contains(v))
                .collect();
            if k == 1 {
                cover.truncate(1);
            }

            let improves = match &best {
                None => !cover.is_empty(),
                Some((_, best_cover, _)) => cover.len() > best_cover.len(),
            };
            if improves {
                best = Some((candidate, cover, ball.visited));
            }
        }

        match best {
            Some((pack_root, cover, subtree)) => {
                trace!(
                    pack_root = pack_root.index(),
                    covered = cover.len(),
                    "pack recorded"
                );
                used.extend(subtree);
                for t in &cover {
                    remaining.remove(t);
                }
                packs.push(cover);
            }
            None => break,
        }
    }

    Ok(packs)
}
