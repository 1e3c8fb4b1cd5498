/*!
# Partition-Matroid Coverage

Second stage of the multicast pipeline. When greedy packing leaves
terminals uncovered, the residual graph is turned into a coverage instance:
for every edge that crosses from the packed region into the rest of the
graph, record which terminals the far endpoint can reach within the depth
cap without re-entering the packed region. Selecting crossing edges under a
per-source budget is then a maximum-coverage problem over a partition
matroid.

Three selection strategies live in the submodules:

- [`greedy`] — eager greedy, ½-approximation.
- [`lazy`] — the same selection rule accelerated with a max-heap.
- [`continuous`] — continuous greedy plus rounding, (1 − 1/e)-approximation.

All containers here are ordered maps so that iteration — and therefore tie
breaking — is reproducible.
*/

pub mod continuous;
pub mod greedy;
pub mod lazy;

use std::collections::{BTreeMap, BTreeSet};

use crate::core::error::KmtmError;
use crate::core::traversal::bounded_bfs;
use crate::core::types::{Digraph, NodeId};
use crate::core::validation::validate_instance;
use crate::packing::rho;

/// A crossing edge `(anchor, gateway)`: the anchor is already reachable by
/// the packed region (or is the root), the gateway lies outside it.
pub type CoverKey = (NodeId, NodeId);

/// The coverage instance built from the residual graph after packing.
#[derive(Debug, Clone, Default)]
pub struct CoverInstance {
    /// Maps each crossing edge to the terminals its gateway reaches within
    /// the depth cap, staying outside the packed region.
    pub sets: BTreeMap<CoverKey, BTreeSet<NodeId>>,
    /// Per-anchor selection budget; `rho(k)` for every anchor.
    pub budgets: BTreeMap<NodeId, usize>,
    /// Witness terminals per gateway, in BFS discovery order, used by tree
    /// completion for stitching. When several anchors share a gateway the
    /// last writer wins; the full information stays available in `sets`.
    pub cover_map: BTreeMap<NodeId, Vec<NodeId>>,
}

impl CoverInstance {
    /// Returns true if no crossing edge covers any terminal.
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

/// Builds the coverage instance for the residual graph.
///
/// The packed region `A` is the root plus every terminal appearing in a
/// pack; everything else forms the candidate region `C`. For each graph
/// edge from `A` into `C`, a depth-bounded BFS restricted to `C` collects
/// the terminals the gateway can reach; gateways reaching none are left
/// out.
///
/// # Errors
///
/// Only malformed instances are rejected; an empty instance (no useful
/// crossing edge) is an expected outcome.
pub fn build_cover_instance<A, W>(
    graph: &Digraph<A, W>,
    root: NodeId,
    terminals: &BTreeSet<NodeId>,
    packs: &[Vec<NodeId>],
    depth_cap: usize,
    k: usize,
) -> Result<CoverInstance, KmtmError> {
    validate_instance(graph, root, terminals, k, depth_cap)?;

    let mut anchors: BTreeSet<NodeId> = packs.iter().flatten().copied().collect();
    anchors.insert(root);

    let budget = rho(k);
    let mut instance = CoverInstance {
        budgets: anchors.iter().map(|&a| (a, budget)).collect(),
        ..CoverInstance::default()
    };

    for &anchor in &anchors {
        for gateway in graph.successors(anchor) {
            if anchors.contains(&gateway) {
                continue;
            }
            let ball = bounded_bfs(
                graph,
                gateway,
                depth_cap,
                |v| !anchors.contains(&v),
                None,
            )?;
            let coverage: Vec<NodeId> = ball
                .order
                .iter()
                .copied()
                .filter(|v| terminals.contains(v))
                .collect();
            if coverage.is_empty() {
                continue;
            }
            instance
                .sets
                .insert((anchor, gateway), coverage.iter().copied().collect());
            instance.cover_map.insert(gateway, coverage);
        }
    }

    Ok(instance)
}
