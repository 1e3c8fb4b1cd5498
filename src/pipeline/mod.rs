/*!
# End-to-End Pipeline

Runs the whole approximation chain on one instance: greedy packing, cover
instance construction, coverage selection with the chosen strategy, tree
completion, and the telephone-round simulation. Per-stage wall-clock
timings are collected into a serializable report so experiments can be
compared run to run.

The pipeline commits to at most `k` terminals — the packed terminals in
discovery order followed by the witnesses of the selected cover edges —
and simulates the broadcast against exactly that commitment.
*/

use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::debug;

use crate::broadcast::{BroadcastLimits, simulate_broadcast_rounds};
use crate::core::error::KmtmError;
use crate::core::types::{Digraph, NodeId};
use crate::core::validation::validate_instance;
use crate::cover::continuous::pmcover_continuous;
use crate::cover::greedy::pmcover_half;
use crate::cover::lazy::pmcover_lazy;
use crate::cover::{CoverKey, build_cover_instance};
use crate::packing::greedy_packing;
use crate::tree::complete;

/// Which coverage-selection strategy the pipeline uses for the residual
/// terminals.
#[derive(Debug, Clone, Serialize)]
pub enum CoverVariant {
    /// Eager greedy, ½-approximation.
    Half,
    /// Lazy greedy, same selections as `Half`.
    Lazy,
    /// Continuous greedy + rounding, (1 − 1/e)-approximation.
    Continuous {
        iters: usize,
        samples: usize,
        seed: u64,
    },
}

impl CoverVariant {
    /// Short name for logs and reports.
    pub fn name(&self) -> &'static str {
        match self {
            CoverVariant::Half => "half",
            CoverVariant::Lazy => "lazy",
            CoverVariant::Continuous { .. } => "continuous",
        }
    }
}

/// Wall-clock cost of each stage.
#[derive(Debug, Clone, Serialize)]
pub struct StageTimings {
    pub packing: Duration,
    pub cover_build: Duration,
    pub selection: Duration,
    pub completion: Duration,
    pub simulation: Duration,
}

/// What one pipeline run produced.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    /// Selection strategy used for the residue.
    pub variant: &'static str,
    /// Number of packs greedy packing extracted.
    pub pack_count: usize,
    /// Terminals covered by packs.
    pub packed_terminals: usize,
    /// Terminals still owed after packing.
    pub residual_demand: usize,
    /// Crossing edges available to the coverage stage.
    pub crossing_edges: usize,
    /// Cover edges the strategy selected.
    pub selected_edges: usize,
    /// Terminals the pipeline committed to informing (at most k).
    pub committed_terminals: usize,
    /// Size of the stitched tree.
    pub tree_nodes: usize,
    pub tree_edges: usize,
    /// Telephone rounds the simulation took.
    pub rounds: usize,
    pub timings: StageTimings,
}

/// Runs the full pipeline on one multicast instance.
///
/// # Errors
///
/// `KmtmError` for malformed instances (checked up front) and for breached
/// simulator resource limits. Algorithmic shortfalls — fewer packs than
/// `rho(k)`, coverage below the residual demand, unreachable commitments —
/// are visible in the report, not errors.
pub fn run<A, W>(
    graph: &Digraph<A, W>,
    root: NodeId,
    terminals: &BTreeSet<NodeId>,
    k: usize,
    depth_cap: usize,
    variant: &CoverVariant,
    limits: &BroadcastLimits,
) -> Result<PipelineReport, KmtmError> {
    validate_instance(graph, root, terminals, k, depth_cap)?;

    let started = Instant::now();
    let packs = greedy_packing(graph, root, terminals, k, depth_cap)?;
    let packing_time = started.elapsed();
    let packed: Vec<NodeId> = packs.iter().flatten().copied().collect();
    let residual = k.saturating_sub(packed.len());
    debug!(
        packs = packs.len(),
        covered = packed.len(),
        residual,
        "greedy packing done"
    );

    let started = Instant::now();
    let instance = build_cover_instance(graph, root, terminals, &packs, depth_cap, k)?;
    let cover_build_time = started.elapsed();

    let started = Instant::now();
    let selected: Vec<CoverKey> = match variant {
        CoverVariant::Half => pmcover_half(&instance.sets, &instance.budgets, residual),
        CoverVariant::Lazy => pmcover_lazy(&instance.sets, &instance.budgets, residual),
        CoverVariant::Continuous {
            iters,
            samples,
            seed,
        } => pmcover_continuous(
            &instance.sets,
            &instance.budgets,
            residual,
            *iters,
            *samples,
            *seed,
        ),
    };
    let selection_time = started.elapsed();
    debug!(
        variant = variant.name(),
        selected = selected.len(),
        "coverage selection done"
    );

    // The commitment: packed terminals first, then the selected witnesses,
    // capped at k.
    let mut committed: Vec<NodeId> = Vec::new();
    let mut seen: BTreeSet<NodeId> = BTreeSet::new();
    let witnesses = selected.iter().flat_map(|(_, gateway)| {
        instance
            .cover_map
            .get(gateway)
            .map(Vec::as_slice)
            .unwrap_or(&[])
            .iter()
            .copied()
    });
    for t in packed.iter().copied().chain(witnesses) {
        if committed.len() >= k {
            break;
        }
        if seen.insert(t) {
            committed.push(t);
        }
    }

    let started = Instant::now();
    let tree = complete(graph, root, &packs, &selected, &instance.cover_map, k);
    let completion_time = started.elapsed();

    let started = Instant::now();
    let targets: BTreeSet<NodeId> = committed.iter().copied().collect();
    let rounds = simulate_broadcast_rounds(&tree, root, &targets, limits)?;
    let simulation_time = started.elapsed();
    debug!(rounds, "broadcast simulation done");

    Ok(PipelineReport {
        variant: variant.name(),
        pack_count: packs.len(),
        packed_terminals: packed.len(),
        residual_demand: residual,
        crossing_edges: instance.sets.len(),
        selected_edges: selected.len(),
        committed_terminals: committed.len(),
        tree_nodes: tree.node_count(),
        tree_edges: tree.edge_count(),
        rounds,
        timings: StageTimings {
            packing: packing_time,
            cover_build: cover_build_time,
            selection: selection_time,
            completion: completion_time,
            simulation: simulation_time,
        },
    })
}
